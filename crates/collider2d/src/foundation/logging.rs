//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with an explicit filter string
/// (e.g. `"info"` or `"collider2d=debug"`).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_with_filter(filter: &str) {
    let _ = env_logger::Builder::new()
        .parse_filters(filter)
        .try_init();
}
