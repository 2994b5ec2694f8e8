//! # Core Module
//!
//! Shared abstractions used throughout the crate.
//!
//! ## Organization
//!
//! - **Config**: Physics configuration and the file-backed `Config` trait

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;
pub use crate::ecs;

// Re-export commonly used config types
pub use config::{
    PhysicsConfig,
    CircleDefaults,
    CollisionDebugConfig,
    Config,
    ConfigError,
};
