//! # Physics Configuration
//!
//! Consolidates the tunable settings of the collision subsystem into a single
//! serializable structure. It can be loaded from TOML or RON through the
//! [`Config`] trait.
//!
//! ## Configuration Categories
//!
//! - **Layers**: collision layers registered with the manager at startup
//! - **Circle defaults**: polygon resolution used for circle debug drawing
//! - **Debug**: collider visualization toggles and colors
//! - **Logging**: filter string handed to the logger

use serde::{Serialize, Deserialize};

use crate::foundation::math::Color;
use crate::physics::collision_layers::{LayerRegistry, DEFAULT_LAYER};

pub use crate::config::{Config, ConfigError};

/// Default polygon resolution for circle debug drawing
pub const DEFAULT_DRAW_SEGMENTS: u32 = 16;

/// Minimum polygon resolution accepted for circle debug drawing
pub const MIN_DRAW_SEGMENTS: u32 = 3;

/// # Circle Collider Defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleDefaults {
    /// Number of line segments used to approximate a circle in debug drawing
    pub draw_segments: u32,
}

impl Default for CircleDefaults {
    fn default() -> Self {
        Self {
            draw_segments: DEFAULT_DRAW_SEGMENTS,
        }
    }
}

/// # Collision Debug Configuration
///
/// Colors are RGBA in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionDebugConfig {
    /// Whether collider visualization is active
    pub enabled: bool,
    /// Color for colliders that are not currently colliding
    pub shape_color: [f32; 4],
    /// Color for colliders that are part of a current collision pair
    pub colliding_color: [f32; 4],
}

impl CollisionDebugConfig {
    /// Shape color as a vector
    pub fn shape_color(&self) -> Color {
        Color::from(self.shape_color)
    }

    /// Colliding color as a vector
    pub fn colliding_color(&self) -> Color {
        Color::from(self.colliding_color)
    }
}

impl Default for CollisionDebugConfig {
    fn default() -> Self {
        Self {
            enabled: cfg!(debug_assertions),
            shape_color: [0.0, 1.0, 0.0, 1.0],     // Green
            colliding_color: [1.0, 0.0, 0.0, 1.0], // Red
        }
    }
}

/// # Physics Configuration
///
/// Top-level configuration for the collision subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Collision layers to register at startup (the default layer is implicit)
    pub layers: Vec<String>,
    /// Log filter for the collision subsystem
    pub log_level: String,
    /// Circle collider defaults
    pub circle: CircleDefaults,
    /// Debug visualization settings
    pub debug: CollisionDebugConfig,
}

impl PhysicsConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            log_level: "info".to_string(),
            circle: CircleDefaults::default(),
            debug: CollisionDebugConfig::default(),
        }
    }

    /// Add a collision layer
    pub fn with_layer(mut self, name: impl Into<String>) -> Self {
        self.layers.push(name.into());
        self
    }

    /// Set the default circle draw segments
    pub fn with_draw_segments(mut self, segments: u32) -> Self {
        self.circle.draw_segments = segments;
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Install the logger using `log_level` as the filter
    pub fn init_logging(&self) {
        crate::foundation::logging::init_with_filter(&self.log_level);
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.circle.draw_segments < MIN_DRAW_SEGMENTS {
            return Err(ConfigError::Invalid(format!(
                "circle.draw_segments must be at least {MIN_DRAW_SEGMENTS}, got {}",
                self.circle.draw_segments
            )));
        }

        if self.layers.iter().any(String::is_empty) {
            return Err(ConfigError::Invalid("layer names cannot be empty".to_string()));
        }

        let mut seen = std::collections::HashSet::new();
        for layer in &self.layers {
            if layer != DEFAULT_LAYER && !seen.insert(layer.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate layer '{layer}'")));
            }
        }

        // The default layer always occupies one slot.
        let extra = seen.len();
        if extra >= LayerRegistry::MAX_LAYERS {
            return Err(ConfigError::Invalid(format!(
                "at most {} layers besides '{DEFAULT_LAYER}' are supported",
                LayerRegistry::MAX_LAYERS - 1
            )));
        }

        let colors = self.debug.shape_color.iter().chain(self.debug.colliding_color.iter());
        if colors.copied().any(|c| !(0.0..=1.0).contains(&c)) {
            return Err(ConfigError::Invalid("debug colors must be within [0, 1]".to_string()));
        }

        Ok(())
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for PhysicsConfig {}
