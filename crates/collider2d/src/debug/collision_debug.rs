//! Collision-specific debug visualization
//!
//! Based on Game Engine Architecture 3rd Edition, Section 10.2:
//! "Debug drawing for collision detection typically includes visualizations
//! of bounding volumes, collision shapes, and query results."

use std::collections::HashSet;

use crate::core::config::CollisionDebugConfig;
use crate::debug::draw::{DebugDraw, DebugDrawSystem, DebugLine};
use crate::ecs::World;
use crate::foundation::math::Color;
use crate::physics::collider::ColliderState;
use crate::physics::collision_system::CollisionPair;

/// Color scheme for collision visualization
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionDebugColors {
    /// Color for collision shapes (not colliding)
    pub shape_default: Color,

    /// Color for collision shapes (currently colliding)
    pub shape_colliding: Color,

    /// Color for axis-aligned bounds
    pub bounds: Color,
}

impl Default for CollisionDebugColors {
    fn default() -> Self {
        Self {
            shape_default: Color::new(0.0, 1.0, 0.0, 1.0),   // Green
            shape_colliding: Color::new(1.0, 0.0, 0.0, 1.0), // Red
            bounds: Color::new(0.5, 0.8, 1.0, 0.3),          // Light blue, transparent
        }
    }
}

/// Collision-specific debug visualizer
///
/// Draws every initialized collider of a [`World`] into its own
/// [`DebugDrawSystem`], highlighting the ones in a current collision pair.
#[derive(Debug)]
pub struct CollisionDebugVisualizer {
    debug_draw: DebugDrawSystem,
    colors: CollisionDebugColors,

    /// Show collision shapes
    pub show_shapes: bool,

    /// Show axis-aligned bounds around each shape
    pub show_bounds: bool,
}

impl CollisionDebugVisualizer {
    /// Create a new collision debug visualizer
    pub fn new() -> Self {
        Self {
            debug_draw: DebugDrawSystem::new(),
            colors: CollisionDebugColors::default(),
            show_shapes: true,
            show_bounds: false,
        }
    }

    /// Create a visualizer using configured colors and enable flag
    pub fn from_config(config: &CollisionDebugConfig) -> Self {
        let mut visualizer = Self::new().with_colors(CollisionDebugColors {
            shape_default: config.shape_color(),
            shape_colliding: config.colliding_color(),
            ..CollisionDebugColors::default()
        });
        visualizer.set_enabled(config.enabled);
        visualizer
    }

    /// Set custom color scheme
    pub fn with_colors(mut self, colors: CollisionDebugColors) -> Self {
        self.colors = colors;
        self
    }

    /// Draw all initialized colliders for this frame
    ///
    /// Returns how many colliders emitted at least one line.
    pub fn draw_colliders(&mut self, world: &World, pairs: &HashSet<CollisionPair>) -> usize {
        if !self.is_enabled() {
            return 0;
        }

        let mut drawn = 0;
        for (entity, collider) in world.colliders() {
            if collider.state() != ColliderState::Initialized {
                continue;
            }

            let is_colliding = pairs.iter().any(|pair| pair.contains(entity));
            let color = if is_colliding {
                self.colors.shape_colliding
            } else {
                self.colors.shape_default
            };

            let before = self.debug_draw.line_count();
            if self.show_shapes {
                if let Err(err) = collider.draw_with_color(&mut self.debug_draw, color) {
                    log::warn!("Could not draw collider of {entity:?}: {err}");
                    continue;
                }
            }

            if self.show_bounds {
                if let Ok(shape) = collider.shape() {
                    let corners = shape.bounds().corners();
                    for (index, &corner) in corners.iter().enumerate() {
                        self.debug_draw.draw_line(corner, corners[(index + 1) % corners.len()], self.colors.bounds);
                    }
                }
            }

            if self.debug_draw.line_count() > before {
                drawn += 1;
            }
        }
        drawn
    }

    /// Clear all visualization
    pub fn clear(&mut self) {
        self.debug_draw.clear();
    }

    /// Update debug system (expire lines)
    pub fn update(&mut self, delta_time: f32) {
        self.debug_draw.update(delta_time);
    }

    /// Lines to render this frame
    pub fn lines(&self) -> &[DebugLine] {
        self.debug_draw.lines()
    }

    /// Enable/disable the entire debug system
    pub fn set_enabled(&mut self, enabled: bool) {
        self.debug_draw.enabled = enabled;
    }

    /// Check if debug system is enabled
    pub fn is_enabled(&self) -> bool {
        self.debug_draw.enabled
    }

    /// Get reference to underlying debug draw system
    pub fn debug_draw(&self) -> &DebugDrawSystem {
        &self.debug_draw
    }

    /// Get mutable reference to underlying debug draw system
    pub fn debug_draw_mut(&mut self) -> &mut DebugDrawSystem {
        &mut self.debug_draw
    }
}

impl Default for CollisionDebugVisualizer {
    fn default() -> Self {
        Self::new()
    }
}
