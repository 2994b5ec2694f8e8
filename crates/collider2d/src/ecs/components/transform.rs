//! Transform component for the ECS system
//!
//! Pure data component. 2D, Y-up, with the entity's reference origin at the
//! bottom-left of its visible bounds. Colliders consume it only through
//! [`TransformSource`].

use crate::foundation::math::Vec2;

/// World-space placement queried by colliders
pub trait TransformSource {
    /// World-space position of the entity's reference origin
    fn world_position(&self) -> Vec2;

    /// World-space scale factors
    fn world_scale(&self) -> Vec2;
}

/// ECS Transform component
///
/// Rotation is intentionally absent: colliders are axis-aligned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec2,

    /// World space scale factors
    pub scale: Vec2,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create from position and scale
    pub fn from_position_scale(position: Vec2, scale: Vec2) -> Self {
        Self { position, scale }
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec2::new(scale, scale);
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Move by a world-space delta
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

impl TransformSource for TransformComponent {
    fn world_position(&self) -> Vec2 {
        self.position
    }

    fn world_scale(&self) -> Vec2 {
        self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_identity() {
        let transform = TransformComponent::identity();

        assert_eq!(transform.world_position(), Vec2::zeros());
        assert_eq!(transform.world_scale(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_builder_chain() {
        let transform = TransformComponent::identity()
            .with_position(Vec2::new(3.0, -2.0))
            .with_uniform_scale(2.5);

        assert_eq!(transform.position, Vec2::new(3.0, -2.0));
        assert_eq!(transform.scale, Vec2::new(2.5, 2.5));
    }

    #[test]
    fn test_translate() {
        let mut transform = TransformComponent::from_position(Vec2::new(1.0, 1.0));
        transform.translate(Vec2::new(0.5, -2.0));
        assert_relative_eq!(transform.world_position(), Vec2::new(1.5, -1.0));
    }
}
