//! Axis-aligned rectangle collider
//!
//! `offset` is the rectangle's bottom-left corner in the entity's local
//! frame. Without an explicit size the rectangle covers the visible sprite
//! frame exactly.

use std::any::Any;

use crate::core::config::PhysicsConfig;
use crate::debug::draw::DebugDraw;
use crate::foundation::math::{Color, Vec2};
use super::collider::{warn_unsupported_pair, Collider, ColliderBase, InitContext};
use super::collision::{ColliderShape, Rect};
use super::error::ColliderError;

/// Builder for [`RectCollider`]
#[derive(Debug, Clone, Default)]
pub struct RectColliderBuilder {
    size: Option<Vec2>,
    offset: Option<Vec2>,
    layers: Option<Vec<String>>,
    debug_color: Option<Color>,
}

impl RectColliderBuilder {
    /// Set an explicit local size
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Some(Vec2::new(width, height));
        self
    }

    /// Set the local bottom-left corner (requires an explicit size)
    pub fn offset(mut self, offset: Vec2) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the layer membership
    pub fn layers<I, S>(mut self, layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layers = Some(layers.into_iter().map(Into::into).collect());
        self
    }

    /// Set the debug-draw color
    pub fn debug_color(mut self, color: Color) -> Self {
        self.debug_color = Some(color);
        self
    }

    /// Take unset tunables from `config`
    pub fn with_config(mut self, config: &PhysicsConfig) -> Self {
        self.debug_color.get_or_insert(config.debug.shape_color());
        self
    }

    /// Build the collider
    pub fn build(self) -> Result<RectCollider, ColliderError> {
        match self.size {
            Some(size) => validate_size(size)?,
            None if self.offset.is_some() => {
                return Err(ColliderError::InvalidArgument(
                    "an offset requires an explicit size".to_string(),
                ));
            }
            None => {}
        }

        let mut base = ColliderBase::new(self.layers);
        if let Some(color) = self.debug_color {
            base.set_debug_color(color);
        }

        Ok(RectCollider {
            base,
            size: self.size.unwrap_or_else(Vec2::zeros),
            offset: self.offset.unwrap_or_else(Vec2::zeros),
            default_initialized: self.size.is_none(),
        })
    }
}

fn validate_size(size: Vec2) -> Result<(), ColliderError> {
    if size.x >= 0.0 && size.y >= 0.0 {
        Ok(())
    } else {
        Err(ColliderError::InvalidArgument(format!(
            "size must be non-negative, got {}x{}",
            size.x, size.y
        )))
    }
}

/// Axis-aligned rectangular collider component
#[derive(Debug)]
pub struct RectCollider {
    base: ColliderBase,
    size: Vec2,
    offset: Vec2,
    default_initialized: bool,
}

impl RectCollider {
    /// Start a builder
    pub fn builder() -> RectColliderBuilder {
        RectColliderBuilder::default()
    }

    /// Sized from the sprite, default layer
    pub fn new() -> Self {
        Self {
            base: ColliderBase::new(None),
            size: Vec2::zeros(),
            offset: Vec2::zeros(),
            default_initialized: true,
        }
    }

    /// Given size anchored at the reference origin, default layer
    pub fn with_size(width: f32, height: f32) -> Result<Self, ColliderError> {
        Self::builder().size(width, height).build()
    }

    /// Local size
    pub fn size(&self) -> Result<Vec2, ColliderError> {
        self.base.ensure_not_destroyed()?;
        Ok(self.size)
    }

    /// Set the local size. Also turns off sprite-derived sizing.
    pub fn set_size(&mut self, width: f32, height: f32) -> Result<(), ColliderError> {
        self.base.ensure_not_destroyed()?;
        let size = Vec2::new(width, height);
        validate_size(size)?;
        self.size = size;
        self.default_initialized = false;
        Ok(())
    }

    /// Local bottom-left corner
    pub fn offset(&self) -> Result<Vec2, ColliderError> {
        self.base.ensure_not_destroyed()?;
        Ok(self.offset)
    }

    /// Set the local bottom-left corner
    pub fn set_offset(&mut self, offset: Vec2) -> Result<(), ColliderError> {
        self.base.ensure_not_destroyed()?;
        self.offset = offset;
        Ok(())
    }

    /// Whether size is taken from the sprite
    pub fn is_default_initialized(&self) -> Result<bool, ColliderError> {
        self.base.ensure_not_destroyed()?;
        Ok(self.default_initialized)
    }

    /// World-space rectangle
    ///
    /// A mirrored axis flips the rectangle about the entity position; the
    /// result is normalized so `min` is still the lower corner.
    pub fn world_rect(&self) -> Result<Rect, ColliderError> {
        self.base.ensure_active()?;
        let transform = self.base.transform();
        let corner = transform.position + self.offset.component_mul(&transform.scale);
        let opposite = corner + self.size.component_mul(&transform.scale);
        Ok(Rect::new(corner.inf(&opposite), self.size.component_mul(&transform.scale.abs())))
    }
}

impl Default for RectCollider {
    fn default() -> Self {
        Self::new()
    }
}

impl Collider for RectCollider {
    fn base(&self) -> &ColliderBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ColliderBase {
        &mut self.base
    }

    fn initialize(&mut self, ctx: &InitContext<'_>) -> Result<(), ColliderError> {
        self.base.ensure_uninitialized()?;

        let derived = if self.default_initialized {
            let sprite = ctx.sprite.ok_or(ColliderError::MissingSprite(ctx.entity))?;
            let size = Vec2::new(sprite.visible_width(), sprite.visible_height());
            validate_size(size)?;
            Some(size)
        } else {
            None
        };

        self.base.register(ctx)?;

        if let Some(size) = derived {
            self.size = size;
            self.offset = Vec2::zeros();
        }
        log::debug!(
            "Initialized rect collider on {:?}: size {}x{}",
            ctx.entity,
            self.size.x,
            self.size.y
        );
        Ok(())
    }

    fn shape(&self) -> Result<ColliderShape, ColliderError> {
        Ok(ColliderShape::Rect(self.world_rect()?))
    }

    fn collides_with_point(&self, point: Vec2) -> Result<bool, ColliderError> {
        Ok(self.world_rect()?.contains_point(point))
    }

    fn collides_with_line(&self, start: Vec2, end: Vec2) -> Result<bool, ColliderError> {
        Ok(self.world_rect()?.intersects_segment(start, end))
    }

    fn collides_with(&self, other: &dyn Collider) -> Result<bool, ColliderError> {
        let rect = self.world_rect()?;
        let other_shape = other.shape()?;

        match other_shape {
            ColliderShape::Circle(circle) => Ok(circle.intersects_rect(&rect)),
            ColliderShape::Rect(other_rect) => Ok(rect.intersects_rect(&other_rect)),
            ColliderShape::Custom { .. } => {
                warn_unsupported_pair(&ColliderShape::Rect(rect), &other_shape);
                Ok(false)
            }
        }
    }

    fn draw_with_color(&self, draw: &mut dyn DebugDraw, color: Color) -> Result<(), ColliderError> {
        let corners = self.world_rect()?.corners();
        for (index, &corner) in corners.iter().enumerate() {
            draw.draw_line(corner, corners[(index + 1) % corners.len()], color);
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{SpriteComponent, SpriteQuery, TransformComponent};
    use crate::ecs::Entity;
    use crate::physics::collision_system::CollisionManager;
    use approx::assert_relative_eq;
    use slotmap::SlotMap;

    fn init(collider: &mut RectCollider, transform: &TransformComponent, sprite: Option<&SpriteComponent>) -> Result<CollisionManager, ColliderError> {
        let manager = CollisionManager::new();
        let mut keys: SlotMap<Entity, ()> = SlotMap::with_key();
        let ctx = InitContext {
            entity: keys.insert(()),
            transform,
            sprite: sprite.map(|s| s as &dyn SpriteQuery),
            manager: &manager,
        };
        collider.initialize(&ctx)?;
        Ok(manager)
    }

    #[test]
    fn test_sprite_sized_rect() {
        let sprite = SpriteComponent::sheet("tiles.png", 64.0, 32.0, 4, 2);
        let transform = TransformComponent::from_position(Vec2::new(10.0, 10.0)).with_uniform_scale(2.0);
        let mut collider = RectCollider::new();
        let _manager = init(&mut collider, &transform, Some(&sprite)).unwrap();

        let rect = collider.world_rect().unwrap();
        assert_relative_eq!(rect.min, Vec2::new(10.0, 10.0));
        assert_relative_eq!(rect.size, Vec2::new(32.0, 32.0));
    }

    #[test]
    fn test_mirrored_rect_is_normalized() {
        let transform = TransformComponent::from_position(Vec2::new(2.0, 2.0)).with_uniform_scale(-1.0);
        let mut collider = RectCollider::with_size(4.0, 4.0).unwrap();
        let _manager = init(&mut collider, &transform, None).unwrap();

        let rect = collider.world_rect().unwrap();
        assert_relative_eq!(rect.min, Vec2::new(-2.0, -2.0));
        assert_relative_eq!(rect.size, Vec2::new(4.0, 4.0));
        assert_eq!(collider.collides_with_point(Vec2::new(0.0, 0.0)), Ok(true));
        assert_eq!(collider.collides_with_point(Vec2::new(2.5, 0.0)), Ok(false));

        // Single mirrored axis
        let transform = TransformComponent::identity().with_scale(Vec2::new(-2.0, 1.0));
        let mut collider = RectCollider::with_size(1.0, 3.0).unwrap();
        let _manager = init(&mut collider, &transform, None).unwrap();
        let rect = collider.world_rect().unwrap();
        assert_relative_eq!(rect.min, Vec2::new(-2.0, 0.0));
        assert_relative_eq!(rect.size, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_missing_sprite() {
        let mut collider = RectCollider::new();
        let err = init(&mut collider, &TransformComponent::identity(), None).unwrap_err();
        assert!(matches!(err, ColliderError::MissingSprite(_)));
    }

    #[test]
    fn test_point_and_line_queries() {
        let mut collider = RectCollider::with_size(4.0, 2.0).unwrap();
        let _manager = init(&mut collider, &TransformComponent::identity(), None).unwrap();

        assert_eq!(collider.collides_with_point(Vec2::new(4.0, 2.0)), Ok(true));
        assert_eq!(collider.collides_with_point(Vec2::new(4.1, 2.0)), Ok(false));
        assert_eq!(collider.collides_with_line(Vec2::new(-1.0, 1.0), Vec2::new(5.0, 1.0)), Ok(true));
        assert_eq!(collider.collides_with_line(Vec2::new(-1.0, 3.0), Vec2::new(5.0, 3.0)), Ok(false));
    }

    #[test]
    fn test_set_size_validation() {
        let mut collider = RectCollider::with_size(1.0, 1.0).unwrap();
        assert!(matches!(collider.set_size(-1.0, 1.0), Err(ColliderError::InvalidArgument(_))));
        assert_eq!(collider.size(), Ok(Vec2::new(1.0, 1.0)));
        assert!(RectCollider::builder().offset(Vec2::new(1.0, 0.0)).build().is_err());
    }

    #[test]
    fn test_draw_four_edges() {
        struct Count(usize);
        impl DebugDraw for Count {
            fn draw_line(&mut self, _start: Vec2, _end: Vec2, _color: Color) {
                self.0 += 1;
            }
        }

        let mut collider = RectCollider::with_size(1.0, 1.0).unwrap();
        let _manager = init(&mut collider, &TransformComponent::identity(), None).unwrap();
        let mut count = Count(0);
        collider.draw(&mut count).unwrap();
        assert_eq!(count.0, 4);
    }
}
