//! Circle collider
//!
//! A circular collision volume attached to an entity. Geometry is stored in
//! the entity's local frame: `offset` is the circle center measured from the
//! entity's reference origin (the bottom-left of its sprite). World geometry
//! comes from the last transform snapshot:
//!
//! - center = position + offset * scale (component-wise)
//! - real radius = radius * max(|scale.x|, |scale.y|)
//!
//! When no radius is supplied the collider is *default-initialized*: radius
//! and offset are derived from the entity's visible sprite frame when it is
//! attached.

use std::any::Any;

use crate::core::config::{PhysicsConfig, DEFAULT_DRAW_SEGMENTS, MIN_DRAW_SEGMENTS};
use crate::debug::draw::DebugDraw;
use crate::foundation::math::constants::TAU;
use crate::foundation::math::utils::max_scale_factor;
use crate::foundation::math::{Color, Vec2};
use super::collider::{warn_unsupported_pair, Collider, ColliderBase, InitContext};
use super::collision::{Circle, ColliderShape};
use super::error::ColliderError;

/// Builder for [`CircleCollider`]
///
/// An absent radius makes the collider default-initialized. Absent layers
/// mean the default layer only.
#[derive(Debug, Clone, Default)]
pub struct CircleColliderBuilder {
    radius: Option<f32>,
    offset: Option<Vec2>,
    layers: Option<Vec<String>>,
    draw_segments: Option<u32>,
    debug_color: Option<Color>,
}

impl CircleColliderBuilder {
    /// Set an explicit local radius
    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Set the local center offset (requires an explicit radius)
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

    /// Set the debug-draw polygon resolution
    pub fn draw_segments(mut self, segments: u32) -> Self {
        self.draw_segments = Some(segments);
        self
    }

    /// Set the debug-draw color
    pub fn debug_color(mut self, color: Color) -> Self {
        self.debug_color = Some(color);
        self
    }

    /// Take unset tunables from `config`
    pub fn with_config(mut self, config: &PhysicsConfig) -> Self {
        self.draw_segments.get_or_insert(config.circle.draw_segments);
        self.debug_color.get_or_insert(config.debug.shape_color());
        self
    }

    /// Build the collider
    pub fn build(self) -> Result<CircleCollider, ColliderError> {
        if let Some(radius) = self.radius {
            validate_radius(radius)?;
        } else if self.offset.is_some() {
            return Err(ColliderError::InvalidArgument(
                "an offset requires an explicit radius".to_string(),
            ));
        }

        let draw_segments = self.draw_segments.unwrap_or(DEFAULT_DRAW_SEGMENTS);
        validate_draw_segments(draw_segments)?;

        let mut base = ColliderBase::new(self.layers);
        if let Some(color) = self.debug_color {
            base.set_debug_color(color);
        }

        Ok(CircleCollider {
            base,
            radius: self.radius.unwrap_or(0.0),
            offset: self.offset.unwrap_or_else(Vec2::zeros),
            draw_segments,
            default_initialized: self.radius.is_none(),
        })
    }
}

fn validate_radius(radius: f32) -> Result<(), ColliderError> {
    if radius >= 0.0 {
        Ok(())
    } else {
        Err(ColliderError::InvalidArgument(format!("radius must be non-negative, got {radius}")))
    }
}

fn validate_draw_segments(segments: u32) -> Result<(), ColliderError> {
    if segments >= MIN_DRAW_SEGMENTS {
        Ok(())
    } else {
        Err(ColliderError::InvalidArgument(format!(
            "draw segments must be at least {MIN_DRAW_SEGMENTS}, got {segments}"
        )))
    }
}

/// Circular collider component
///
/// Neither `Clone` nor `Copy`: it owns its manager registration.
#[derive(Debug)]
pub struct CircleCollider {
    base: ColliderBase,
    radius: f32,
    offset: Vec2,
    draw_segments: u32,
    default_initialized: bool,
}

impl CircleCollider {
    /// Start a builder
    pub fn builder() -> CircleColliderBuilder {
        CircleColliderBuilder::default()
    }

    /// Sized from the sprite, default layer
    pub fn new() -> Self {
        Self::from_parts(None, None, None)
    }

    /// Sized from the sprite, given layers
    pub fn with_layers<I, S>(layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_parts(None, None, Some(layers.into_iter().map(Into::into).collect()))
    }

    /// Given radius centered on the reference origin, default layer
    pub fn with_radius(radius: f32) -> Result<Self, ColliderError> {
        Self::builder().radius(radius).build()
    }

    /// Given radius centered on the reference origin, given layers
    pub fn with_radius_and_layers<I, S>(radius: f32, layers: I) -> Result<Self, ColliderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder().radius(radius).layers(layers).build()
    }

    /// Given radius and offset, default layer
    pub fn with_radius_offset(radius: f32, offset: Vec2) -> Result<Self, ColliderError> {
        Self::builder().radius(radius).offset(offset).build()
    }

    /// Given radius, offset and layers
    pub fn with_radius_offset_layers<I, S>(radius: f32, offset: Vec2, layers: I) -> Result<Self, ColliderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder().radius(radius).offset(offset).layers(layers).build()
    }

    fn from_parts(radius: Option<f32>, offset: Option<Vec2>, layers: Option<Vec<String>>) -> Self {
        Self {
            base: ColliderBase::new(layers),
            radius: radius.unwrap_or(0.0),
            offset: offset.unwrap_or_else(Vec2::zeros),
            draw_segments: DEFAULT_DRAW_SEGMENTS,
            default_initialized: radius.is_none(),
        }
    }

    /// Local (pre-scale) radius
    pub fn radius(&self) -> Result<f32, ColliderError> {
        self.base.ensure_not_destroyed()?;
        Ok(self.radius)
    }

    /// Set the local radius. Also turns off sprite-derived sizing.
    pub fn set_radius(&mut self, radius: f32) -> Result<(), ColliderError> {
        self.base.ensure_not_destroyed()?;
        validate_radius(radius)?;
        self.radius = radius;
        self.default_initialized = false;
        Ok(())
    }

    /// World-space radius
    ///
    /// Uses the larger scale magnitude, so a non-uniformly scaled circle
    /// stays a circle rather than becoming an ellipse. Mirrored transforms
    /// keep the radius non-negative.
    pub fn real_radius(&self) -> Result<f32, ColliderError> {
        Ok(self.world_circle()?.radius)
    }

    /// World-space center
    pub fn position(&self) -> Result<Vec2, ColliderError> {
        Ok(self.world_circle()?.center)
    }

    /// Write the world-space center into `out`
    pub fn position_into(&self, out: &mut Vec2) -> Result<(), ColliderError> {
        *out = self.position()?;
        Ok(())
    }

    /// Local center offset from the entity's reference origin
    pub fn offset(&self) -> Result<Vec2, ColliderError> {
        self.base.ensure_not_destroyed()?;
        Ok(self.offset)
    }

    /// Set the local center offset
    pub fn set_offset(&mut self, offset: Vec2) -> Result<(), ColliderError> {
        self.base.ensure_not_destroyed()?;
        self.offset = offset;
        Ok(())
    }

    /// Debug-draw polygon resolution
    pub fn draw_segments(&self) -> Result<u32, ColliderError> {
        self.base.ensure_not_destroyed()?;
        Ok(self.draw_segments)
    }

    /// Set the debug-draw polygon resolution (at least 3)
    pub fn set_draw_segments(&mut self, segments: u32) -> Result<(), ColliderError> {
        self.base.ensure_not_destroyed()?;
        validate_draw_segments(segments)?;
        self.draw_segments = segments;
        Ok(())
    }

    /// Whether size and offset are taken from the sprite
    pub fn is_default_initialized(&self) -> Result<bool, ColliderError> {
        self.base.ensure_not_destroyed()?;
        Ok(self.default_initialized)
    }

    fn world_circle(&self) -> Result<Circle, ColliderError> {
        self.base.ensure_active()?;
        let transform = self.base.transform();
        Ok(Circle::new(
            transform.position + self.offset.component_mul(&transform.scale),
            self.radius * max_scale_factor(transform.scale),
        ))
    }
}

impl Default for CircleCollider {
    fn default() -> Self {
        Self::new()
    }
}

impl Collider for CircleCollider {
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
            let (width, height) = (sprite.visible_width(), sprite.visible_height());
            if width < 0.0 || height < 0.0 {
                return Err(ColliderError::InvalidArgument(format!(
                    "sprite size must be non-negative, got {width}x{height}"
                )));
            }
            Some((width.min(height) / 2.0, Vec2::new(width / 2.0, height / 2.0)))
        } else {
            None
        };

        self.base.register(ctx)?;

        if let Some((radius, offset)) = derived {
            self.radius = radius;
            self.offset = offset;
        }
        log::debug!(
            "Initialized circle collider on {:?}: radius {}, offset ({}, {})",
            ctx.entity,
            self.radius,
            self.offset.x,
            self.offset.y
        );
        Ok(())
    }

    fn shape(&self) -> Result<ColliderShape, ColliderError> {
        Ok(ColliderShape::Circle(self.world_circle()?))
    }

    fn collides_with_point(&self, point: Vec2) -> Result<bool, ColliderError> {
        Ok(self.world_circle()?.contains_point(point))
    }

    fn collides_with_line(&self, start: Vec2, end: Vec2) -> Result<bool, ColliderError> {
        Ok(self.world_circle()?.intersects_segment(start, end))
    }

    fn collides_with(&self, other: &dyn Collider) -> Result<bool, ColliderError> {
        let circle = self.world_circle()?;
        let other_shape = other.shape()?;

        match other_shape {
            ColliderShape::Circle(other_circle) => Ok(circle.intersects_circle(&other_circle)),
            ColliderShape::Rect(rect) => Ok(circle.intersects_rect(&rect)),
            ColliderShape::Custom { .. } => {
                warn_unsupported_pair(&ColliderShape::Circle(circle), &other_shape);
                Ok(false)
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn draw_with_color(&self, draw: &mut dyn DebugDraw, color: Color) -> Result<(), ColliderError> {
        let circle = self.world_circle()?;
        let segments = self.draw_segments;
        let vertex = |k: u32| {
            let theta = TAU * (k % segments) as f32 / segments as f32;
            circle.center + Vec2::new(theta.cos(), theta.sin()) * circle.radius
        };

        for k in 0..segments {
            draw.draw_line(vertex(k), vertex(k + 1), color);
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
