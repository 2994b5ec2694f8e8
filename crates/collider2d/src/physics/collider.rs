//! Base collider contract
//!
//! Every collider embeds a [`ColliderBase`] holding what all shapes share:
//! layer membership, the owning entity, the registration with the
//! [`CollisionManager`], the lifecycle state and the transform snapshot.
//! Shape-specific behavior lives behind the [`Collider`] trait.

use std::any::Any;
use std::collections::BTreeSet;
use std::fmt;

use crate::debug::draw::DebugDraw;
use crate::ecs::Entity;
use crate::ecs::components::{SpriteQuery, TransformSource};
use crate::foundation::math::{Color, Vec2};
use super::collision::ColliderShape;
use super::collision_layers::DEFAULT_LAYER;
use super::collision_system::{CollisionManager, Registration};
use super::error::ColliderError;

/// Lifecycle of a collider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColliderState {
    /// Constructed, not yet attached to an entity
    Uninitialized,
    /// Attached, registered and queryable
    Initialized,
    /// Deregistered; every operation fails
    Destroyed,
}

/// Entity placement captured at initialization and at each collision step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSnapshot {
    /// World position of the entity's reference origin
    pub position: Vec2,
    /// World scale
    pub scale: Vec2,
}

impl TransformSnapshot {
    /// Read the current placement from a transform
    pub fn capture(transform: &dyn TransformSource) -> Self {
        Self {
            position: transform.world_position(),
            scale: transform.world_scale(),
        }
    }
}

impl Default for TransformSnapshot {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

/// Everything a collider may read while initializing
pub struct InitContext<'a> {
    /// Entity the collider is being attached to
    pub entity: Entity,
    /// The entity's transform
    pub transform: &'a dyn TransformSource,
    /// The entity's sprite, if it has one
    pub sprite: Option<&'a dyn SpriteQuery>,
    /// Manager to register with
    pub manager: &'a CollisionManager,
}

impl fmt::Debug for InitContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitContext")
            .field("entity", &self.entity)
            .field("has_sprite", &self.sprite.is_some())
            .finish_non_exhaustive()
    }
}

/// State shared by every collider shape
#[derive(Debug)]
pub struct ColliderBase {
    layers: BTreeSet<String>,
    entity: Option<Entity>,
    registration: Option<Registration>,
    transform: TransformSnapshot,
    state: ColliderState,
    debug_color: Color,
}

impl ColliderBase {
    /// Default debug color (green)
    pub const DEFAULT_DEBUG_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

    /// Create an uninitialized base. `None` means membership in the default
    /// layer only; an explicit empty list is rejected at initialization.
    pub fn new(layers: Option<Vec<String>>) -> Self {
        let layers = match layers {
            Some(names) => names.into_iter().collect(),
            None => BTreeSet::from([DEFAULT_LAYER.to_string()]),
        };

        Self {
            layers,
            entity: None,
            registration: None,
            transform: TransformSnapshot::default(),
            state: ColliderState::Uninitialized,
            debug_color: Color::from(Self::DEFAULT_DEBUG_COLOR),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ColliderState {
        self.state
    }

    /// Owning entity, once initialized
    pub fn entity(&self) -> Option<Entity> {
        self.entity
    }

    /// Whether the collider currently holds a manager registration
    pub fn is_registered(&self) -> bool {
        self.registration.is_some()
    }

    /// Fails unless the collider is initialized
    pub fn ensure_active(&self) -> Result<(), ColliderError> {
        match self.state {
            ColliderState::Initialized => Ok(()),
            ColliderState::Uninitialized => Err(ColliderError::NotInitialized),
            ColliderState::Destroyed => Err(ColliderError::UseAfterDestroy),
        }
    }

    /// Fails once the collider is destroyed
    pub fn ensure_not_destroyed(&self) -> Result<(), ColliderError> {
        match self.state {
            ColliderState::Destroyed => Err(ColliderError::UseAfterDestroy),
            _ => Ok(()),
        }
    }

    /// Fails unless the collider has never been initialized
    pub fn ensure_uninitialized(&self) -> Result<(), ColliderError> {
        match self.state {
            ColliderState::Uninitialized => Ok(()),
            ColliderState::Initialized => Err(ColliderError::AlreadyInitialized),
            ColliderState::Destroyed => Err(ColliderError::UseAfterDestroy),
        }
    }

    /// Register with the manager and move to `Initialized`.
    ///
    /// Shapes call this after every other fallible init step, so on error the
    /// base is left untouched.
    pub fn register(&mut self, ctx: &InitContext<'_>) -> Result<(), ColliderError> {
        self.ensure_uninitialized()?;
        if self.layers.is_empty() {
            return Err(ColliderError::InvalidArgument(
                "collider must belong to at least one layer".to_string(),
            ));
        }

        let registration = ctx
            .manager
            .register(ctx.entity, self.layers.iter().map(String::as_str))?;

        self.registration = Some(registration);
        self.entity = Some(ctx.entity);
        self.transform = TransformSnapshot::capture(ctx.transform);
        self.state = ColliderState::Initialized;
        Ok(())
    }

    /// Join a layer. Returns whether membership changed.
    ///
    /// While registered the name must be known to the manager.
    pub fn add_layer(&mut self, name: &str) -> Result<bool, ColliderError> {
        self.ensure_not_destroyed()?;
        if name.is_empty() {
            return Err(ColliderError::InvalidArgument("layer name cannot be empty".to_string()));
        }
        if self.layers.contains(name) {
            return Ok(false);
        }

        if let Some(registration) = &self.registration {
            let names = self.layers.iter().map(String::as_str).chain(std::iter::once(name));
            registration.update_layers(names)?;
        }
        self.layers.insert(name.to_string());
        Ok(true)
    }

    /// Leave a layer. Returns whether membership changed.
    ///
    /// The last layer cannot be removed.
    pub fn remove_layer(&mut self, name: &str) -> Result<bool, ColliderError> {
        self.ensure_not_destroyed()?;
        if !self.layers.contains(name) {
            return Ok(false);
        }
        if self.layers.len() == 1 {
            return Err(ColliderError::InvalidArgument(
                "collider must belong to at least one layer".to_string(),
            ));
        }

        if let Some(registration) = &self.registration {
            registration.update_layers(self.layers.iter().map(String::as_str).filter(|n| *n != name))?;
        }
        self.layers.remove(name);
        Ok(true)
    }

    /// Whether the collider belongs to `name`
    pub fn contains_layer(&self, name: &str) -> bool {
        self.layers.contains(name)
    }

    /// Layer names in sorted order
    pub fn layers(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(String::as_str)
    }

    /// Last captured transform
    pub fn transform(&self) -> TransformSnapshot {
        self.transform
    }

    /// Refresh the transform snapshot
    pub fn sync_transform(&mut self, transform: &dyn TransformSource) -> Result<(), ColliderError> {
        self.ensure_active()?;
        self.transform = TransformSnapshot::capture(transform);
        Ok(())
    }

    /// Color used by [`Collider::draw`]
    pub fn debug_color(&self) -> Color {
        self.debug_color
    }

    /// Change the color used by [`Collider::draw`]
    pub fn set_debug_color(&mut self, color: Color) {
        self.debug_color = color;
    }

    /// Deregister and move to `Destroyed`
    pub fn destroy(&mut self) -> Result<(), ColliderError> {
        self.ensure_not_destroyed()?;
        // Dropping the registration removes the manager entry
        self.registration = None;
        self.state = ColliderState::Destroyed;
        log::debug!("Destroyed collider of entity {:?}", self.entity);
        Ok(())
    }
}

/// A collision volume attached to an entity
///
/// Collider-vs-collider tests are resolved by the querying collider matching
/// on the other collider's [`ColliderShape`].
pub trait Collider: Any + fmt::Debug {
    /// Shared collider state
    fn base(&self) -> &ColliderBase;

    /// Shared collider state, mutable
    fn base_mut(&mut self) -> &mut ColliderBase;

    /// Attach to an entity and register with the manager
    fn initialize(&mut self, ctx: &InitContext<'_>) -> Result<(), ColliderError>;

    /// World-space shape from the current transform snapshot
    fn shape(&self) -> Result<ColliderShape, ColliderError>;

    /// Whether `point` lies inside or on the collider
    fn collides_with_point(&self, point: Vec2) -> Result<bool, ColliderError>;

    /// Whether the segment `[start, end]` touches the collider
    fn collides_with_line(&self, start: Vec2, end: Vec2) -> Result<bool, ColliderError>;

    /// Whether this collider overlaps `other`
    ///
    /// Pairs without a narrow-phase test report `false` and log a warning.
    fn collides_with(&self, other: &dyn Collider) -> Result<bool, ColliderError>;

    /// Emit the outline through `draw` in `color`
    fn draw_with_color(&self, draw: &mut dyn DebugDraw, color: Color) -> Result<(), ColliderError>;

    /// Upcast for downcasting to the concrete collider
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete collider
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Emit the outline in the base debug color
    fn draw(&self, draw: &mut dyn DebugDraw) -> Result<(), ColliderError> {
        self.draw_with_color(draw, self.base().debug_color())
    }

    /// Owning entity, once initialized
    fn entity(&self) -> Option<Entity> {
        self.base().entity()
    }

    /// Current lifecycle state
    fn state(&self) -> ColliderState {
        self.base().state()
    }

    /// Deregister from the manager; all later operations fail
    fn destroy(&mut self) -> Result<(), ColliderError> {
        self.base_mut().destroy()
    }
}

/// Log a collider pair that has no narrow-phase test
pub(crate) fn warn_unsupported_pair(this: &ColliderShape, other: &ColliderShape) {
    let diagnostic = ColliderError::UnsupportedShapePair {
        a: this.kind(),
        b: other.kind(),
    };
    log::warn!("{diagnostic}; treating as no collision");
}
