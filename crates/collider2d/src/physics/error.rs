//! Collider error type

use thiserror::Error;

use crate::ecs::Entity;
use super::collision::ShapeKind;

/// Errors reported by collider operations
///
/// Init-time failures (`MissingSprite`, `UnknownLayer`) leave the collider
/// uninitialized and unregistered. Setter failures leave state unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColliderError {
    /// Auto-sizing was requested but the entity has no sprite
    #[error("entity {0:?} has no sprite to derive the collider size from")]
    MissingSprite(Entity),

    /// A layer name is not registered with the collision manager
    #[error("unknown collision layer '{0}'")]
    UnknownLayer(String),

    /// Operation requires an initialized collider
    #[error("collider has not been initialized")]
    NotInitialized,

    /// Operation on a destroyed collider
    #[error("collider has been destroyed")]
    UseAfterDestroy,

    /// Rejected argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No narrow-phase test exists for this pair (diagnostic only)
    #[error("no collision test between {a} and {b}")]
    UnsupportedShapePair {
        /// Shape of the queried collider
        a: ShapeKind,
        /// Shape of the other collider
        b: ShapeKind,
    },

    /// `initialize` was called a second time
    #[error("collider is already initialized")]
    AlreadyInitialized,

    /// The entity does not exist in the world
    #[error("entity {0:?} does not exist")]
    EntityNotFound(Entity),

    /// The collision registry is borrowed elsewhere (re-entrant call)
    #[error("collision registry is busy")]
    RegistryBusy,
}
