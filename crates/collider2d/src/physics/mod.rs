//! Physics module for collision detection
//!
//! Colliders attached to entities, a layer registry deciding which colliders
//! are tested against each other, and a manager running the broad and narrow
//! phases once per step.

pub mod error;
pub mod collision;
pub mod collision_layers;
pub mod collider;
pub mod circle_collider;
pub mod rect_collider;
pub mod collision_system;

#[cfg(test)]
mod tests;

pub use error::ColliderError;
pub use collision::{Circle, ColliderShape, Rect, ShapeKind};
pub use collision_layers::{LayerId, LayerMask, LayerRegistry, DEFAULT_LAYER};
pub use collider::{Collider, ColliderBase, ColliderState, InitContext, TransformSnapshot};
pub use circle_collider::{CircleCollider, CircleColliderBuilder};
pub use rect_collider::{RectCollider, RectColliderBuilder};
pub use collision_system::{CollisionManager, CollisionPair, Registration, RegistrationKey};
