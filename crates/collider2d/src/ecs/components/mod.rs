//! ECS components
//!
//! Pure data components that colliders read from their owning entity.

pub mod transform;
pub mod sprite;

pub use transform::{TransformComponent, TransformSource};
pub use sprite::{SpriteComponent, SpriteQuery};
