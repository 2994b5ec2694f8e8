//! Minimal entity store for collider ownership
//!
//! Entities carry a transform, an optional sprite and an optional collider.
//! The [`World`] exclusively owns all three.

pub mod world;
pub mod entity;
pub mod components;

pub use world::World;
pub use entity::Entity;
pub use components::{TransformComponent, SpriteComponent};
