//! # collider2d
//!
//! 2D collider components for a game engine's collision subsystem.
//!
//! ## Features
//!
//! - **Circle colliders**: explicit or sprite-derived radius, scaled by the
//!   entity transform
//! - **Rectangle colliders**: axis-aligned companion shape
//! - **Queries**: point, line segment and collider-vs-collider tests
//! - **Collision layers**: named layers filtering which colliders meet
//! - **Debug drawing**: polygon outlines through a line-drawing trait
//! - **Configuration**: TOML/RON physics settings
//!
//! ## Quick Start
//!
//! ```rust
//! use collider2d::prelude::*;
//!
//! let manager = CollisionManager::new();
//! let mut world = World::new();
//!
//! let ball = world.spawn(TransformComponent::identity());
//! world.attach_collider(ball, CircleCollider::with_radius(5.0)?, &manager)?;
//!
//! let circle = world.collider_as::<CircleCollider>(ball).expect("circle attached");
//! assert!(circle.collides_with_point(Vec2::new(3.0, 4.0))?);
//! # Ok::<(), ColliderError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod ecs;
pub mod physics;
pub mod debug;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        foundation::math::{Vec2, Color},
        ecs::{World, Entity, TransformComponent, SpriteComponent},
        ecs::components::{TransformSource, SpriteQuery},
        physics::{
            CircleCollider, RectCollider, Collider, ColliderError, ColliderShape,
            ColliderState, CollisionManager, CollisionPair,
        },
        debug::{DebugDraw, DebugDrawSystem, CollisionDebugVisualizer},
        core::config::{PhysicsConfig, Config},
    };
}
