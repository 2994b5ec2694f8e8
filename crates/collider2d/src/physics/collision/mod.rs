//! Collision geometry
//!
//! # Module Organization
//!
//! - [`primitives`] - World-space circles and rectangles with intersection tests
//! - [`shape`] - The closed shape tag colliders expose for dispatch
//!
//! Colliders store geometry in the entity's local frame and build these
//! world-space primitives on demand from the latest transform snapshot.

pub mod primitives;
pub mod shape;

pub use primitives::{Circle, Rect};
pub use shape::{ColliderShape, ShapeKind};
