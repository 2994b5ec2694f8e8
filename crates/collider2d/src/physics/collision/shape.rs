//! Collider shape tags
//!
//! Colliders expose their world-space geometry as a closed [`ColliderShape`]
//! so the querying side can pick the narrow-phase test by matching on it.

use std::fmt;

use super::primitives::{Circle, Rect};

/// World-space shape of a collider, used for collider-vs-collider dispatch
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// A circle
    Circle(Circle),
    /// An axis-aligned rectangle
    Rect(Rect),
    /// A shape with no built-in narrow-phase test
    Custom {
        /// Name reported in diagnostics
        kind: &'static str,
        /// World-space bounds, for debug drawing
        bounds: Rect,
    },
}

impl ColliderShape {
    /// Tag of this shape
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Circle(_) => ShapeKind::Circle,
            Self::Rect(_) => ShapeKind::Rect,
            Self::Custom { kind, .. } => ShapeKind::Custom(kind),
        }
    }

    /// Axis-aligned bounds of the shape
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Circle(circle) => {
                let extent = crate::foundation::math::Vec2::new(circle.radius, circle.radius);
                Rect::new(circle.center - extent, extent * 2.0)
            }
            Self::Rect(rect) => *rect,
            Self::Custom { bounds, .. } => *bounds,
        }
    }
}

/// Shape tag without geometry, used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Circle
    Circle,
    /// Axis-aligned rectangle
    Rect,
    /// Named custom shape
    Custom(&'static str),
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circle => write!(f, "circle"),
            Self::Rect => write!(f, "rect"),
            Self::Custom(name) => write!(f, "custom shape '{name}'"),
        }
    }
}
