//! Math utilities and types
//!
//! Provides the 2D vector types and the small set of scalar helpers the
//! collision code is built on.

pub use nalgebra::{Vector2, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// RGBA color used by debug drawing
pub type Color = Vec4;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;
}

/// Math utility functions
pub mod utils {
    use super::Vec2;

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }

    /// Component-wise clamp of a point into the box `[min, max]`
    pub fn clamp_vec2(point: Vec2, min: Vec2, max: Vec2) -> Vec2 {
        Vec2::new(clamp(point.x, min.x, max.x), clamp(point.y, min.y, max.y))
    }

    /// Closest point on the segment `[start, end]` to `point`.
    ///
    /// Projects onto the infinite line and clamps the parameter to `[0, 1]`.
    /// A degenerate segment returns `start`.
    pub fn closest_point_on_segment(point: Vec2, start: Vec2, end: Vec2) -> Vec2 {
        let direction = end - start;
        let length_squared = direction.magnitude_squared();
        if length_squared == 0.0 {
            return start;
        }

        let t = clamp((point - start).dot(&direction) / length_squared, 0.0, 1.0);
        start + direction * t
    }

    /// Squared distance from `point` to the segment `[start, end]`
    pub fn segment_distance_squared(point: Vec2, start: Vec2, end: Vec2) -> f32 {
        (point - closest_point_on_segment(point, start, end)).magnitude_squared()
    }

    /// Largest scale magnitude. Mirroring (a negative component) does not
    /// shrink or invert sizes.
    pub fn max_scale_factor(scale: Vec2) -> f32 {
        scale.x.abs().max(scale.y.abs())
    }
}
