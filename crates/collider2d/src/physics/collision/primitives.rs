//! Primitive collision shapes and intersection algorithms
//!
//! World-space circles and axis-aligned rectangles. Every test is inclusive
//! at the boundary and compares squared distances.

use crate::foundation::math::Vec2;
use crate::foundation::math::utils::{clamp_vec2, segment_distance_squared};

/// A world-space circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Center position in world space
    pub center: Vec2,
    /// Radius in world units
    pub radius: f32,
}

impl Circle {
    /// Creates a new circle with the given center and radius
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if a point lies inside or on the circle
    pub fn contains_point(&self, point: Vec2) -> bool {
        (point - self.center).magnitude_squared() <= self.radius * self.radius
    }

    /// Check if the segment `[start, end]` touches the circle
    ///
    /// A degenerate segment is treated as a point.
    pub fn intersects_segment(&self, start: Vec2, end: Vec2) -> bool {
        segment_distance_squared(self.center, start, end) <= self.radius * self.radius
    }

    /// Check if this circle intersects with another
    pub fn intersects_circle(&self, other: &Circle) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Check if this circle overlaps an axis-aligned rectangle
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        self.contains_point(rect.closest_point(self.center))
    }
}

/// A world-space axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Bottom-left corner
    pub min: Vec2,
    /// Width and height (non-negative)
    pub size: Vec2,
}

impl Rect {
    /// Creates a rectangle from its bottom-left corner and size
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Top-right corner
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Center of the rectangle
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// The four corners, counter-clockwise from `min`
    pub fn corners(&self) -> [Vec2; 4] {
        let max = self.max();
        [
            self.min,
            Vec2::new(max.x, self.min.y),
            max,
            Vec2::new(self.min.x, max.y),
        ]
    }

    /// Point of the rectangle closest to `point`
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        clamp_vec2(point, self.min, self.max())
    }

    /// Check if a point lies inside or on the rectangle
    pub fn contains_point(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x <= max.x && point.y >= self.min.y && point.y <= max.y
    }

    /// Check if two rectangles overlap (touching edges count)
    pub fn intersects_rect(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x <= b_max.x && other.min.x <= a_max.x && self.min.y <= b_max.y && other.min.y <= a_max.y
    }

    /// Check if the segment `[start, end]` touches the rectangle
    ///
    /// Liang-Barsky clipping of the segment parameter against each slab.
    pub fn intersects_segment(&self, start: Vec2, end: Vec2) -> bool {
        if self.contains_point(start) || self.contains_point(end) {
            return true;
        }

        let max = self.max();
        let delta = end - start;
        let mut t_enter = 0.0_f32;
        let mut t_exit = 1.0_f32;

        let slabs = [
            (-delta.x, start.x - self.min.x),
            (delta.x, max.x - start.x),
            (-delta.y, start.y - self.min.y),
            (delta.y, max.y - start.y),
        ];

        for (p, q) in slabs {
            if p == 0.0 {
                // Parallel to this edge and outside its slab
                if q < 0.0 {
                    return false;
                }
                continue;
            }

            let t = q / p;
            if p < 0.0 {
                t_enter = t_enter.max(t);
            } else {
                t_exit = t_exit.min(t);
            }
            if t_enter > t_exit {
                return false;
            }
        }

        true
    }
}
