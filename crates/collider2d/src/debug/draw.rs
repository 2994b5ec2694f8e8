//! Debug line recording
//!
//! Colliders only ever emit line segments through [`DebugDraw::draw_line`].
//! [`DebugDrawSystem`] collects them per frame for a renderer to read and
//! drops each line once its lifetime has run out.

use crate::foundation::math::{Color, Vec2};

/// Line sink used by colliders to emit their outlines
pub trait DebugDraw {
    /// Draw a line segment for the current frame
    fn draw_line(&mut self, start: Vec2, end: Vec2, color: Color);
}

/// A recorded line segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugLine {
    /// Start point
    pub start: Vec2,
    /// End point
    pub end: Vec2,
    /// RGBA color
    pub color: Color,
    /// Remaining lifetime in seconds
    pub duration: f32,
}

impl DebugLine {
    /// Decrease duration by `delta_time`, returns true if expired
    pub fn tick(&mut self, delta_time: f32) -> bool {
        self.duration -= delta_time;
        self.duration <= 0.0
    }
}

/// Recorder for debug lines
///
/// Lines submitted through the [`DebugDraw`] impl last a single frame; use
/// [`DebugDrawSystem::add_line`] to keep one around longer.
#[derive(Debug)]
pub struct DebugDrawSystem {
    lines: Vec<DebugLine>,

    /// Master enable/disable flag
    pub enabled: bool,
}

impl DebugDrawSystem {
    /// Create an empty, enabled recorder
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            enabled: true,
        }
    }

    /// Record a line that lives for `duration` seconds
    pub fn add_line(&mut self, start: Vec2, end: Vec2, color: Color, duration: f32) {
        if !self.enabled {
            return;
        }

        self.lines.push(DebugLine { start, end, color, duration });
    }

    /// Advance lifetimes and drop expired lines
    pub fn update(&mut self, delta_time: f32) {
        if !self.enabled {
            return;
        }

        self.lines.retain_mut(|line| !line.tick(delta_time));
    }

    /// Recorded lines, in submission order
    pub fn lines(&self) -> &[DebugLine] {
        if !self.enabled {
            return &[];
        }
        &self.lines
    }

    /// Number of recorded lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Drop every recorded line
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Default for DebugDrawSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugDraw for DebugDrawSystem {
    fn draw_line(&mut self, start: Vec2, end: Vec2, color: Color) {
        self.add_line(start, end, color, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Color {
        Color::new(1.0, 1.0, 1.0, 1.0)
    }

    #[test]
    fn test_line_expiration() {
        let mut system = DebugDrawSystem::new();
        system.add_line(Vec2::zeros(), Vec2::new(1.0, 0.0), white(), 1.0);
        assert_eq!(system.line_count(), 1);

        system.update(0.5);
        assert_eq!(system.line_count(), 1);

        // 1.1 seconds in total
        system.update(0.6);
        assert_eq!(system.line_count(), 0);
    }

    #[test]
    fn test_trait_lines_last_one_frame() {
        let mut system = DebugDrawSystem::new();
        let color = Color::new(0.0, 1.0, 0.0, 1.0);
        DebugDraw::draw_line(&mut system, Vec2::zeros(), Vec2::new(1.0, 0.0), color);

        assert_eq!(system.lines()[0].color, color);
        system.update(1.0 / 60.0);
        assert!(system.lines().is_empty());
    }

    #[test]
    fn test_lines_keep_submission_order() {
        let mut system = DebugDrawSystem::new();
        system.add_line(Vec2::zeros(), Vec2::new(1.0, 0.0), white(), 1.0);
        system.add_line(Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), white(), 1.0);

        let ends: Vec<Vec2> = system.lines().iter().map(|line| line.end).collect();
        assert_eq!(ends, vec![Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)]);

        system.clear();
        assert_eq!(system.line_count(), 0);
    }

    #[test]
    fn test_disabled_system_records_nothing() {
        let mut system = DebugDrawSystem::new();
        system.enabled = false;
        system.add_line(Vec2::zeros(), Vec2::new(1.0, 1.0), white(), 1.0);
        assert_eq!(system.line_count(), 0);
        assert!(system.lines().is_empty());
    }
}
