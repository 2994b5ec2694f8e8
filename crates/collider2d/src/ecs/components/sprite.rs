//! Sprite component
//!
//! Only the parts a collider needs: the dimensions of the visible frame.
//! A plain sprite is a sheet with a single cell.

/// Visible-size query used to auto-size colliders
pub trait SpriteQuery {
    /// Width of the currently visible frame, in local units
    fn visible_width(&self) -> f32;

    /// Height of the currently visible frame, in local units
    fn visible_height(&self) -> f32;
}

/// Sprite or sprite-sheet component
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    /// Texture name (informational)
    pub texture: String,
    /// Full texture width in local units
    pub width: f32,
    /// Full texture height in local units
    pub height: f32,
    /// Number of columns in the sheet (1 for a plain sprite)
    pub columns: u32,
    /// Number of rows in the sheet (1 for a plain sprite)
    pub rows: u32,
}

impl SpriteComponent {
    /// Create a single-frame sprite
    pub fn new(texture: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            texture: texture.into(),
            width,
            height,
            columns: 1,
            rows: 1,
        }
    }

    /// Create a sprite sheet split into `columns` x `rows` equal frames
    pub fn sheet(texture: impl Into<String>, width: f32, height: f32, columns: u32, rows: u32) -> Self {
        Self {
            texture: texture.into(),
            width,
            height,
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }
}

impl SpriteQuery for SpriteComponent {
    #[allow(clippy::cast_precision_loss)]
    fn visible_width(&self) -> f32 {
        self.width / self.columns.max(1) as f32
    }

    #[allow(clippy::cast_precision_loss)]
    fn visible_height(&self) -> f32 {
        self.height / self.rows.max(1) as f32
    }
}
