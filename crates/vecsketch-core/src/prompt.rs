//! Modal collaborators the canvas asks for input while moving or recoloring.

use crate::shapes::ShapeColor;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Bounds applied to each axis of a move offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetRange {
    pub min: f64,
    pub max: f64,
}

impl OffsetRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range `-limit..=limit`.
    pub const fn symmetric(limit: f64) -> Self {
        Self::new(-limit, limit)
    }

    /// Clamp each axis independently.
    pub fn clamp(&self, offset: Vec2) -> Vec2 {
        Vec2::new(
            offset.x.clamp(self.min, self.max),
            offset.y.clamp(self.min, self.max),
        )
    }
}

impl Default for OffsetRange {
    fn default() -> Self {
        Self::symmetric(100.0)
    }
}

/// Source of answers for the canvas prompts.
///
/// Each call blocks the interaction until the user confirms or cancels.
/// `None` means cancelled.
pub trait Prompter {
    /// Ask for a move offset within `range`.
    fn request_offset(&mut self, range: OffsetRange) -> Option<Vec2>;

    /// Ask for a new color, starting from `current`.
    fn request_color(&mut self, current: ShapeColor) -> Option<ShapeColor>;
}
