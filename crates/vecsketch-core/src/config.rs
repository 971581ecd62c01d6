//! Canvas configuration.

use crate::error::{CanvasError, CanvasResult};
use crate::input::MouseButton;
use crate::prompt::OffsetRange;
use crate::shapes::ShapeColor;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default pixel distance counted as touching a segment.
pub const DEFAULT_TOLERANCE: f64 = 5.0;
/// Default stroke width for every shape.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Tunable canvas behavior.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Hit-test tolerance in pixels.
    pub tolerance: f64,
    /// Stroke width used when rendering shapes.
    pub stroke_width: f64,
    /// Bounds for each axis of a move offset.
    pub offset_range: OffsetRange,
    /// Button that triggers select, move and recolor.
    pub probe_button: MouseButton,
    /// Canvas size when no background image sets it.
    pub size: Size,
    /// Whether clearing also drops the background image.
    pub clear_background: bool,
    /// Initial drawing color for every shape kind.
    pub drawing_color: ShapeColor,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            stroke_width: DEFAULT_STROKE_WIDTH,
            offset_range: OffsetRange::default(),
            probe_button: MouseButton::Right,
            size: Size::new(800.0, 600.0),
            clear_background: true,
            drawing_color: ShapeColor::black(),
        }
    }
}

impl CanvasConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CanvasError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> CanvasResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CanvasError::Config(e.to_string()))
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> CanvasResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CanvasError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> CanvasResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(CanvasError::Config(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return Err(CanvasError::Config(format!(
                "stroke_width must be positive, got {}",
                self.stroke_width
            )));
        }
        if self.offset_range.min > self.offset_range.max {
            return Err(CanvasError::Config(format!(
                "offset_range is empty: {} > {}",
                self.offset_range.min, self.offset_range.max
            )));
        }
        if self.size.width < 1.0 || self.size.height < 1.0 {
            return Err(CanvasError::Config(format!(
                "size must be at least 1x1, got {}x{}",
                self.size.width, self.size.height
            )));
        }
        Ok(())
    }
}
