//! Renderer trait abstraction.

use image::{ImageError, RgbaImage};
use kurbo::Size;
use peniko::Color;
use std::path::PathBuf;
use thiserror::Error;
use vecsketch_core::{Canvas, CanvasError};

/// Renderer and image I/O errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("No file path given")]
    EmptyPath,
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
    #[error("Failed to encode image: {0}")]
    Encode(#[from] ImageError),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid frame size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// A rendered frame as straight-alpha RGBA8, row major.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> RenderResult<Self> {
        if width == 0 || height == 0 || rgba.len() != width as usize * height as usize * 4 {
            return Err(RenderError::InvalidSize { width, height });
        }
        Ok(Self { width, height, rgba })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.rgba
    }

    /// RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.rgba.get(i..i + 4).and_then(|p| p.try_into().ok())
    }

    pub fn to_image(&self) -> RgbaImage {
        // Dimensions were checked in `new`.
        RgbaImage::from_raw(self.width, self.height, self.rgba.clone())
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Context for a single render.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Output size in pixels.
    pub size: Size,
    /// Color behind the background image and the shapes.
    pub background_color: Color,
    /// Stroke width for every shape.
    pub stroke_width: f64,
    /// Whether to draw the shape being drawn.
    pub show_preview: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a context sized to the canvas.
    pub fn new(canvas: &'a Canvas) -> Self {
        Self {
            canvas,
            size: canvas.size(),
            background_color: Color::from_rgba8(255, 255, 255, 255),
            stroke_width: canvas.config().stroke_width,
            show_preview: true,
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Leave out the in-progress shape, e.g. when saving.
    pub fn without_preview(mut self) -> Self {
        self.show_preview = false;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Render one frame of the canvas.
    ///
    /// Layers, bottom to top: background color, background image, segments,
    /// polylines, ellipses, then the in-progress shape.
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<Frame>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rejects_bad_buffer() {
        assert!(matches!(
            Frame::new(2, 2, vec![0; 8]),
            Err(RenderError::InvalidSize { width: 2, height: 2 })
        ));
        assert!(Frame::new(0, 0, Vec::new()).is_err());
    }

    #[test]
    fn test_frame_pixel_lookup() {
        let mut rgba = vec![0; 2 * 2 * 4];
        rgba[12..16].copy_from_slice(&[1, 2, 3, 4]);
        let frame = Frame::new(2, 2, rgba).unwrap();
        assert_eq!(frame.pixel(1, 1), Some([1, 2, 3, 4]));
        assert_eq!(frame.pixel(2, 0), None);
        assert_eq!(frame.to_image().get_pixel(1, 1).0, [1, 2, 3, 4]);
    }

    #[test]
    fn test_context_defaults_follow_canvas() {
        let canvas = Canvas::new();
        let ctx = RenderContext::new(&canvas);
        assert_eq!(ctx.size, canvas.size());
        assert_eq!(ctx.stroke_width, canvas.config().stroke_width);
        assert!(ctx.show_preview);
        assert!(!ctx.without_preview().show_preview);
    }
}
