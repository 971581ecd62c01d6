//! CPU raster renderer built on tiny-skia.

use crate::renderer::{Frame, RenderContext, RenderError, RenderResult, Renderer};
use kurbo::{BezPath, PathEl};
use tiny_skia::{
    ColorU8, IntSize, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};
use vecsketch_core::{BackgroundImage, ShapeColor, ShapeTrait};

/// Renders a canvas into an RGBA frame on the CPU.
#[derive(Debug, Clone)]
pub struct RasterRenderer {
    anti_alias: bool,
}

impl Default for RasterRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterRenderer {
    pub fn new() -> Self {
        Self { anti_alias: true }
    }

    fn paint(&self, color: ShapeColor) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = self.anti_alias;
        paint
    }

    fn stroke_shape(&self, pixmap: &mut Pixmap, shape: &dyn ShapeTrait, color: ShapeColor, stroke: &Stroke) {
        let Some(path) = to_skia_path(&shape.to_path()) else {
            // Single-point polylines and other degenerate paths draw nothing.
            log::trace!("Skipping degenerate {} path", shape.kind());
            return;
        };
        pixmap.stroke_path(&path, &self.paint(color), stroke, Transform::identity(), None);
    }
}

impl Renderer for RasterRenderer {
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<Frame> {
        let width = ctx.size.width.ceil().max(0.0) as u32;
        let height = ctx.size.height.ceil().max(0.0) as u32;
        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height })?;

        let background = self.background_color(ctx).to_rgba8();
        pixmap.fill(tiny_skia::Color::from_rgba8(
            background.r,
            background.g,
            background.b,
            background.a,
        ));

        let canvas = ctx.canvas;
        if let Some(image) = canvas.background() {
            let layer = background_pixmap(image)?;
            pixmap.draw_pixmap(0, 0, layer.as_ref(), &PixmapPaint::default(), Transform::identity(), None);
        }

        let stroke = Stroke {
            width: ctx.stroke_width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };

        let store = canvas.store();
        for entry in store.segments() {
            self.stroke_shape(&mut pixmap, &entry.shape, entry.color, &stroke);
        }
        for entry in store.polylines() {
            self.stroke_shape(&mut pixmap, &entry.shape, entry.color, &stroke);
        }
        for entry in store.ellipses() {
            self.stroke_shape(&mut pixmap, &entry.shape, entry.color, &stroke);
        }

        if ctx.show_preview {
            if let Some(preview) = canvas.preview() {
                if let Some(path) = to_skia_path(&preview.shape.to_path()) {
                    pixmap.stroke_path(&path, &self.paint(preview.color), &stroke, Transform::identity(), None);
                }
            }
        }

        let rgba = pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let c = px.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        Frame::new(width, height, rgba)
    }
}

/// Premultiply a straight-alpha background into its own pixmap.
fn background_pixmap(image: &BackgroundImage) -> RenderResult<Pixmap> {
    let (width, height) = (image.width(), image.height());
    let size = IntSize::from_wh(width, height).ok_or(RenderError::InvalidSize { width, height })?;
    let mut pixmap = Pixmap::new(size.width(), size.height()).ok_or(RenderError::InvalidSize { width, height })?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels().chunks_exact(4)) {
        *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }
    Ok(pixmap)
}

/// Convert a kurbo path into a tiny-skia path.
fn to_skia_path(path: &BezPath) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}
