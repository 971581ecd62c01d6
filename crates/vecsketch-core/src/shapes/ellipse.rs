//! Ellipse shape.

use super::{Metric, ShapeKind, ShapeTrait};
use crate::geometry::{ellipse_area, rect_contains};
use kurbo::{BezPath, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned ellipse described by its bounding rectangle.
///
/// The rectangle is stored as the corner where the drag started plus a signed
/// extent, so dragging up or left gives negative width or height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    /// Corner the rectangle was drawn from.
    pub anchor: Point,
    /// Signed width and height.
    pub extent: Vec2,
}

impl Ellipse {
    /// Create an ellipse from its anchor corner and signed extent.
    pub fn new(anchor: Point, extent: Vec2) -> Self {
        Self { anchor, extent }
    }

    /// Create an ellipse from the rectangle spanned by two corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a, b - a)
    }

    /// The corner opposite the anchor.
    pub fn far_corner(&self) -> Point {
        self.anchor + self.extent
    }

    /// Bounding rectangle as drawn (may have negative width or height).
    pub fn rect(&self) -> Rect {
        let far = self.far_corner();
        Rect::new(self.anchor.x, self.anchor.y, far.x, far.y)
    }

    /// Area of the ellipse.
    pub fn area(&self) -> f64 {
        ellipse_area(self.anchor, self.far_corner())
    }

    /// Get as a kurbo Ellipse.
    pub fn as_kurbo(&self) -> KurboEllipse {
        KurboEllipse::from_rect(self.bounds())
    }
}

impl ShapeTrait for Ellipse {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Ellipse
    }

    fn bounds(&self) -> Rect {
        self.rect().abs()
    }

    /// Tests the bounding rectangle, not the ellipse outline.
    fn hit_test(&self, point: Point, _tolerance: f64) -> bool {
        rect_contains(self.rect(), point)
    }

    fn metric(&self) -> Metric {
        Metric::Area(self.area())
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn translate(&mut self, offset: Vec2) {
        self.anchor += offset;
    }
}
