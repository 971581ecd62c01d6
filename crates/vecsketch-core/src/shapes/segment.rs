//! Straight segment shape.

use super::{Metric, ShapeKind, ShapeTrait};
use crate::geometry::{is_point_near_segment, segment_length};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Segment {
    /// Create a new segment.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Get the length of the segment.
    pub fn length(&self) -> f64 {
        segment_length(self.start, self.end)
    }
}

impl ShapeTrait for Segment {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Segment
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        is_point_near_segment(point, self.start, self.end, tolerance)
    }

    fn metric(&self) -> Metric {
        Metric::Length(self.length())
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path
    }

    fn translate(&mut self, offset: Vec2) {
        self.start += offset;
        self.end += offset;
    }
}
