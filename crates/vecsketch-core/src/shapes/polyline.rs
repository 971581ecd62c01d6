//! Polyline shape.

use super::{Metric, ShapeKind, ShapeTrait};
use crate::geometry::{point_in_polygon, polyline_length};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// An ordered chain of points drawn as connected segments.
///
/// Points keep drawing order. Hit-testing treats the chain as a closed
/// polygon, so a click must land inside the enclosed area.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    /// Points in drawing order.
    pub points: Vec<Point>,
}

impl Polyline {
    /// Create a new empty polyline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Add a point to the end of the chain.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the polyline has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total length of all segments.
    pub fn length(&self) -> f64 {
        polyline_length(&self.points)
    }
}

impl ShapeTrait for Polyline {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Polyline
    }

    fn bounds(&self) -> Rect {
        let mut points = self.points.iter();
        let Some(&first) = points.next() else {
            return Rect::ZERO;
        };
        points.fold(Rect::from_points(first, first), |rect, &p| rect.union_pt(p))
    }

    fn hit_test(&self, point: Point, _tolerance: f64) -> bool {
        point_in_polygon(point, &self.points)
    }

    fn metric(&self) -> Metric {
        Metric::Length(self.length())
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.points.iter();
        if let Some(&first) = points.next() {
            path.move_to(first);
            for &point in points {
                path.line_to(point);
            }
        }
        path
    }

    fn translate(&mut self, offset: Vec2) {
        for point in &mut self.points {
            *point += offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner() -> Polyline {
        Polyline::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ])
    }

    #[test]
    fn test_polyline_creation() {
        let mut polyline = Polyline::new();
        assert!(polyline.is_empty());
        polyline.add_point(Point::new(1.0, 1.0));
        assert_eq!(polyline.len(), 1);
        assert_eq!(polyline.length(), 0.0);
    }

    #[test]
    fn test_length() {
        assert_eq!(corner().metric(), Metric::Length(20.0));
    }

    #[test]
    fn test_bounds() {
        let bounds = corner().bounds();
        assert_eq!(bounds, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(Polyline::new().bounds(), Rect::ZERO);
    }

    #[test]
    fn test_hit_test_inside_enclosed_area() {
        let polyline = corner();
        assert!(polyline.hit_test(Point::new(8.0, 2.0), 0.0));
        assert!(!polyline.hit_test(Point::new(2.0, 8.0), 0.0));
    }

    #[test]
    fn test_translate_moves_every_point() {
        let mut polyline = corner();
        polyline.translate(Vec2::new(5.0, 5.0));
        assert_eq!(
            polyline.points,
            vec![Point::new(5.0, 5.0), Point::new(15.0, 5.0), Point::new(15.0, 15.0)]
        );
        assert!((polyline.length() - 20.0).abs() < f64::EPSILON);
    }
}
