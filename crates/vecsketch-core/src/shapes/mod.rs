//! Shape definitions for the canvas.

mod ellipse;
mod polyline;
mod segment;

pub use ellipse::Ellipse;
pub use polyline::Polyline;
pub use segment::Segment;

use kurbo::{BezPath, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ShapeColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }
}

impl Default for ShapeColor {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for ShapeColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<ShapeColor> for Color {
    fn from(color: ShapeColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// The three kinds of shape the canvas stores.
///
/// The declaration order is the hit-test search order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShapeKind {
    Segment,
    Polyline,
    Ellipse,
}

impl ShapeKind {
    /// Display name shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Segment => "Line",
            ShapeKind::Polyline => "Polyline",
            ShapeKind::Ellipse => "Ellipse",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Derived measurement of a shape, computed once when the shape is committed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Metric {
    /// Length of a segment or polyline.
    Length(f64),
    /// Area of an ellipse.
    Area(f64),
}

impl Metric {
    pub fn value(self) -> f64 {
        match self {
            Metric::Length(v) | Metric::Area(v) => v,
        }
    }
}

/// Rounded to two decimals, trailing zeros dropped.
impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Metric::Length(_) => "Length",
            Metric::Area(_) => "Area",
        };
        let rounded = format!("{:.2}", self.value());
        let trimmed = if rounded.contains('.') {
            rounded.trim_end_matches('0').trim_end_matches('.')
        } else {
            &rounded
        };
        let trimmed = if trimmed == "-0" { "0" } else { trimmed };
        write!(f, "{label}: {trimmed}")
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Which collection this shape belongs to.
    fn kind(&self) -> ShapeKind;

    /// Get the bounding box.
    fn bounds(&self) -> Rect;

    /// Check if a point hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Length or area of the shape.
    fn metric(&self) -> Metric;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;

    /// Move the shape rigidly by `offset`.
    fn translate(&mut self, offset: Vec2);
}

/// Enum wrapper over every shape type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Segment(Segment),
    Polyline(Polyline),
    Ellipse(Ellipse),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Segment(s) => s.kind(),
            Shape::Polyline(s) => s.kind(),
            Shape::Ellipse(s) => s.kind(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Segment(s) => s.bounds(),
            Shape::Polyline(s) => s.bounds(),
            Shape::Ellipse(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::Segment(s) => s.hit_test(point, tolerance),
            Shape::Polyline(s) => s.hit_test(point, tolerance),
            Shape::Ellipse(s) => s.hit_test(point, tolerance),
        }
    }

    pub fn metric(&self) -> Metric {
        match self {
            Shape::Segment(s) => s.metric(),
            Shape::Polyline(s) => s.metric(),
            Shape::Ellipse(s) => s.metric(),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Segment(s) => s.to_path(),
            Shape::Polyline(s) => s.to_path(),
            Shape::Ellipse(s) => s.to_path(),
        }
    }

    pub fn translate(&mut self, offset: Vec2) {
        match self {
            Shape::Segment(s) => s.translate(offset),
            Shape::Polyline(s) => s.translate(offset),
            Shape::Ellipse(s) => s.translate(offset),
        }
    }
}

impl From<Segment> for Shape {
    fn from(segment: Segment) -> Self {
        Shape::Segment(segment)
    }
}

impl From<Polyline> for Shape {
    fn from(polyline: Polyline) -> Self {
        Shape::Polyline(polyline)
    }
}

impl From<Ellipse> for Shape {
    fn from(ellipse: Ellipse) -> Self {
        Shape::Ellipse(ellipse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_roundtrip_through_peniko() {
        let color = ShapeColor::new(12, 200, 34, 255);
        let peniko_color: Color = color.into();
        assert_eq!(ShapeColor::from(peniko_color), color);
    }

    #[test]
    fn test_kind_order_is_search_order() {
        assert!(ShapeKind::Segment < ShapeKind::Polyline);
        assert!(ShapeKind::Polyline < ShapeKind::Ellipse);
        assert_eq!(ShapeKind::Segment.label(), "Line");
    }

    #[test]
    fn test_metric_display() {
        assert_eq!(Metric::Length(10.0).to_string(), "Length: 10");
        assert_eq!(Metric::Area(2.5).to_string(), "Area: 2.5");
        assert_eq!(Metric::Area(50.0 * std::f64::consts::PI).to_string(), "Area: 157.08");
        assert_eq!(Metric::Length(14.142135623730951).to_string(), "Length: 14.14");
        assert_eq!(Metric::Length(0.0).to_string(), "Length: 0");
        assert_eq!(Metric::Length(9.999).to_string(), "Length: 10");
    }

    #[test]
    fn test_shape_translate_roundtrip() {
        let mut shapes = vec![
            Shape::from(Segment::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0))),
            Shape::from(Polyline::from_points(vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
            ])),
            Shape::from(Ellipse::from_corners(Point::new(20.0, 10.0), Point::new(0.0, 0.0))),
        ];
        let original = shapes.clone();
        let offset = Vec2::new(37.5, -12.25);
        for shape in &mut shapes {
            shape.translate(offset);
            shape.translate(-offset);
        }
        assert_eq!(shapes, original);
    }
}
