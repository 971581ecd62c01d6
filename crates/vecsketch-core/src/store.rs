//! Committed shapes, grouped by kind.

use crate::error::{CanvasError, CanvasResult};
use crate::selection::Selection;
use crate::shapes::{Ellipse, Metric, Polyline, Segment, Shape, ShapeColor, ShapeKind, ShapeTrait};
use kurbo::{Point, Vec2};

/// A committed shape together with its color and the metric computed when it
/// was committed.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    pub shape: T,
    pub color: ShapeColor,
    pub metric: Metric,
}

impl<T: ShapeTrait> Entry<T> {
    fn new(shape: T, color: ShapeColor) -> Self {
        let metric = shape.metric();
        Self {
            shape,
            color,
            metric,
        }
    }
}

/// Color given to the next shape of each kind.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct DrawingColors {
    segment: ShapeColor,
    polyline: ShapeColor,
    ellipse: ShapeColor,
}

impl DrawingColors {
    fn uniform(color: ShapeColor) -> Self {
        Self {
            segment: color,
            polyline: color,
            ellipse: color,
        }
    }

    fn get(&self, kind: ShapeKind) -> ShapeColor {
        match kind {
            ShapeKind::Segment => self.segment,
            ShapeKind::Polyline => self.polyline,
            ShapeKind::Ellipse => self.ellipse,
        }
    }

    fn get_mut(&mut self, kind: ShapeKind) -> &mut ShapeColor {
        match kind {
            ShapeKind::Segment => &mut self.segment,
            ShapeKind::Polyline => &mut self.polyline,
            ShapeKind::Ellipse => &mut self.ellipse,
        }
    }
}

/// Storage for every committed shape.
///
/// Each kind lives in its own ordered collection. A [`Selection`] index only
/// has meaning inside the collection named by its variant.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    segments: Vec<Entry<Segment>>,
    polylines: Vec<Entry<Polyline>>,
    ellipses: Vec<Entry<Ellipse>>,
    drawing_colors: DrawingColors,
}

impl ShapeStore {
    /// Create an empty store whose drawing colors are all black.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given drawing color for every kind.
    pub fn with_drawing_color(color: ShapeColor) -> Self {
        Self {
            drawing_colors: DrawingColors::uniform(color),
            ..Self::default()
        }
    }

    /// Color the next shape of `kind` will be committed with.
    pub fn drawing_color(&self, kind: ShapeKind) -> ShapeColor {
        self.drawing_colors.get(kind)
    }

    /// Change the color used for future shapes of `kind`.
    pub fn set_drawing_color(&mut self, kind: ShapeKind, color: ShapeColor) {
        *self.drawing_colors.get_mut(kind) = color;
    }

    /// Commit a segment using the current segment drawing color.
    pub fn push_segment(&mut self, segment: Segment) -> Selection {
        let entry = Entry::new(segment, self.drawing_colors.segment);
        log::debug!("Committed segment #{} ({})", self.segments.len(), entry.metric);
        self.segments.push(entry);
        Selection::Segment(self.segments.len() - 1)
    }

    /// Commit a polyline using the current polyline drawing color.
    pub fn push_polyline(&mut self, polyline: Polyline) -> Selection {
        let entry = Entry::new(polyline, self.drawing_colors.polyline);
        log::debug!(
            "Committed polyline #{} with {} points ({})",
            self.polylines.len(),
            entry.shape.len(),
            entry.metric
        );
        self.polylines.push(entry);
        Selection::Polyline(self.polylines.len() - 1)
    }

    /// Commit an ellipse using the current ellipse drawing color.
    pub fn push_ellipse(&mut self, ellipse: Ellipse) -> Selection {
        let entry = Entry::new(ellipse, self.drawing_colors.ellipse);
        log::debug!("Committed ellipse #{} ({})", self.ellipses.len(), entry.metric);
        self.ellipses.push(entry);
        Selection::Ellipse(self.ellipses.len() - 1)
    }

    /// Commit any shape into its collection.
    pub fn push(&mut self, shape: Shape) -> Selection {
        match shape {
            Shape::Segment(s) => self.push_segment(s),
            Shape::Polyline(s) => self.push_polyline(s),
            Shape::Ellipse(s) => self.push_ellipse(s),
        }
    }

    /// Remove every shape. Drawing colors are kept.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.polylines.clear();
        self.ellipses.clear();
    }

    pub fn segments(&self) -> &[Entry<Segment>] {
        &self.segments
    }

    pub fn polylines(&self) -> &[Entry<Polyline>] {
        &self.polylines
    }

    pub fn ellipses(&self) -> &[Entry<Ellipse>] {
        &self.ellipses
    }

    /// Number of shapes of one kind.
    pub fn count(&self, kind: ShapeKind) -> usize {
        match kind {
            ShapeKind::Segment => self.segments.len(),
            ShapeKind::Polyline => self.polylines.len(),
            ShapeKind::Ellipse => self.ellipses.len(),
        }
    }

    /// Total number of shapes.
    pub fn len(&self) -> usize {
        self.segments.len() + self.polylines.len() + self.ellipses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether `selection` refers to an existing shape.
    pub fn contains(&self, selection: Selection) -> bool {
        match selection {
            Selection::None => false,
            Selection::Segment(i) => i < self.segments.len(),
            Selection::Polyline(i) => i < self.polylines.len(),
            Selection::Ellipse(i) => i < self.ellipses.len(),
        }
    }

    /// Find the shape under `point`.
    ///
    /// Segments are searched first, then polylines, then ellipses; inside a
    /// collection the oldest shape wins.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> Selection {
        if let Some(i) = self.segments.iter().position(|e| e.shape.hit_test(point, tolerance)) {
            return Selection::Segment(i);
        }
        if let Some(i) = self.polylines.iter().position(|e| e.shape.hit_test(point, tolerance)) {
            return Selection::Polyline(i);
        }
        if let Some(i) = self.ellipses.iter().position(|e| e.shape.hit_test(point, tolerance)) {
            return Selection::Ellipse(i);
        }
        Selection::None
    }

    /// Get a copy of the selected shape.
    pub fn shape(&self, selection: Selection) -> CanvasResult<Shape> {
        let invalid = CanvasError::InvalidSelection(selection);
        match selection {
            Selection::None => Err(invalid),
            Selection::Segment(i) => self.segments.get(i).map(|e| Shape::Segment(e.shape)).ok_or(invalid),
            Selection::Polyline(i) => self
                .polylines
                .get(i)
                .map(|e| Shape::Polyline(e.shape.clone()))
                .ok_or(invalid),
            Selection::Ellipse(i) => self.ellipses.get(i).map(|e| Shape::Ellipse(e.shape)).ok_or(invalid),
        }
    }

    pub fn color(&self, selection: Selection) -> CanvasResult<ShapeColor> {
        self.parts(selection).map(|(_, color, _)| color)
    }

    pub fn metric(&self, selection: Selection) -> CanvasResult<Metric> {
        self.parts(selection).map(|(_, _, metric)| metric)
    }

    /// Recolor one shape.
    pub fn set_color(&mut self, selection: Selection, color: ShapeColor) -> CanvasResult<()> {
        let (_, slot) = self.parts_mut(selection)?;
        *slot = color;
        Ok(())
    }

    /// Move one shape rigidly. The stored metric is left as is.
    pub fn translate(&mut self, selection: Selection, offset: Vec2) -> CanvasResult<()> {
        let (shape, _) = self.parts_mut(selection)?;
        shape.translate(offset);
        Ok(())
    }

    fn parts(&self, selection: Selection) -> CanvasResult<(&dyn ShapeTrait, ShapeColor, Metric)> {
        let invalid = CanvasError::InvalidSelection(selection);
        match selection {
            Selection::None => Err(invalid),
            Selection::Segment(i) => self
                .segments
                .get(i)
                .map(|e| (&e.shape as &dyn ShapeTrait, e.color, e.metric))
                .ok_or(invalid),
            Selection::Polyline(i) => self
                .polylines
                .get(i)
                .map(|e| (&e.shape as &dyn ShapeTrait, e.color, e.metric))
                .ok_or(invalid),
            Selection::Ellipse(i) => self
                .ellipses
                .get(i)
                .map(|e| (&e.shape as &dyn ShapeTrait, e.color, e.metric))
                .ok_or(invalid),
        }
    }

    fn parts_mut(&mut self, selection: Selection) -> CanvasResult<(&mut dyn ShapeTrait, &mut ShapeColor)> {
        let invalid = CanvasError::InvalidSelection(selection);
        match selection {
            Selection::None => Err(invalid),
            Selection::Segment(i) => self
                .segments
                .get_mut(i)
                .map(|e| (&mut e.shape as &mut dyn ShapeTrait, &mut e.color))
                .ok_or(invalid),
            Selection::Polyline(i) => self
                .polylines
                .get_mut(i)
                .map(|e| (&mut e.shape as &mut dyn ShapeTrait, &mut e.color))
                .ok_or(invalid),
            Selection::Ellipse(i) => self
                .ellipses
                .get_mut(i)
                .map(|e| (&mut e.shape as &mut dyn ShapeTrait, &mut e.color))
                .ok_or(invalid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Polyline {
        Polyline::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ])
    }

    #[test]
    fn test_metrics_computed_on_push() {
        let mut store = ShapeStore::new();
        let s = store.push_segment(Segment::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0)));
        let p = store.push_polyline(triangle());
        let e = store.push_ellipse(Ellipse::from_corners(Point::new(0.0, 0.0), Point::new(20.0, 10.0)));

        assert_eq!(store.metric(s), Ok(Metric::Length(5.0)));
        assert_eq!(store.metric(p), Ok(Metric::Length(20.0)));
        let Ok(Metric::Area(area)) = store.metric(e) else {
            panic!("ellipse metric should be an area");
        };
        assert!((area - 157.08).abs() < 0.01);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_indices_are_per_kind() {
        let mut store = ShapeStore::new();
        assert_eq!(store.push_segment(Segment::new(Point::ZERO, Point::new(1.0, 1.0))), Selection::Segment(0));
        assert_eq!(store.push_ellipse(Ellipse::from_corners(Point::ZERO, Point::new(4.0, 4.0))), Selection::Ellipse(0));
        assert_eq!(store.push_segment(Segment::new(Point::ZERO, Point::new(2.0, 2.0))), Selection::Segment(1));
        assert_eq!(store.count(ShapeKind::Segment), 2);
        assert_eq!(store.count(ShapeKind::Polyline), 0);
        assert_eq!(store.count(ShapeKind::Ellipse), 1);
    }

    #[test]
    fn test_drawing_color_applies_to_next_shape() {
        let mut store = ShapeStore::new();
        assert_eq!(store.drawing_color(ShapeKind::Segment), ShapeColor::black());

        let red = ShapeColor::rgb(255, 0, 0);
        store.set_drawing_color(ShapeKind::Segment, red);
        let s = store.push_segment(Segment::new(Point::ZERO, Point::new(1.0, 0.0)));
        let e = store.push_ellipse(Ellipse::from_corners(Point::ZERO, Point::new(4.0, 4.0)));

        assert_eq!(store.color(s), Ok(red));
        assert_eq!(store.color(e), Ok(ShapeColor::black()));
    }

    #[test]
    fn test_hit_test_order_segment_before_polyline() {
        let mut store = ShapeStore::new();
        // The polyline is added first, but segments are searched first.
        store.push_polyline(triangle());
        store.push_segment(Segment::new(Point::new(0.0, 2.0), Point::new(10.0, 2.0)));
        assert_eq!(store.hit_test(Point::new(8.0, 2.0), 5.0), Selection::Segment(0));
    }

    #[test]
    fn test_hit_test_polyline_before_ellipse() {
        let mut store = ShapeStore::new();
        store.push_ellipse(Ellipse::from_corners(Point::new(-5.0, -5.0), Point::new(20.0, 20.0)));
        store.push_polyline(triangle());
        assert_eq!(store.hit_test(Point::new(8.0, 2.0), 5.0), Selection::Polyline(0));
        assert_eq!(store.hit_test(Point::new(2.0, 8.0), 5.0), Selection::Ellipse(0));
        assert_eq!(store.hit_test(Point::new(100.0, 100.0), 5.0), Selection::None);
    }

    #[test]
    fn test_translate_roundtrip_keeps_metric() {
        let mut store = ShapeStore::new();
        let sel = store.push_polyline(triangle());
        let before = store.shape(sel);

        store.translate(sel, Vec2::new(7.0, -3.0)).unwrap();
        assert_ne!(store.shape(sel), before);
        assert_eq!(store.metric(sel), Ok(Metric::Length(20.0)));

        store.translate(sel, Vec2::new(-7.0, 3.0)).unwrap();
        assert_eq!(store.shape(sel), before);
    }

    #[test]
    fn test_set_color() {
        let mut store = ShapeStore::new();
        let sel = store.push_ellipse(Ellipse::from_corners(Point::ZERO, Point::new(4.0, 4.0)));
        let blue = ShapeColor::rgb(0, 0, 255);
        store.set_color(sel, blue).unwrap();
        assert_eq!(store.color(sel), Ok(blue));
        // The next ellipse still uses the drawing color.
        let next = store.push_ellipse(Ellipse::from_corners(Point::ZERO, Point::new(4.0, 4.0)));
        assert_eq!(store.color(next), Ok(ShapeColor::black()));
    }

    #[test]
    fn test_invalid_selection() {
        let mut store = ShapeStore::new();
        store.push_segment(Segment::new(Point::ZERO, Point::new(1.0, 0.0)));

        assert!(!store.contains(Selection::None));
        assert!(!store.contains(Selection::Segment(1)));
        assert!(!store.contains(Selection::Polyline(0)));
        assert_eq!(
            store.set_color(Selection::Polyline(0), ShapeColor::white()),
            Err(CanvasError::InvalidSelection(Selection::Polyline(0)))
        );
        assert_eq!(
            store.translate(Selection::None, Vec2::new(1.0, 1.0)),
            Err(CanvasError::InvalidSelection(Selection::None))
        );
    }

    #[test]
    fn test_clear_keeps_drawing_colors() {
        let mut store = ShapeStore::new();
        let green = ShapeColor::rgb(0, 255, 0);
        store.set_drawing_color(ShapeKind::Polyline, green);
        store.push_polyline(triangle());
        store.push_segment(Segment::new(Point::ZERO, Point::new(1.0, 0.0)));

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.drawing_color(ShapeKind::Polyline), green);
    }
}
