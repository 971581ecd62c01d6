//! Length, area and hit-test primitives shared by all shapes.

use kurbo::{Point, Rect, Vec2};
use std::f64::consts::PI;

/// Euclidean distance between two points.
pub fn segment_length(p1: Point, p2: Point) -> f64 {
    (p2 - p1).hypot()
}

/// Sum of the lengths of consecutive segments. Zero for fewer than two points.
pub fn polyline_length(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| segment_length(w[0], w[1]))
        .sum()
}

/// Area of the axis-aligned ellipse inscribed in the rectangle spanned by two
/// arbitrary corners.
pub fn ellipse_area(corner_a: Point, corner_b: Point) -> f64 {
    let a = (corner_b.x - corner_a.x).abs() / 2.0;
    let b = (corner_b.y - corner_a.y).abs() / 2.0;
    PI * a * b
}

/// Area of the ellipse inscribed in `rect`. Negative extents are accepted.
pub fn ellipse_area_of_rect(rect: Rect) -> f64 {
    ellipse_area(Point::new(rect.x0, rect.y0), Point::new(rect.x1, rect.y1))
}

/// Distance used to decide whether `point` touches the segment `a`–`b`.
///
/// Returns `0.0` when the point is strictly closer than `tolerance` to either
/// endpoint. Otherwise returns the perpendicular distance to the line through
/// `a` and `b`, but only when the foot of that perpendicular lies inside the
/// segment's bounding box; outside it the result is `f64::INFINITY`. The box
/// gate rejects points that sit on the infinite extension of the line past an
/// endpoint.
pub fn distance_point_to_segment(point: Point, a: Point, b: Point, tolerance: f64) -> f64 {
    if segment_length(a, point) < tolerance || segment_length(b, point) < tolerance {
        return 0.0;
    }

    let d: Vec2 = b - a;
    let len_sq = d.hypot2();
    if len_sq < f64::EPSILON {
        // Degenerate segment, only the endpoint check applies.
        return f64::INFINITY;
    }

    let t = (point - a).dot(d) / len_sq;
    let foot = a + d * t;
    if !in_bounding_box(foot, a, b) {
        return f64::INFINITY;
    }

    (d.y * point.x - d.x * point.y + b.x * a.y - b.y * a.x).abs() / len_sq.sqrt()
}

fn in_bounding_box(p: Point, a: Point, b: Point) -> bool {
    const SLACK: f64 = 1e-9;
    p.x >= a.x.min(b.x) - SLACK
        && p.x <= a.x.max(b.x) + SLACK
        && p.y >= a.y.min(b.y) - SLACK
        && p.y <= a.y.max(b.y) + SLACK
}

/// Check if `point` is within `tolerance` of the segment `a`–`b`.
pub fn is_point_near_segment(point: Point, a: Point, b: Point, tolerance: f64) -> bool {
    distance_point_to_segment(point, a, b, tolerance) <= tolerance
}

/// Even-odd containment test over the closed polygon formed by `polygon`.
///
/// The last point connects back to the first. Fewer than three points never
/// enclose anything.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let cross_x = pj.x + (point.y - pj.y) * (pi.x - pj.x) / (pi.y - pj.y);
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Inclusive containment in a rectangle given by any two opposite corners.
pub fn rect_contains(rect: Rect, point: Point) -> bool {
    let rect = rect.abs();
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_length_symmetric() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);
        assert!((segment_length(a, b) - 5.0).abs() < f64::EPSILON);
        assert_eq!(segment_length(a, b), segment_length(b, a));
    }

    #[test]
    fn test_polyline_length() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        assert!((polyline_length(&points) - 20.0).abs() < f64::EPSILON);
        assert_eq!(polyline_length(&points[..1]), 0.0);
        assert_eq!(polyline_length(&[]), 0.0);
    }

    #[test]
    fn test_ellipse_area_corner_order() {
        let area = ellipse_area(Point::new(0.0, 0.0), Point::new(20.0, 10.0));
        assert!((area - 157.079_632_679).abs() < 1e-6);
        let swapped = ellipse_area(Point::new(20.0, 10.0), Point::new(0.0, 0.0));
        assert_eq!(area, swapped);
        let mixed = ellipse_area(Point::new(20.0, 0.0), Point::new(0.0, 10.0));
        assert_eq!(area, mixed);
    }

    #[test]
    fn test_ellipse_area_of_unnormalized_rect() {
        let rect = Rect::new(20.0, 10.0, 0.0, 0.0);
        assert!((ellipse_area_of_rect(rect) - PI * 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_endpoint_is_hit() {
        let a = Point::new(3.0, 3.0);
        let b = Point::new(30.0, 12.0);
        for tolerance in [0.001, 1.0, 5.0] {
            assert_eq!(distance_point_to_segment(a, a, b, tolerance), 0.0);
            assert!(is_point_near_segment(b, a, b, tolerance));
        }
    }

    #[test]
    fn test_near_segment_middle() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!(is_point_near_segment(Point::new(5.0, 1.0), a, b, 5.0));
        assert!((distance_point_to_segment(Point::new(5.0, 1.0), a, b, 5.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_colinear_beyond_endpoint_rejected() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 10.0);
        let beyond = Point::new(20.0, 20.0);
        assert_eq!(distance_point_to_segment(beyond, a, b, 5.0), f64::INFINITY);
        assert!(!is_point_near_segment(beyond, a, b, 5.0));
    }

    #[test]
    fn test_horizontal_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        assert!(is_point_near_segment(Point::new(50.0, 0.0), a, b, 1.0));
        assert!(is_point_near_segment(Point::new(50.0, 2.0), a, b, 5.0));
        assert!(!is_point_near_segment(Point::new(50.0, 20.0), a, b, 5.0));
        assert!(!is_point_near_segment(Point::new(112.0, 0.0), a, b, 5.0));
    }

    #[test]
    fn test_colinear_just_past_diagonal_endpoint_rejected() {
        // 5.66 away from the endpoint, on the line, outside the span.
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 10.0);
        assert!(!is_point_near_segment(Point::new(14.0, 14.0), a, b, 5.0));
    }

    #[test]
    fn test_degenerate_segment() {
        let a = Point::new(5.0, 5.0);
        assert!(is_point_near_segment(Point::new(6.0, 5.0), a, a, 2.0));
        assert!(!is_point_near_segment(Point::new(9.0, 5.0), a, a, 2.0));
        // Exactly at the tolerance is outside, as for the endpoint check.
        assert!(!is_point_near_segment(Point::new(7.0, 5.0), a, a, 2.0));
        assert_eq!(distance_point_to_segment(Point::new(7.0, 5.0), a, a, 2.0), f64::INFINITY);
    }

    #[test]
    fn test_point_in_polygon_even_odd() {
        let triangle = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        assert!(point_in_polygon(Point::new(8.0, 2.0), &triangle));
        assert!(!point_in_polygon(Point::new(2.0, 8.0), &triangle));
        assert!(!point_in_polygon(Point::new(50.0, 50.0), &triangle));
    }

    #[test]
    fn test_point_in_self_intersecting_polygon() {
        // Pentagram: the inner pentagon is crossed twice and stays empty.
        let star = [
            Point::new(50.0, 0.0),
            Point::new(79.0, 90.0),
            Point::new(2.0, 35.0),
            Point::new(98.0, 35.0),
            Point::new(21.0, 90.0),
        ];
        assert!(!point_in_polygon(Point::new(50.0, 50.0), &star));
        assert!(point_in_polygon(Point::new(50.0, 15.0), &star));
    }

    #[test]
    fn test_two_points_never_contain() {
        let line = [Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        assert!(!point_in_polygon(Point::new(5.0, 5.0), &line));
    }

    #[test]
    fn test_rect_contains_inclusive() {
        let rect = Rect::new(20.0, 10.0, 0.0, 0.0);
        assert!(rect_contains(rect, Point::new(0.0, 0.0)));
        assert!(rect_contains(rect, Point::new(20.0, 10.0)));
        assert!(rect_contains(rect, Point::new(7.0, 3.0)));
        assert!(!rect_contains(rect, Point::new(21.0, 3.0)));
    }
}
