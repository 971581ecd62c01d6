//! Tool system for the canvas.

use crate::shapes::{Ellipse, Polyline, Segment, Shape, ShapeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Available tools. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    /// Idle: pointer events do nothing.
    #[default]
    None,
    Line,
    Polyline,
    Ellipse,
    Select,
    Move,
    ChangeColor,
}

impl ToolKind {
    /// Display name for menus.
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::None => "None",
            ToolKind::Line => "Line",
            ToolKind::Polyline => "Polyline",
            ToolKind::Ellipse => "Ellipse",
            ToolKind::Select => "Select",
            ToolKind::Move => "Move",
            ToolKind::ChangeColor => "Change Color",
        }
    }

    /// The kind of shape this tool draws, if it is a drawing tool.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Line => Some(ShapeKind::Segment),
            ToolKind::Polyline => Some(ShapeKind::Polyline),
            ToolKind::Ellipse => Some(ShapeKind::Ellipse),
            _ => None,
        }
    }

    /// Whether this tool draws shapes.
    pub fn draws(self) -> bool {
        self.shape_kind().is_some()
    }

    /// Whether this tool looks up an existing shape under the pointer.
    pub fn probes(self) -> bool {
        matches!(self, ToolKind::Select | ToolKind::Move | ToolKind::ChangeColor)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// State of a drawing interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ToolState {
    /// Nothing is being dragged.
    #[default]
    Idle,
    /// A shape is being drawn.
    Active {
        /// Where the interaction started.
        start: Point,
        /// Live end point used for the preview.
        current: Point,
    },
}

/// Manages the current tool and the shape being drawn with it.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    current_tool: ToolKind,
    /// Current state of the tool.
    state: ToolState,
    /// Points of the polyline being drawn.
    polyline_points: Vec<Point>,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_tool(&self) -> ToolKind {
        self.current_tool
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    /// Switch tools.
    ///
    /// Any drag in progress is dropped. When leaving the polyline tool with
    /// pending points, the unfinished polyline is returned so the caller can
    /// commit it.
    pub fn set_tool(&mut self, tool: ToolKind) -> Option<Polyline> {
        let pending = if self.current_tool == ToolKind::Polyline {
            self.finish_polyline()
        } else {
            None
        };
        self.current_tool = tool;
        self.state = ToolState::Idle;
        pending
    }

    /// Begin or extend a drawing interaction at `point`.
    pub fn begin(&mut self, point: Point) {
        match self.current_tool {
            ToolKind::Line | ToolKind::Ellipse => {
                self.state = ToolState::Active {
                    start: point,
                    current: point,
                };
            }
            ToolKind::Polyline => {
                self.polyline_points.push(point);
                match &mut self.state {
                    ToolState::Active { current, .. } => *current = point,
                    ToolState::Idle => {
                        self.state = ToolState::Active {
                            start: point,
                            current: point,
                        }
                    }
                }
            }
            _ => {}
        }
    }

    /// Update the live end point. Only the polyline tool tracks movement.
    pub fn update(&mut self, point: Point) {
        if self.current_tool != ToolKind::Polyline {
            return;
        }
        if let ToolState::Active { current, .. } = &mut self.state {
            *current = point;
        }
    }

    /// End the current interaction and return any created shape.
    ///
    /// Polylines ignore release; they are committed by [`Self::finish_polyline`]
    /// or by switching tools.
    pub fn end(&mut self, point: Point) -> Option<Shape> {
        let ToolState::Active { start, .. } = self.state else {
            return None;
        };
        let shape = match self.current_tool {
            ToolKind::Line => Shape::Segment(Segment::new(start, point)),
            ToolKind::Ellipse => Shape::Ellipse(Ellipse::from_corners(start, point)),
            _ => return None,
        };
        self.state = ToolState::Idle;
        Some(shape)
    }

    /// Take the polyline being drawn, if it has any points.
    pub fn finish_polyline(&mut self) -> Option<Polyline> {
        if self.current_tool == ToolKind::Polyline {
            self.state = ToolState::Idle;
        }
        if self.polyline_points.is_empty() {
            return None;
        }
        Some(Polyline::from_points(std::mem::take(&mut self.polyline_points)))
    }

    /// Drop the current interaction, including pending polyline points.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
        self.polyline_points.clear();
    }

    /// Check if a drawing interaction is active.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Active { .. })
    }

    /// Points of the polyline being drawn.
    pub fn pending_points(&self) -> &[Point] {
        &self.polyline_points
    }

    /// Get the preview shape for the current interaction.
    ///
    /// For polylines this is the committed-so-far points plus a rubber band to
    /// the live pointer position.
    pub fn preview_shape(&self) -> Option<Shape> {
        let ToolState::Active { start, current } = self.state else {
            return None;
        };
        match self.current_tool {
            ToolKind::Line => Some(Shape::Segment(Segment::new(start, current))),
            ToolKind::Ellipse => Some(Shape::Ellipse(Ellipse::from_corners(start, current))),
            ToolKind::Polyline if !self.polyline_points.is_empty() => {
                let mut points = self.polyline_points.clone();
                points.push(current);
                Some(Shape::Polyline(Polyline::from_points(points)))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeTrait;

    #[test]
    fn test_tool_selection() {
        let mut tm = ToolManager::new();
        assert_eq!(tm.current_tool(), ToolKind::None);

        assert!(tm.set_tool(ToolKind::Ellipse).is_none());
        assert_eq!(tm.current_tool(), ToolKind::Ellipse);
    }

    #[test]
    fn test_line_interaction() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Line);
        assert!(!tm.is_active());

        tm.begin(Point::new(0.0, 0.0));
        assert!(tm.is_active());

        let shape = tm.end(Point::new(10.0, 0.0));
        assert_eq!(
            shape,
            Some(Shape::Segment(Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0))))
        );
        assert!(!tm.is_active());
    }

    #[test]
    fn test_line_move_does_not_track() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Line);
        tm.begin(Point::new(1.0, 1.0));
        tm.update(Point::new(50.0, 50.0));
        assert_eq!(
            tm.state(),
            ToolState::Active {
                start: Point::new(1.0, 1.0),
                current: Point::new(1.0, 1.0)
            }
        );
    }

    #[test]
    fn test_ellipse_any_corner_order() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Ellipse);
        tm.begin(Point::new(20.0, 10.0));
        let Some(Shape::Ellipse(ellipse)) = tm.end(Point::new(0.0, 0.0)) else {
            panic!("ellipse tool should produce an ellipse");
        };
        assert_eq!(ellipse.bounds(), kurbo::Rect::new(0.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn test_release_without_press() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Line);
        assert!(tm.end(Point::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_polyline_ignores_release() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Polyline);
        tm.begin(Point::new(0.0, 0.0));
        assert!(tm.end(Point::new(0.0, 0.0)).is_none());
        tm.begin(Point::new(10.0, 0.0));
        tm.begin(Point::new(10.0, 10.0));
        assert_eq!(tm.pending_points().len(), 3);
        assert!(tm.is_active());
    }

    #[test]
    fn test_polyline_preview_rubber_band() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Polyline);
        tm.begin(Point::new(0.0, 0.0));
        tm.update(Point::new(4.0, 3.0));
        let Some(Shape::Polyline(preview)) = tm.preview_shape() else {
            panic!("polyline preview expected");
        };
        assert_eq!(preview.points, vec![Point::new(0.0, 0.0), Point::new(4.0, 3.0)]);
    }

    #[test]
    fn test_switching_tool_commits_polyline() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Polyline);
        tm.begin(Point::new(0.0, 0.0));
        tm.begin(Point::new(10.0, 0.0));
        tm.begin(Point::new(10.0, 10.0));

        let pending = tm.set_tool(ToolKind::Select).expect("pending polyline");
        assert_eq!(pending.len(), 3);
        assert!((pending.length() - 20.0).abs() < f64::EPSILON);
        assert!(tm.pending_points().is_empty());
        assert!(!tm.is_active());
    }

    #[test]
    fn test_single_point_polyline_is_committed() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Polyline);
        tm.begin(Point::new(3.0, 3.0));
        let pending = tm.set_tool(ToolKind::None).expect("pending polyline");
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_cancel_drops_points() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Polyline);
        tm.begin(Point::new(0.0, 0.0));
        tm.cancel();
        assert!(!tm.is_active());
        assert!(tm.set_tool(ToolKind::Line).is_none());
    }

    #[test]
    fn test_probe_tools_draw_nothing() {
        let mut tm = ToolManager::new();
        for tool in [ToolKind::Select, ToolKind::Move, ToolKind::ChangeColor, ToolKind::None] {
            tm.set_tool(tool);
            tm.begin(Point::new(0.0, 0.0));
            assert!(!tm.is_active());
            assert!(tm.end(Point::new(10.0, 10.0)).is_none());
        }
        assert!(ToolKind::Move.probes());
        assert!(!ToolKind::Move.draws());
    }
}
