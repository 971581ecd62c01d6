//! Single-shape selection.

use crate::shapes::ShapeKind;
use serde::{Deserialize, Serialize};

/// Reference to at most one shape in the store.
///
/// Indices are per collection: `Segment(0)` and `Ellipse(0)` are different
/// shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    None,
    Segment(usize),
    Polyline(usize),
    Ellipse(usize),
}

impl Selection {
    pub fn kind(self) -> Option<ShapeKind> {
        match self {
            Selection::None => None,
            Selection::Segment(_) => Some(ShapeKind::Segment),
            Selection::Polyline(_) => Some(ShapeKind::Polyline),
            Selection::Ellipse(_) => Some(ShapeKind::Ellipse),
        }
    }

    pub fn index(self) -> Option<usize> {
        match self {
            Selection::None => None,
            Selection::Segment(i) | Selection::Polyline(i) | Selection::Ellipse(i) => Some(i),
        }
    }

    pub fn is_none(self) -> bool {
        matches!(self, Selection::None)
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}
