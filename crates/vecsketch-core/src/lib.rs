//! VecSketch Core Library
//!
//! Toolkit-independent geometry, shape storage and interaction logic for the
//! VecSketch drawing canvas. A host UI adapts its native pointer events into
//! [`Canvas::pointer_down`], [`Canvas::pointer_move`] and [`Canvas::pointer_up`]
//! and owns the window and menu chrome.

pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod prompt;
pub mod selection;
pub mod shapes;
pub mod store;
pub mod tools;

pub use canvas::{BackgroundImage, Canvas, Interaction, PendingPrompt, Preview};
pub use config::CanvasConfig;
pub use error::{CanvasError, CanvasResult};
pub use input::{MouseButton, PointerEvent};
pub use prompt::{OffsetRange, Prompter};
pub use selection::Selection;
pub use shapes::{Ellipse, Metric, Polyline, Segment, Shape, ShapeColor, ShapeKind, ShapeTrait};
pub use store::{Entry, ShapeStore};
pub use tools::{ToolKind, ToolManager, ToolState};
