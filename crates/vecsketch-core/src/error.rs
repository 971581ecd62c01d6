//! Error types for canvas operations.

use crate::selection::Selection;
use thiserror::Error;

/// Canvas errors.
///
/// None of these are fatal: the host reports them and the canvas state is left
/// unchanged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CanvasError {
    #[error("A prompt is waiting for an answer")]
    PromptPending,
    #[error("No prompt is waiting for an answer")]
    NoPendingPrompt,
    #[error("Selection {0:?} does not refer to a shape")]
    InvalidSelection(Selection),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;
