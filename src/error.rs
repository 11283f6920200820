use thiserror::Error;

use crate::serializer::SerializeError;

/// Errors raised by grid construction and grid mutation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// A cell index outside `0..width * width`
    #[error("cell index {index} is outside a grid of {len} cells")]
    OutOfBounds { index: usize, len: usize },

    /// A canvas-local point that does not land on any cell
    #[error("point ({x}, {y}) is outside the canvas")]
    PointOutside { x: f32, y: f32 },

    #[error("grid width must be at least 1, got {0}")]
    InvalidWidth(usize),

    #[error("canvas size must be positive and finite, got {0}")]
    InvalidCanvasSize(f32),

    #[error("expected {expected} colors, found {found}")]
    ColorCountMismatch { expected: usize, found: usize },
}

/// Errors surfaced to the UI by the editing session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error("unknown tool: {0:?}")]
    UnknownTool(String),
}
