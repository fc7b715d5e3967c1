//! Error types for snapping and drag operations.

use crate::shapes::ShapeId;
use thiserror::Error;

/// Errors raised by the snapping core.
#[derive(Debug, Error, PartialEq)]
pub enum SnapError {
    /// A bounding box was requested for an empty selection.
    #[error("Selection is empty")]
    EmptySelection,
    /// A drag was started on a shape the scene does not contain.
    #[error("Unknown shape: {0}")]
    UnknownShape(ShapeId),
    /// A drag was started while another drag is still live.
    #[error("Drag already active on shape: {0}")]
    DragAlreadyActive(ShapeId),
    /// Configuration could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),
    /// A loaded scene is internally inconsistent.
    #[error("Invalid scene: {0}")]
    InvalidScene(String),
}

/// Result type for snapping operations.
pub type SnapResult<T> = Result<T, SnapError>;
