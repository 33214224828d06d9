//! Error types for the canvas engine.
//!
//! None of these are fatal to the host. The surface logs them and degrades to a no-op.

use crate::element::ElementId;
use thiserror::Error;

/// Canvas engine errors.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),
    #[error("Malformed drop payload: {0}")]
    MalformedDrop(#[from] serde_json::Error),
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;
