use crate::layer::LayerId;
use thiserror::Error;

/// Errors that can occur during editor operations
#[derive(Debug, Error)]
pub enum EditorError {
    /// A coordinate fell outside the canvas grid
    #[error("coordinate ({x}, {y}) is outside the canvas")]
    InvalidCoordinate { x: i32, y: i32 },
    /// An operation referenced a layer id that does not exist
    #[error("unknown layer id {0}")]
    UnknownLayer(LayerId),
    /// The editor is not in a state where the operation can proceed
    #[error("invalid editor state: {0}")]
    InvalidState(String),
}
