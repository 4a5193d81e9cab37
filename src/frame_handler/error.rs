//! Error types for the frame handler.

use thiserror::Error;

/// Errors that can occur during frame operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameError {
    /// The payload could not be read as frame values.
    #[error("Invalid frame payload: {0}")]
    InvalidPayload(String),
}
