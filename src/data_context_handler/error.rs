//! Error types for the data context handler.

use thiserror::Error;

/// Errors that can occur during data context operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DataContextError {
    /// The plugin already owns a data context.
    #[error("Data context already exists: {0}")]
    AlreadyExists(String),

    /// The plugin has no data context to operate on.
    #[error("No data context to {0}")]
    NotFound(&'static str),

    /// The document refused to materialise the context.
    #[error("Document declined to create data context")]
    CreationRejected,

    /// The payload could not be read as data context values.
    #[error("Invalid data context payload: {0}")]
    InvalidPayload(String),
}
