//! # Bridge Errors
//!
//! Error types shared by the router, the handlers and the async session front end.
//! None of these ever escape [`CommandRouter::dispatch`](crate::framework::CommandRouter::dispatch):
//! the router degrades each of them to a `{success: false}` reply plus a log entry.

use crate::data_context_handler::DataContextError;
use crate::frame_handler::FrameError;
use crate::framework::message::{Action, ResourceType};

/// Errors raised by the protocol layer and the session runtime.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BridgeError {
    /// The message named a resource type nobody handles.
    #[error("Unknown resource type: {0}")]
    UnknownResourceType(String),

    /// The message is missing `action` or `what.type`, or carries an unusable payload.
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    /// Two handlers were registered for the same resource type.
    #[error("Handler already registered for {0}")]
    DuplicateHandler(ResourceType),

    /// A handler panicked while processing the command.
    #[error("Handler fault: {0}")]
    HandlerFault(String),

    /// The session task ended abnormally instead of draining its channel.
    #[error("Session task failed: {0}")]
    SessionTask(String),

    #[error("Session actor closed")]
    ActorClosed,

    #[error("Session actor dropped response channel")]
    ActorDropped,

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors returned by [`ResourceHandler::handle`](crate::framework::ResourceHandler::handle).
///
/// Each resource kind keeps its own error enum; this type is the union the router sees.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum HandlerError {
    #[error(transparent)]
    DataContext(#[from] DataContextError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    /// The handler does not implement this action.
    #[error("{action} is not supported on {resource_type}")]
    Unsupported {
        resource_type: ResourceType,
        action: Action,
    },
}
