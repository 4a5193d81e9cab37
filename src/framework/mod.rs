//! Protocol framework for plugin commands.
//!
//! This module provides the building blocks every resource kind plugs into.
//!
//! # Main Components
//!
//! - [`Message`] / [`CommandResult`] - The inbound command and its reply
//! - [`ResourceHandler`] - Trait each resource kind implements
//! - [`CommandRouter`] - Selects the handler and owns the reply obligation
//! - [`BridgeError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] for a document controller whose behaviour tests can script.

pub mod error;
pub mod handler;
pub mod message;
pub mod mock;
pub mod router;

pub use error::*;
pub use handler::*;
pub use message::*;
pub use router::*;
