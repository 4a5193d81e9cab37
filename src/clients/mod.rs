//! Plugin-side handles for a running session.

pub mod interactive_api;
pub mod session_client;

pub use interactive_api::*;
pub use session_client::*;
