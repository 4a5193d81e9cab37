//! # Interactive Bridge
//!
//! > **The host side of the plugin command protocol.**
//!
//! An embedded plugin (an "interactive", usually living in an iframe) cannot touch host
//! state directly. It sends structured messages instead:
//!
//! ```json
//! { "action": "create", "what": { "type": "dataContext" }, "values": { "identifier": "ctx1" } }
//! ```
//!
//! This crate turns each message into an operation on the plugin's own resources (its
//! frame metadata and its single data context) and always answers with a
//! `{ "success": bool, "values"?: ... }` reply. It also tracks whether those operations
//! left unsaved changes behind.
//!
//! ## Architecture Notes
//!
//! ### 1. Every message gets exactly one reply
//! The [`CommandRouter`](framework::CommandRouter) takes the reply callback into a drop
//! guard before it looks at the message. Unknown resource types, malformed messages,
//! handler errors and handler panics all end in a `{success: false}` reply plus a log
//! entry. Nothing escapes the dispatch boundary.
//!
//! ### 2. Closed resource types, explicit registration
//! [`ResourceType`](framework::ResourceType) is an enum and each kind is served by a
//! [`ResourceHandler`](framework::ResourceHandler) registered once at startup. Registering
//! the same type twice is an error.
//!
//! ### 3. Dirty tracking is an explicit effect
//! Handlers report `mutated` in their [`Outcome`](framework::Outcome); the
//! [`InteractiveSession`](session::InteractiveSession) feeds that into its
//! [`DirtyStateTracker`](dirty_state::DirtyStateTracker). No handler touches the counters.
//!
//! ### 4. Concurrency Model
//! A session is single-threaded: one command runs to completion, reply included, before the
//! next starts. [`runtime::SessionActor`] keeps that guarantee for async hosts by owning the
//! session inside one Tokio task.
//!
//! ## Module Tour
//!
//! - [`framework`]: messages, handler trait, router, errors, test mocks
//! - [`model`]: the frame and data context state
//! - [`frame_handler`], [`data_context_handler`]: per-resource semantics
//! - [`document`]: the collaborator that materialises data contexts
//! - [`dirty_state`]: change counters
//! - [`session`]: the per-plugin host object
//! - [`clients`], [`runtime`]: async front end, configuration, tracing setup
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=debug cargo run
//! ```

pub mod clients;
pub mod data_context_handler;
pub mod dirty_state;
pub mod document;
pub mod frame_handler;
pub mod framework;
pub mod model;
pub mod runtime;
pub mod session;
