//! Runtime orchestration and lifecycle management.
//!
//! This module contains the infrastructure for running a plugin session outside a
//! synchronous host:
//!
//! - **Configuration**: [`BridgeConfig`] loaded from the environment
//! - **Session actor**: [`SessionActor`] serialises commands onto one task
//! - **System orchestration**: [`SessionSystem`] starts and shuts the actor down
//! - **Observability setup**: [`setup_tracing`]

pub mod config;
pub mod session_actor;
pub mod session_system;
pub mod tracing;

pub use config::*;
pub use session_actor::*;
pub use session_system::*;
pub use self::tracing::*;
