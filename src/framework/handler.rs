//! # Resource Handlers
//!
//! The contract every resource kind implements to be reachable through the
//! [`CommandRouter`](crate::framework::CommandRouter).
//!
//! # Context Injection
//! Handlers hold no state of their own. Everything they may touch is passed in a
//! [`HandlerContext`] on each call: the session's [`ResourceModel`], the
//! [`DocumentController`], and the read-only [`HostContext`].

use crate::document::DocumentController;
use crate::framework::error::HandlerError;
use crate::framework::message::{Action, CommandResult, Payload, ResourceType};
use crate::model::ResourceModel;
use serde::{Deserialize, Serialize};

/// What the host knows about the plugin before it says anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostContext {
    #[serde(default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub game_version: Option<String>,
}

/// Collaborators injected into a handler call.
pub struct HandlerContext<'a> {
    pub model: &'a mut ResourceModel,
    pub documents: &'a mut dyn DocumentController,
    pub host: &'a HostContext,
}

/// A successful handler run: the reply plus whether the document was dirtied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub result: CommandResult,
    pub mutated: bool,
}

impl Outcome {
    pub fn ok() -> Self {
        Self {
            result: CommandResult::success(),
            mutated: false,
        }
    }

    pub fn ok_with(values: serde_json::Value) -> Self {
        Self {
            result: CommandResult::success().with_values(values),
            mutated: false,
        }
    }

    /// The command changed document state that has to be saved.
    pub fn mutated(mut self, mutated: bool) -> Self {
        self.mutated = mutated;
        self
    }
}

/// Create/update/get/delete semantics for one resource kind.
pub trait ResourceHandler: Send + Sync {
    /// The resource type this handler is registered under.
    fn resource_type(&self) -> ResourceType;

    /// Runs `action` against the model.
    ///
    /// Returning `Err` yields a `{success: false}` reply and a warning in the log.
    fn handle(
        &self,
        action: Action,
        payload: &Payload,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<Outcome, HandlerError>;
}
