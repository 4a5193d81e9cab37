//! # Command Router
//!
//! Maps a message's [`ResourceType`] to its [`ResourceHandler`] and guarantees the
//! plugin's reply callback runs exactly once per message.
//!
//! ## The reply obligation
//!
//! The callback is moved into a [`ReplyGuard`] before anything else happens. The guard
//! starts out holding the default `{success: false}` result and sends it when dropped,
//! so an early return, a handler error and a handler panic all still produce a reply.
//! Panics are caught at this boundary and the reply is sent before the `tracing` error
//! entry is written. The process panic hook still runs when the handler unwinds, so
//! the default hook prints the panic message to stderr ahead of both.

use crate::framework::error::BridgeError;
use crate::framework::handler::{HandlerContext, ResourceHandler};
use crate::framework::message::{CommandResult, Message, ResourceType};
use crate::data_context_handler::DataContextHandler;
use crate::frame_handler::FrameHandler;
use serde_json::Value;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, error, warn};

/// What a dispatch did, for the caller's bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub success: bool,
    pub mutated: bool,
}

/// Holds the reply callback until a result is decided.
pub struct ReplyGuard<F: FnOnce(CommandResult)> {
    reply: Option<F>,
    result: CommandResult,
}

impl<F: FnOnce(CommandResult)> ReplyGuard<F> {
    pub fn new(reply: F) -> Self {
        Self {
            reply: Some(reply),
            result: CommandResult::default(),
        }
    }

    /// Replaces the result that will be sent.
    pub fn set(&mut self, result: CommandResult) {
        self.result = result;
    }

    /// Sends the reply now instead of at scope exit.
    pub fn send(mut self) {
        self.fire();
    }

    fn fire(&mut self) {
        if let Some(reply) = self.reply.take() {
            reply(std::mem::take(&mut self.result));
        }
    }
}

impl<F: FnOnce(CommandResult)> Drop for ReplyGuard<F> {
    fn drop(&mut self) {
        self.fire();
    }
}

/// Static registry of handlers, built once per session.
pub struct CommandRouter {
    handlers: HashMap<ResourceType, Box<dyn ResourceHandler>>,
}

impl std::fmt::Debug for CommandRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRouter")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CommandRouter {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::default()
    }

    /// A router serving every built-in resource type.
    ///
    /// # Errors
    /// [`BridgeError::DuplicateHandler`] if two built-in handlers claim the same type.
    pub fn standard() -> Result<Self, BridgeError> {
        Ok(Self::builder()
            .register(FrameHandler)?
            .register(DataContextHandler)?
            .build())
    }

    pub fn handles(&self, resource_type: ResourceType) -> bool {
        self.handlers.contains_key(&resource_type)
    }

    /// Routes a validated message to its handler and replies through `reply`.
    pub fn dispatch<F>(
        &self,
        message: &Message,
        ctx: &mut HandlerContext<'_>,
        reply: F,
    ) -> DispatchReport
    where
        F: FnOnce(CommandResult),
    {
        let mut guard = ReplyGuard::new(reply);
        let resource_type = message.resource_type;
        let action = message.action;
        debug!(%resource_type, %action, payload = ?message.payload, "Command received");

        let Some(handler) = self.handlers.get(&resource_type) else {
            warn!(%resource_type, "No handler registered for resource type");
            return DispatchReport::default();
        };

        match catch_unwind(AssertUnwindSafe(|| {
            handler.handle(action, &message.payload, ctx)
        })) {
            Ok(Ok(outcome)) => {
                let report = DispatchReport {
                    success: outcome.result.success,
                    mutated: outcome.mutated,
                };
                guard.set(outcome.result);
                report
            }
            Ok(Err(e)) => {
                warn!(%resource_type, %action, error = %e, "Command rejected");
                DispatchReport::default()
            }
            Err(payload) => {
                guard.send();
                let fault = BridgeError::HandlerFault(panic_message(payload));
                error!(%resource_type, %action, error = %fault, "Handler panicked");
                DispatchReport::default()
            }
        }
    }

    /// Validates a raw wire message and dispatches it.
    ///
    /// Malformed messages and unknown resource types reply `{success: false}`.
    pub fn dispatch_value<F>(
        &self,
        value: Value,
        ctx: &mut HandlerContext<'_>,
        reply: F,
    ) -> DispatchReport
    where
        F: FnOnce(CommandResult),
    {
        match Message::from_value(value) {
            Ok(message) => self.dispatch(&message, ctx, reply),
            Err(e) => {
                warn!(error = %e, "Unroutable message");
                reply(CommandResult::failure());
                DispatchReport::default()
            }
        }
    }
}

/// Explicit, validated handler registration.
#[derive(Default)]
pub struct RouterBuilder {
    handlers: HashMap<ResourceType, Box<dyn ResourceHandler>>,
}

impl RouterBuilder {
    /// Adds a handler under its own [`ResourceHandler::resource_type`].
    ///
    /// # Errors
    /// [`BridgeError::DuplicateHandler`] if that type already has a handler.
    pub fn register(mut self, handler: impl ResourceHandler + 'static) -> Result<Self, BridgeError> {
        let resource_type = handler.resource_type();
        if self.handlers.contains_key(&resource_type) {
            return Err(BridgeError::DuplicateHandler(resource_type));
        }
        self.handlers.insert(resource_type, Box::new(handler));
        Ok(self)
    }

    pub fn build(self) -> CommandRouter {
        CommandRouter {
            handlers: self.handlers,
        }
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        return (*msg).to_string();
    }
    if let Some(msg) = payload.downcast_ref::<String>() {
        return msg.clone();
    }
    "non-string panic payload".to_string()
}
