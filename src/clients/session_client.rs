use crate::clients::interactive_api::InteractiveApi;
use crate::framework::{BridgeError, CommandResult};
use crate::runtime::session_actor::SessionRequest;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Cloneable handle to a running [`SessionActor`](crate::runtime::SessionActor).
#[derive(Clone, Debug)]
pub struct SessionClient {
    sender: mpsc::Sender<SessionRequest>,
}

impl SessionClient {
    pub fn new(sender: mpsc::Sender<SessionRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> SessionRequest,
    ) -> Result<T, BridgeError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| BridgeError::ActorClosed)?;
        response.await.map_err(|_| BridgeError::ActorDropped)
    }

    pub async fn has_unsaved_changes(&self) -> Result<bool, BridgeError> {
        self.request(|respond_to| SessionRequest::HasUnsavedChanges { respond_to })
            .await
    }

    pub async fn mark_saved(&self) -> Result<(), BridgeError> {
        self.request(|respond_to| SessionRequest::MarkSaved { respond_to })
            .await
    }

    /// Reports a document change made outside the command path; returns the new change count.
    pub async fn record_change(&self) -> Result<u64, BridgeError> {
        self.request(|respond_to| SessionRequest::RecordChange { respond_to })
            .await
    }
}

#[async_trait]
impl InteractiveApi for SessionClient {
    #[instrument(skip(self, message))]
    async fn send_command(&self, message: Value) -> Result<CommandResult, BridgeError> {
        debug!("Sending command");
        self.request(|respond_to| SessionRequest::Command {
            message,
            respond_to,
        })
        .await
    }
}
