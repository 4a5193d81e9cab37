//! # Session Actor
//!
//! Runs an [`InteractiveSession`] in its own Tokio task so that commands arriving
//! from the transport are handled strictly one at a time.
//!
//! **Concurrency Model**:
//! The actor owns the session outright and drains its channel sequentially, so the
//! model and the dirty-state counters never need a lock. Each request carries a
//! `oneshot` sender for its answer.

use crate::clients::SessionClient;
use crate::document::DocumentController;
use crate::framework::CommandResult;
use crate::session::InteractiveSession;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<T>;

/// Requests the [`SessionClient`] sends to the actor.
#[derive(Debug)]
pub enum SessionRequest {
    Command {
        message: Value,
        respond_to: Response<CommandResult>,
    },
    HasUnsavedChanges {
        respond_to: Response<bool>,
    },
    MarkSaved {
        respond_to: Response<()>,
    },
    RecordChange {
        respond_to: Response<u64>,
    },
}

pub struct SessionActor<D: DocumentController> {
    receiver: mpsc::Receiver<SessionRequest>,
    session: InteractiveSession<D>,
}

impl<D: DocumentController + 'static> SessionActor<D> {
    /// Creates the actor and the client that feeds it.
    ///
    /// `buffer_size` is the channel capacity; senders wait once it is full.
    pub fn new(buffer_size: usize, session: InteractiveSession<D>) -> (Self, SessionClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, session };
        (actor, SessionClient::new(sender))
    }

    /// Processes requests until every client is dropped, then destroys the session.
    pub async fn run(mut self) {
        info!("Session actor started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                SessionRequest::Command {
                    message,
                    respond_to,
                } => {
                    self.session.do_command_value(message, |result| {
                        let _ = respond_to.send(result);
                    });
                }
                SessionRequest::HasUnsavedChanges { respond_to } => {
                    let _ = respond_to.send(self.session.has_unsaved_changes());
                }
                SessionRequest::MarkSaved { respond_to } => {
                    self.session.mark_saved();
                    let _ = respond_to.send(());
                }
                SessionRequest::RecordChange { respond_to } => {
                    self.session.record_change();
                    debug!(change_count = self.session.change_count(), "External change");
                    let _ = respond_to.send(self.session.change_count());
                }
            }
        }

        info!("Session actor shutting down");
        if let Some(context) = self.session.destroy() {
            debug!(identifier = %context.identifier, "Session held a data context at shutdown");
        }
    }
}
