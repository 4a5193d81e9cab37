//! The host object behind one embedded plugin.
//!
//! An [`InteractiveSession`] owns everything a plugin can reach: its
//! [`ResourceModel`], the [`CommandRouter`] that serves its messages, and the
//! [`DirtyStateTracker`] the save subsystem consults. Commands are processed one at
//! a time and each one replies before `do_command` returns.
//!
//! ```ignore
//! let mut session = InteractiveSession::new(LocalDocumentController::new(), HostContext::default())?;
//! session.do_command_value(
//!     json!({ "action": "create", "what": { "type": "dataContext" }, "values": { "title": "T" } }),
//!     |result| assert!(result.success),
//! );
//! assert!(session.has_unsaved_changes());
//! session.mark_saved();
//! ```

use crate::dirty_state::DirtyStateTracker;
use crate::document::DocumentController;
use crate::framework::{
    BridgeError, CommandResult, CommandRouter, DispatchReport, HandlerContext, HostContext,
    Message,
};
use crate::model::{DataContext, ResourceModel};
use serde_json::Value;
use tracing::{debug, info, warn};

pub struct InteractiveSession<D: DocumentController> {
    model: ResourceModel,
    router: CommandRouter,
    tracker: DirtyStateTracker,
    documents: D,
    host: HostContext,
}

impl<D: DocumentController> InteractiveSession<D> {
    /// A session served by the [standard](CommandRouter::standard) router.
    pub fn new(documents: D, host: HostContext) -> Result<Self, BridgeError> {
        Ok(Self::with_router(documents, host, CommandRouter::standard()?))
    }

    pub fn with_router(documents: D, host: HostContext, router: CommandRouter) -> Self {
        Self {
            model: ResourceModel::new(),
            router,
            tracker: DirtyStateTracker::new(),
            documents,
            host,
        }
    }

    /// Runs one command; `reply` is called exactly once before this returns.
    pub fn do_command<F>(&mut self, message: &Message, reply: F) -> DispatchReport
    where
        F: FnOnce(CommandResult),
    {
        let mut ctx = HandlerContext {
            model: &mut self.model,
            documents: &mut self.documents,
            host: &self.host,
        };
        let report = self.router.dispatch(message, &mut ctx, reply);
        self.absorb(report)
    }

    /// Like [`do_command`](Self::do_command) for a deserialized wire message.
    pub fn do_command_value<F>(&mut self, value: Value, reply: F) -> DispatchReport
    where
        F: FnOnce(CommandResult),
    {
        let mut ctx = HandlerContext {
            model: &mut self.model,
            documents: &mut self.documents,
            host: &self.host,
        };
        let report = self.router.dispatch_value(value, &mut ctx, reply);
        self.absorb(report)
    }

    /// Like [`do_command`](Self::do_command) for raw JSON text.
    pub fn do_command_json<F>(&mut self, text: &str, reply: F) -> DispatchReport
    where
        F: FnOnce(CommandResult),
    {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => self.do_command_value(value, reply),
            Err(e) => {
                warn!(error = %e, "Unparseable message");
                reply(CommandResult::failure());
                DispatchReport::default()
            }
        }
    }

    fn absorb(&mut self, report: DispatchReport) -> DispatchReport {
        if report.mutated {
            self.tracker.record_change();
            debug!(change_count = self.tracker.change_count(), "Document dirtied");
        }
        report
    }

    /// Whether a save prompt is needed.
    pub fn has_unsaved_changes(&self) -> bool {
        self.tracker.has_unsaved_changes()
    }

    /// Called by the save subsystem once the document is persisted.
    pub fn mark_saved(&mut self) {
        self.tracker.mark_saved();
        debug!(saved_change_count = self.tracker.saved_change_count(), "Marked saved");
    }

    /// Change notification from outside the command path.
    pub fn record_change(&mut self) {
        self.tracker.record_change();
    }

    pub fn change_count(&self) -> u64 {
        self.tracker.change_count()
    }

    pub fn model(&self) -> &ResourceModel {
        &self.model
    }

    pub fn documents(&self) -> &D {
        &self.documents
    }

    pub fn host(&self) -> &HostContext {
        &self.host
    }

    /// Tears the session down, releasing the data context first.
    ///
    /// The context stays alive in the document; the session just stops holding it and
    /// hands it back to the caller.
    pub fn destroy(mut self) -> Option<DataContext> {
        let released = self.model.release_data_context();
        if let Some(context) = &released {
            debug!(identifier = %context.identifier, "Released data context");
        }
        info!(
            change_count = self.tracker.change_count(),
            unsaved = self.tracker.has_unsaved_changes(),
            "Session destroyed"
        );
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::LocalDocumentController;
    use crate::framework::{Action, ResourceType};
    use serde_json::json;
    use std::cell::Cell;

    fn session() -> InteractiveSession<LocalDocumentController> {
        InteractiveSession::new(LocalDocumentController::new(), HostContext::default()).unwrap()
    }

    #[test]
    fn mutation_marks_dirty_until_saved() {
        let mut s = session();
        let report = s.do_command_value(
            json!({ "action": "create", "what": { "type": "dataContext" }, "values": { "title": "T" } }),
            |r| assert!(r.success),
        );
        assert!(report.mutated);
        assert!(s.has_unsaved_changes());

        s.mark_saved();
        assert!(!s.has_unsaved_changes());
    }

    #[test]
    fn failed_command_leaves_tracker_alone() {
        let mut s = session();
        let message = Message::new(Action::Update, ResourceType::DataContext);
        s.do_command(&message, |r| assert!(!r.success));
        assert_eq!(s.change_count(), 0);
    }

    #[test]
    fn bad_json_replies_once() {
        let mut s = session();
        let calls = Cell::new(0);
        s.do_command_json("{not json", |r| {
            assert!(!r.success);
            calls.set(calls.get() + 1);
        });
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn external_change_notification() {
        let mut s = session();
        s.record_change();
        assert!(s.has_unsaved_changes());
        assert_eq!(s.change_count(), 1);
    }
}
