//! Data context operations.
//!
//! A plugin owns at most one data context. The handler is a state machine over
//! that single slot:
//!
//! | Slot    | Action   | Effect                                   | Reply            |
//! |---------|----------|------------------------------------------|------------------|
//! | empty   | `create` | document materialises it, slot filled    | created or not   |
//! | filled  | `create` | none, warning                            | `success: false` |
//! | empty   | `update` | none, warning                            | `success: false` |
//! | filled  | `update` | rewrites `identifier`/`title`/`description` | `success: true` |
//! | filled  | `get`    | none                                     | context values   |
//! | empty   | `get`    | none, warning                            | `success: false` |
//! | filled  | `delete` | document destroys it, slot cleared       | `success: false` |
//! | empty   | `delete` | none, warning                            | `success: false` |

pub mod error;

pub use error::*;

use crate::framework::{
    Action, CommandResult, HandlerContext, HandlerError, Outcome, Payload, ResourceHandler,
    ResourceType,
};
use crate::model::{DataContextUpdate, DataContextValues};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info};

/// Handler for [`ResourceType::DataContext`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DataContextHandler;

fn parse<T: DeserializeOwned>(payload: &Payload) -> Result<T, DataContextError> {
    serde_json::from_value(Value::Object(payload.clone()))
        .map_err(|e| DataContextError::InvalidPayload(e.to_string()))
}

impl DataContextHandler {
    fn create(
        &self,
        payload: &Payload,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<Outcome, DataContextError> {
        if let Some(existing) = ctx.model.data_context() {
            return Err(DataContextError::AlreadyExists(existing.identifier.clone()));
        }

        let values: DataContextValues = parse(payload)?;
        let context = ctx
            .documents
            .create_data_context(&values)
            .ok_or(DataContextError::CreationRejected)?;
        let identifier = context.identifier.clone();
        let reply = json!({ "id": context.id, "identifier": identifier });

        if let Err(orphan) = ctx.model.attach_data_context(context) {
            ctx.documents.destroy_data_context(orphan);
            return Err(DataContextError::AlreadyExists(identifier));
        }
        info!(%identifier, "Data context attached");
        Ok(Outcome::ok_with(reply).mutated(true))
    }

    fn update(
        &self,
        payload: &Payload,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<Outcome, DataContextError> {
        let context = ctx
            .model
            .data_context_mut()
            .ok_or(DataContextError::NotFound("update"))?;
        if payload.contains_key("collections") {
            debug!("Ignoring collections in data context update");
        }

        let update = DataContextUpdate::from_payload(payload);
        let changed = context.apply(update);
        debug!(identifier = %context.identifier, changed, "Data context updated");
        Ok(Outcome::ok().mutated(changed))
    }

    fn get(&self, ctx: &HandlerContext<'_>) -> Result<Outcome, DataContextError> {
        let context = ctx
            .model
            .data_context()
            .ok_or(DataContextError::NotFound("get"))?;
        let values = serde_json::to_value(context)
            .map_err(|e| DataContextError::InvalidPayload(e.to_string()))?;
        Ok(Outcome::ok_with(values))
    }

    fn delete(&self, ctx: &mut HandlerContext<'_>) -> Result<Outcome, DataContextError> {
        let context = ctx
            .model
            .release_data_context()
            .ok_or(DataContextError::NotFound("delete"))?;
        info!(identifier = %context.identifier, "Data context detached");
        ctx.documents.destroy_data_context(context);

        // Delete replies with the default status; the slot is cleared regardless.
        Ok(Outcome {
            result: CommandResult::failure(),
            mutated: true,
        })
    }
}

impl ResourceHandler for DataContextHandler {
    fn resource_type(&self) -> ResourceType {
        ResourceType::DataContext
    }

    fn handle(
        &self,
        action: Action,
        payload: &Payload,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<Outcome, HandlerError> {
        let outcome = match action {
            Action::Create => self.create(payload, ctx),
            Action::Update => self.update(payload, ctx),
            Action::Get => self.get(ctx),
            Action::Delete => self.delete(ctx),
        }?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockDocumentController;
    use crate::framework::HostContext;
    use crate::model::{ContextId, ResourceModel};

    struct Fixture {
        model: ResourceModel,
        documents: MockDocumentController,
        host: HostContext,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                model: ResourceModel::new(),
                documents: MockDocumentController::new(),
                host: HostContext::default(),
            }
        }

        fn run(&mut self, action: Action, payload: Value) -> Result<Outcome, HandlerError> {
            let payload = match payload {
                Value::Object(map) => map,
                _ => Payload::new(),
            };
            let mut ctx = HandlerContext {
                model: &mut self.model,
                documents: &mut self.documents,
                host: &self.host,
            };
            DataContextHandler.handle(action, &payload, &mut ctx)
        }
    }

    #[test]
    fn create_on_empty_slot() {
        let mut fx = Fixture::new();
        let outcome = fx
            .run(Action::Create, json!({ "identifier": "ctx1", "title": "T" }))
            .unwrap();

        assert!(outcome.result.success);
        assert!(outcome.mutated);
        assert_eq!(
            outcome.result.values,
            Some(json!({ "id": 1, "identifier": "ctx1" }))
        );
        assert_eq!(fx.model.data_context().unwrap().title, "T");
    }

    #[test]
    fn second_create_fails_and_keeps_original() {
        let mut fx = Fixture::new();
        fx.run(Action::Create, json!({ "identifier": "ctx1", "title": "T" }))
            .unwrap();
        let err = fx
            .run(Action::Create, json!({ "identifier": "ctx2", "title": "U" }))
            .unwrap_err();

        assert_eq!(
            err,
            HandlerError::DataContext(DataContextError::AlreadyExists("ctx1".into()))
        );
        let ctx = fx.model.data_context().unwrap();
        assert_eq!(ctx.identifier, "ctx1");
        assert_eq!(ctx.title, "T");
        assert_eq!(fx.documents.created.len(), 1);
    }

    #[test]
    fn create_rejected_by_document() {
        let mut fx = Fixture::new();
        fx.documents.expect_create().return_none();

        let err = fx.run(Action::Create, json!({ "title": "T" })).unwrap_err();
        assert_eq!(
            err,
            HandlerError::DataContext(DataContextError::CreationRejected)
        );
        assert!(!fx.model.has_data_context());
        fx.documents.verify();
    }

    #[test]
    fn create_with_bad_payload() {
        let mut fx = Fixture::new();
        let err = fx
            .run(Action::Create, json!({ "collections": "cases" }))
            .unwrap_err();
        assert!(matches!(
            err,
            HandlerError::DataContext(DataContextError::InvalidPayload(_))
        ));
        assert!(fx.documents.created.is_empty());
    }

    #[test]
    fn update_without_context_fails() {
        let mut fx = Fixture::new();
        let err = fx.run(Action::Update, json!({ "title": "X" })).unwrap_err();
        assert_eq!(
            err,
            HandlerError::DataContext(DataContextError::NotFound("update"))
        );
    }

    #[test]
    fn update_is_partial_and_ignores_collections() {
        let mut fx = Fixture::new();
        fx.run(
            Action::Create,
            json!({ "identifier": "ctx1", "title": "T", "description": "D" }),
        )
        .unwrap();

        let outcome = fx
            .run(
                Action::Update,
                json!({ "title": "X", "collections": [{ "name": "new" }] }),
            )
            .unwrap();

        assert!(outcome.result.success);
        assert!(outcome.mutated);
        let ctx = fx.model.data_context().unwrap();
        assert_eq!(ctx.identifier, "ctx1");
        assert_eq!(ctx.title, "X");
        assert_eq!(ctx.description, "D");
        assert!(ctx.collections.is_empty());
    }

    #[test]
    fn update_keeps_valid_fields_beside_mistyped_ones() {
        let mut fx = Fixture::new();
        fx.run(Action::Create, json!({ "identifier": "ctx1", "title": "T" }))
            .unwrap();

        let outcome = fx
            .run(Action::Update, json!({ "title": "X", "identifier": 7 }))
            .unwrap();

        assert!(outcome.result.success);
        assert!(outcome.mutated);
        let ctx = fx.model.data_context().unwrap();
        assert_eq!(ctx.title, "X");
        assert_eq!(ctx.identifier, "ctx1");
    }

    #[test]
    fn get_reads_back_context() {
        let mut fx = Fixture::new();
        assert!(fx.run(Action::Get, Value::Null).is_err());

        fx.run(Action::Create, json!({ "identifier": "ctx1" })).unwrap();
        let outcome = fx.run(Action::Get, Value::Null).unwrap();
        assert!(outcome.result.success);
        assert!(!outcome.mutated);
        assert_eq!(outcome.result.values.unwrap()["identifier"], json!("ctx1"));
    }

    #[test]
    fn delete_clears_slot() {
        let mut fx = Fixture::new();
        fx.run(Action::Create, json!({ "identifier": "ctx1" })).unwrap();

        let outcome = fx.run(Action::Delete, Value::Null).unwrap();
        assert!(!outcome.result.success);
        assert!(outcome.mutated);
        assert!(!fx.model.has_data_context());
        assert_eq!(fx.documents.destroyed, vec![ContextId(1)]);
    }

    #[test]
    fn delete_on_empty_slot_is_guarded() {
        let mut fx = Fixture::new();
        let err = fx.run(Action::Delete, Value::Null).unwrap_err();

        assert_eq!(
            err,
            HandlerError::DataContext(DataContextError::NotFound("delete"))
        );
        assert!(fx.documents.destroyed.is_empty());
    }
}
