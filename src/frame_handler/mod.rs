//! Frame metadata operations.
//!
//! The frame always exists, so there is nothing to create or delete in the
//! lifecycle sense:
//!
//! | Action   | Effect                                                     |
//! |----------|------------------------------------------------------------|
//! | `create` | seeds title/version the [`HostContext`] knows about          |
//! | `update` | rewrites `title`, `version`, `dimensions` present in payload |
//! | `get`    | reads the frame back                                        |
//! | `delete` | unsupported                                                 |

pub mod error;

pub use error::*;

use crate::framework::{
    Action, HandlerContext, HandlerError, HostContext, Outcome, Payload, ResourceHandler,
    ResourceType,
};
use crate::model::FrameValues;
use serde_json::Value;
use tracing::debug;

/// Handler for [`ResourceType::InteractiveFrame`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameHandler;

impl FrameHandler {
    fn seed_values(host: &HostContext) -> FrameValues {
        FrameValues {
            title: host.game_name.clone(),
            version: host.game_version.clone(),
            dimensions: None,
        }
    }
}

impl ResourceHandler for FrameHandler {
    fn resource_type(&self) -> ResourceType {
        ResourceType::InteractiveFrame
    }

    fn handle(
        &self,
        action: Action,
        payload: &Payload,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<Outcome, HandlerError> {
        let frame = &mut ctx.model.frame;
        match action {
            Action::Create => {
                let changed = frame.apply(Self::seed_values(ctx.host));
                debug!(title = %frame.title, version = %frame.version, changed, "Frame seeded");
                Ok(Outcome::ok().mutated(changed))
            }
            Action::Update => {
                let values: FrameValues = serde_json::from_value(Value::Object(payload.clone()))
                    .map_err(|e| FrameError::InvalidPayload(e.to_string()))?;
                let changed = frame.apply(values);
                debug!(changed, "Frame updated");
                Ok(Outcome::ok().mutated(changed))
            }
            Action::Get => {
                let values = serde_json::to_value(&*frame)
                    .map_err(|e| FrameError::InvalidPayload(e.to_string()))?;
                Ok(Outcome::ok_with(values))
            }
            Action::Delete => Err(HandlerError::Unsupported {
                resource_type: ResourceType::InteractiveFrame,
                action,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::LocalDocumentController;
    use crate::model::{Dimensions, ResourceModel};
    use serde_json::json;

    fn handle(
        model: &mut ResourceModel,
        host: &HostContext,
        action: Action,
        payload: Value,
    ) -> Result<Outcome, HandlerError> {
        let mut documents = LocalDocumentController::new();
        let mut ctx = HandlerContext {
            model,
            documents: &mut documents,
            host,
        };
        let payload = match payload {
            Value::Object(map) => map,
            _ => Payload::new(),
        };
        FrameHandler.handle(action, &payload, &mut ctx)
    }

    #[test]
    fn create_seeds_from_host() {
        let mut model = ResourceModel::new();
        let host = HostContext {
            game_name: Some("Sampler".into()),
            game_version: Some("1.2".into()),
        };

        let outcome = handle(&mut model, &host, Action::Create, Value::Null).unwrap();
        assert!(outcome.result.success);
        assert!(outcome.mutated);
        assert_eq!(model.frame.title, "Sampler");
        assert_eq!(model.frame.version, "1.2");
    }

    #[test]
    fn create_without_host_context_is_a_no_op() {
        let mut model = ResourceModel::new();
        let host = HostContext::default();
        handle(&mut model, &host, Action::Update, json!({ "title": "Game", "version": "2" })).unwrap();

        let outcome = handle(&mut model, &host, Action::Create, Value::Null).unwrap();
        assert!(outcome.result.success);
        assert!(!outcome.mutated);
        assert_eq!(model.frame.title, "Game");
        assert_eq!(model.frame.version, "2");
    }

    #[test]
    fn create_seeds_only_known_host_fields() {
        let mut model = ResourceModel::new();
        handle(&mut model, &HostContext::default(), Action::Update, json!({ "version": "2" })).unwrap();

        let host = HostContext {
            game_name: Some("Sampler".into()),
            game_version: None,
        };
        let outcome = handle(&mut model, &host, Action::Create, Value::Null).unwrap();
        assert!(outcome.mutated);
        assert_eq!(model.frame.title, "Sampler");
        assert_eq!(model.frame.version, "2");
    }

    #[test]
    fn update_then_get() {
        let mut model = ResourceModel::new();
        let host = HostContext::default();
        let outcome = handle(
            &mut model,
            &host,
            Action::Update,
            json!({ "title": "Game", "dimensions": { "width": 320.0, "height": 240.0 } }),
        )
        .unwrap();
        assert!(outcome.mutated);
        assert_eq!(
            model.frame.dimensions,
            Some(Dimensions {
                width: 320.0,
                height: 240.0
            })
        );

        let outcome = handle(&mut model, &host, Action::Get, Value::Null).unwrap();
        assert_eq!(
            outcome.result.values,
            Some(json!({
                "title": "Game",
                "version": "",
                "dimensions": { "width": 320.0, "height": 240.0 }
            }))
        );
    }

    #[test]
    fn update_with_bad_payload_fails() {
        let mut model = ResourceModel::new();
        let err = handle(&mut model, &HostContext::default(), Action::Update, json!({ "title": 7 }))
            .unwrap_err();
        assert!(matches!(err, HandlerError::Frame(FrameError::InvalidPayload(_))));
    }

    #[test]
    fn delete_is_unsupported() {
        let mut model = ResourceModel::new();
        let err = handle(&mut model, &HostContext::default(), Action::Delete, Value::Null).unwrap_err();
        assert_eq!(
            err,
            HandlerError::Unsupported {
                resource_type: ResourceType::InteractiveFrame,
                action: Action::Delete,
            }
        );
    }
}
