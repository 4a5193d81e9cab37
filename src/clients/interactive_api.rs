use crate::framework::{Action, BridgeError, CommandResult, ResourceType};
use crate::model::{DataContextUpdate, DataContextValues, FrameValues};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

/// Typed plugin-side operations built on a single `send_command`.
///
/// Implementors only provide the transport; the per-resource helpers are inherited.
/// Every helper returns the session's reply as-is, so `success: false` is an `Ok`.
#[async_trait]
pub trait InteractiveApi: Send + Sync {
    /// Delivers one wire message and waits for its reply.
    async fn send_command(&self, message: Value) -> Result<CommandResult, BridgeError>;

    async fn create_data_context(
        &self,
        values: DataContextValues,
    ) -> Result<CommandResult, BridgeError> {
        self.send_command(envelope(Action::Create, ResourceType::DataContext, &values)?)
            .await
    }

    async fn update_data_context(
        &self,
        update: DataContextUpdate,
    ) -> Result<CommandResult, BridgeError> {
        self.send_command(envelope(Action::Update, ResourceType::DataContext, &update)?)
            .await
    }

    async fn get_data_context(&self) -> Result<CommandResult, BridgeError> {
        self.send_command(envelope(Action::Get, ResourceType::DataContext, &())?)
            .await
    }

    async fn delete_data_context(&self) -> Result<CommandResult, BridgeError> {
        self.send_command(envelope(Action::Delete, ResourceType::DataContext, &())?)
            .await
    }

    async fn update_frame(&self, values: FrameValues) -> Result<CommandResult, BridgeError> {
        self.send_command(envelope(Action::Update, ResourceType::InteractiveFrame, &values)?)
            .await
    }

    async fn get_frame(&self) -> Result<CommandResult, BridgeError> {
        self.send_command(envelope(Action::Get, ResourceType::InteractiveFrame, &())?)
            .await
    }
}

/// Builds the `{action, what: {type}, values}` wire shape.
pub fn envelope<T: Serialize + ?Sized>(
    action: Action,
    resource_type: ResourceType,
    values: &T,
) -> Result<Value, BridgeError> {
    let values =
        serde_json::to_value(values).map_err(|e| BridgeError::MalformedMessage(e.to_string()))?;
    Ok(json!({
        "action": action,
        "what": { "type": resource_type },
        "values": values,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Message;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<Value>>,
    }

    #[async_trait]
    impl InteractiveApi for Recorder {
        async fn send_command(&self, message: Value) -> Result<CommandResult, BridgeError> {
            self.sent.lock().unwrap().push(message);
            Ok(CommandResult::success())
        }
    }

    #[tokio::test]
    async fn helpers_build_routable_messages() {
        let recorder = Recorder::default();
        recorder
            .update_data_context(DataContextUpdate {
                title: Some("X".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        recorder.get_frame().await.unwrap();

        let sent = recorder.sent.lock().unwrap();
        let update = Message::from_value(sent[0].clone()).unwrap();
        assert_eq!(update.action, Action::Update);
        assert_eq!(update.resource_type, ResourceType::DataContext);
        assert_eq!(update.payload["title"], json!("X"));

        let get = Message::from_value(sent[1].clone()).unwrap();
        assert_eq!(get.resource_type, ResourceType::InteractiveFrame);
        assert!(get.payload.is_empty());
    }
}
