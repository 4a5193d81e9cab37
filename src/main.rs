//! # Interactive Bridge demo
//!
//! Starts a session, plays a plugin's data context lifecycle against it and logs each
//! reply. Point `INTERACTIVE_BRIDGE_CONFIG` at a JSON file to change the host context.

use interactive_bridge::clients::InteractiveApi;
use interactive_bridge::framework::BridgeError;
use interactive_bridge::model::{DataContextUpdate, DataContextValues};
use interactive_bridge::runtime::{setup_tracing, BridgeConfig, SessionSystem};
use serde_json::json;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), BridgeError> {
    setup_tracing();

    let config = BridgeConfig::from_env()?;
    info!(?config, "Starting interactive bridge");
    let system = SessionSystem::start(config)?;
    let client = &system.client;

    let span = tracing::info_span!("frame");
    async {
        let reply = client
            .send_command(json!({ "action": "create", "what": { "type": "interactiveFrame" } }))
            .await?;
        info!(success = reply.success, "Frame seeded");
        let frame = client.get_frame().await?;
        info!(values = ?frame.values, "Frame");
        Ok::<_, BridgeError>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("data_context");
    async {
        let values = DataContextValues {
            identifier: Some("ctx1".into()),
            title: Some("T".into()),
            ..Default::default()
        };
        let first = client.create_data_context(values.clone()).await?;
        info!(success = first.success, values = ?first.values, "Create");

        let second = client.create_data_context(values).await?;
        info!(success = second.success, "Second create");

        let deleted = client.delete_data_context().await?;
        info!(success = deleted.success, "Delete");

        let update = client
            .update_data_context(DataContextUpdate {
                title: Some("X".into()),
                ..Default::default()
            })
            .await?;
        info!(success = update.success, "Update after delete");
        Ok::<_, BridgeError>(())
    }
    .instrument(span)
    .await?;

    info!(unsaved = client.has_unsaved_changes().await?, "Before save");
    client.mark_saved().await?;
    info!(unsaved = client.has_unsaved_changes().await?, "After save");

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
