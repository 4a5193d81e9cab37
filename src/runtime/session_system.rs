use crate::clients::SessionClient;
use crate::document::{DocumentController, LocalDocumentController};
use crate::framework::BridgeError;
use crate::runtime::config::BridgeConfig;
use crate::runtime::session_actor::SessionActor;
use crate::session::InteractiveSession;
use tracing::{error, info};

/// Owns a running session actor and the client used to reach it.
///
/// # Example
///
/// ```ignore
/// let system = SessionSystem::start(BridgeConfig::default())?;
/// let result = system.client.send_command(message).await?;
/// system.shutdown().await?;
/// ```
pub struct SessionSystem {
    pub client: SessionClient,
    handle: tokio::task::JoinHandle<()>,
}

impl SessionSystem {
    /// Starts a session backed by an in-memory [`LocalDocumentController`].
    pub fn start(config: BridgeConfig) -> Result<Self, BridgeError> {
        Self::start_with(config, LocalDocumentController::new())
    }

    /// Starts a session whose data contexts are materialised by `documents`.
    ///
    /// # Errors
    /// Fails before spawning anything if the session's router cannot be built.
    pub fn start_with<D>(config: BridgeConfig, documents: D) -> Result<Self, BridgeError>
    where
        D: DocumentController + 'static,
    {
        let session = InteractiveSession::new(documents, config.host)?;
        let (actor, client) = SessionActor::new(config.channel_capacity, session);
        let handle = tokio::spawn(actor.run());
        Ok(Self { client, handle })
    }

    /// Drops the client and waits for the actor to destroy its session.
    ///
    /// Clones of the client held elsewhere keep the actor alive until they are dropped too.
    pub async fn shutdown(self) -> Result<(), BridgeError> {
        info!("Shutting down session...");
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Session task failed: {:?}", e);
            return Err(BridgeError::SessionTask(e.to_string()));
        }

        info!("Session shutdown complete.");
        Ok(())
    }
}
