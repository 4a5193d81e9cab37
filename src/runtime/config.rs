//! Runtime configuration.
//!
//! Loaded from the JSON file named by `INTERACTIVE_BRIDGE_CONFIG`; every field has a
//! default so an absent variable or a partial file both work.
//!
//! ```json
//! { "channel_capacity": 64, "host": { "game_name": "Sampler", "game_version": "2.1" } }
//! ```

use crate::framework::{BridgeError, HostContext};
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_ENV: &str = "INTERACTIVE_BRIDGE_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Pending commands the session actor will queue before senders wait.
    pub channel_capacity: usize,
    /// What the host knows about the plugin it embeds.
    pub host: HostContext,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
            host: HostContext::default(),
        }
    }
}

impl BridgeConfig {
    pub fn from_json_str(text: &str) -> Result<Self, BridgeError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| BridgeError::Config(e.to_string()))?;
        if config.channel_capacity == 0 {
            return Err(BridgeError::Config("channel_capacity must be positive".into()));
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BridgeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| BridgeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Reads the file named by [`CONFIG_ENV`], or returns the defaults if it is unset.
    pub fn from_env() -> Result<Self, BridgeError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = BridgeConfig::from_json_str(r#"{ "host": { "game_name": "Sampler" } }"#).unwrap();
        assert_eq!(config.channel_capacity, 32);
        assert_eq!(config.host.game_name.as_deref(), Some("Sampler"));
        assert_eq!(config.host.game_version, None);
    }

    #[test]
    fn rejects_zero_capacity_and_bad_json() {
        assert!(matches!(
            BridgeConfig::from_json_str(r#"{ "channel_capacity": 0 }"#),
            Err(BridgeError::Config(_))
        ));
        assert!(matches!(
            BridgeConfig::from_json_str("channel_capacity = 4"),
            Err(BridgeError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        assert!(matches!(
            BridgeConfig::load("/nonexistent/bridge.json"),
            Err(BridgeError::Config(_))
        ));
    }
}
