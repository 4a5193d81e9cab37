//! # Protocol Messages
//!
//! The typed form of a plugin command ([`Message`]) and of its reply ([`CommandResult`]).
//!
//! Plugins send loosely shaped JSON:
//!
//! ```json
//! { "action": "create", "what": { "type": "dataContext" }, "values": { "title": "T" } }
//! ```
//!
//! [`Message::from_value`] validates that shape once, at the edge, so handlers only
//! ever see closed [`Action`] and [`ResourceType`] tags.

use crate::framework::error::BridgeError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The `values` object of a message.
pub type Payload = Map<String, Value>;

/// The operation a plugin asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Update,
    Get,
    Delete,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Get => "get",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "get" => Ok(Action::Get),
            "delete" => Ok(Action::Delete),
            other => Err(BridgeError::MalformedMessage(format!(
                "unknown action `{other}`"
            ))),
        }
    }
}

/// The category of host-owned object a message addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceType {
    InteractiveFrame,
    DataContext,
}

impl ResourceType {
    pub const ALL: [ResourceType; 2] = [ResourceType::InteractiveFrame, ResourceType::DataContext];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::InteractiveFrame => "interactiveFrame",
            ResourceType::DataContext => "dataContext",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| BridgeError::UnknownResourceType(s.to_string()))
    }
}

/// A validated plugin command.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub action: Action,
    pub resource_type: ResourceType,
    pub payload: Payload,
}

impl Message {
    pub fn new(action: Action, resource_type: ResourceType) -> Self {
        Self {
            action,
            resource_type,
            payload: Payload::new(),
        }
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Validates a deserialized wire message.
    ///
    /// # Errors
    /// - [`BridgeError::MalformedMessage`] when `action` or `what.type` is missing,
    ///   the action is not one of `create|update|get|delete`, or `values` is not an object.
    /// - [`BridgeError::UnknownResourceType`] when `what.type` names no known resource.
    pub fn from_value(value: Value) -> Result<Self, BridgeError> {
        let raw: RawMessage = serde_json::from_value(value)
            .map_err(|e| BridgeError::MalformedMessage(e.to_string()))?;

        let action = raw
            .action
            .ok_or_else(|| BridgeError::MalformedMessage("missing `action`".into()))?
            .parse::<Action>()?;
        let resource_type = raw
            .what
            .and_then(|what| what.kind)
            .ok_or_else(|| BridgeError::MalformedMessage("missing `what.type`".into()))?
            .parse::<ResourceType>()?;
        let values = raw.values.filter(|v| !v.is_null()).or(raw.value);
        let payload = match values {
            None | Some(Value::Null) => Payload::new(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(BridgeError::MalformedMessage(format!(
                    "`values` must be an object, got {other}"
                )))
            }
        };

        Ok(Self {
            action,
            resource_type,
            payload,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    action: Option<String>,
    what: Option<RawTarget>,
    values: Option<Value>,
    // Older plugins send `value`; `values` wins when both are present.
    value: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawTarget {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// The reply handed to the plugin's callback.
///
/// `Default` is the failure reply every path starts from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Value>,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            success: true,
            values: None,
        }
    }

    pub fn failure() -> Self {
        Self::default()
    }

    pub fn with_values(mut self, values: Value) -> Self {
        self.values = Some(values);
        self
    }
}
