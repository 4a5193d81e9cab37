use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Host-allocated handle of a data context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextId(pub u32);

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named container of data collections owned by a plugin session.
///
/// # Lifecycle
/// Materialised by the [`DocumentController`](crate::document::DocumentController), held in the
/// session's [`ResourceModel`](crate::model::ResourceModel), and handed back to the controller
/// on delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataContext {
    pub id: ContextId,
    pub identifier: String,
    pub title: String,
    pub description: String,
    pub collections: Vec<Collection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: u32,
    pub name: String,
    pub title: String,
}

/// Payload for creating a data context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataContextValues {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub collections: Vec<CollectionValues>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionValues {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Payload for updating a data context.
///
/// Only the top-level properties are writable here; collections go through the
/// collection API, so a `collections` key in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataContextUpdate {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl DataContextUpdate {
    /// Reads each property on its own; a key that is missing or not a string is
    /// skipped without affecting the others.
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        let field = |key: &str| payload.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            identifier: field("identifier"),
            title: field("title"),
            description: field("description"),
        }
    }
}

impl DataContext {
    /// Rewrites the properties carried by `update`, skipping empty strings.
    ///
    /// Returns `true` if any field changed.
    pub fn apply(&mut self, update: DataContextUpdate) -> bool {
        let mut changed = false;
        for (slot, value) in [
            (&mut self.identifier, update.identifier),
            (&mut self.title, update.title),
            (&mut self.description, update.description),
        ] {
            match value {
                Some(value) if !value.is_empty() && *slot != value => {
                    *slot = value;
                    changed = true;
                }
                _ => {}
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> DataContext {
        DataContext {
            id: ContextId(1),
            identifier: "ctx1".into(),
            title: "T".into(),
            description: "D".into(),
            collections: vec![Collection {
                id: 1,
                name: "cases".into(),
                title: "Cases".into(),
            }],
        }
    }

    #[test]
    fn apply_rewrites_only_present_fields() {
        let mut ctx = context();
        let changed = ctx.apply(DataContextUpdate {
            title: Some("X".into()),
            ..Default::default()
        });

        assert!(changed);
        assert_eq!(ctx.title, "X");
        assert_eq!(ctx.identifier, "ctx1");
        assert_eq!(ctx.description, "D");
        assert_eq!(ctx.collections.len(), 1);
    }

    #[test]
    fn update_from_payload_skips_mistyped_fields() {
        let payload = serde_json::json!({ "title": "X", "identifier": 7, "description": null });
        let update = DataContextUpdate::from_payload(payload.as_object().unwrap());
        assert_eq!(
            update,
            DataContextUpdate {
                title: Some("X".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn apply_skips_empty_and_unchanged_values() {
        let mut ctx = context();
        let changed = ctx.apply(DataContextUpdate {
            identifier: Some(String::new()),
            title: Some("T".into()),
            description: None,
        });

        assert!(!changed);
        assert_eq!(ctx, context());
    }
}
