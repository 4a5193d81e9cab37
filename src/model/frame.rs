use serde::{Deserialize, Serialize};

/// Metadata of the frame hosting the plugin.
///
/// Exists for the whole session and starts with empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub title: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
}

/// The size a plugin declares for its frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// Payload for frame updates. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
}

impl Frame {
    /// Applies the fields present in `values` and reports whether anything changed.
    pub fn apply(&mut self, values: FrameValues) -> bool {
        let mut changed = false;
        if let Some(title) = values.title {
            changed |= self.title != title;
            self.title = title;
        }
        if let Some(version) = values.version {
            changed |= self.version != version;
            self.version = version;
        }
        if let Some(dimensions) = values.dimensions {
            changed |= self.dimensions != Some(dimensions);
            self.dimensions = Some(dimensions);
        }
        changed
    }
}
