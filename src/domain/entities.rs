//! Domain entities: core data structures

use serde::Serialize;
use serde_json::Value;

/// Identifiers of a layer inside a design file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileLocator {
    /// Numeric design file id, e.g. "155675508499265"
    pub file_id: String,
    /// Layer id, e.g. "158:0002"
    pub layer_id: String,
}

impl FileLocator {
    pub fn new(file_id: impl Into<String>, layer_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            layer_id: layer_id.into(),
        }
    }
}

/// What the user asked for: a share URL (full or short) or explicit ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Url(String),
    Ids(FileLocator),
}

/// A navigation interaction declared on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEdge {
    /// Id of the node carrying the interaction (absent when the node has no string id)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    pub target_layer_id: String,
}

/// A page entry from the meta document: `<action title=".." layerId=".."/>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaAction {
    pub title: String,
    pub layer_id: String,
}

/// Text content of a `TEXT` node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEntry {
    pub id: Option<String>,
    pub name: Option<String>,
    pub text: String,
}

/// A design token from the root's `localStyleMap`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignToken {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Value,
}
