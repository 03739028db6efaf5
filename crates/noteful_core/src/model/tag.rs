//! Tag domain model and the name payload shared with folders.

use crate::model::id::EntityId;
use serde::{Deserialize, Serialize};

/// Label referenced by notes through their `tags` sequence.
///
/// Names are unique across all tags (enforced by the store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: EntityId,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Client payload for folder and tag create/update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamePayload {
    /// Optional echo of the target id on update; must match when present.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl NamePayload {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }
}
