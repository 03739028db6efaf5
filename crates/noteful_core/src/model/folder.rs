//! Folder domain model.

use crate::model::id::EntityId;
use serde::{Deserialize, Serialize};

/// Named grouping referenced by notes through `folder_id`.
///
/// Names are unique across all folders (enforced by the store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: EntityId,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}
