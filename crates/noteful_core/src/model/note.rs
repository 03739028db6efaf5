//! Note domain model, client payload and store-level write shapes.
//!
//! # Responsibility
//! - Define the persisted `Note` read model.
//! - Define the typed client payload used by create/update/replace.
//! - Define the validated write shapes handed to repositories.
//!
//! # Invariants
//! - `folder_id` and every `tags` element are well-formed `EntityId`s.
//! - `None` folder means "no folder"; an invalid reference never reaches here.
//! - `tags` keeps client order; duplicates are preserved.

use crate::model::id::EntityId;
use serde::{Deserialize, Serialize};

/// Persisted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: EntityId,
    pub title: String,
    pub content: Option<String>,
    /// Folder reference. Not guaranteed to resolve.
    pub folder_id: Option<EntityId>,
    /// Ordered tag references. Not guaranteed to resolve.
    pub tags: Vec<EntityId>,
    /// Epoch ms, store-managed.
    pub created_at: i64,
    /// Epoch ms, store-managed.
    pub updated_at: i64,
}

/// Client-supplied note fields.
///
/// Every field is optional so one shape serves create, full replace and
/// partial update; which fields are required depends on the operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePayload {
    /// Optional echo of the target id on update; must match when present.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Empty string on update means "detach from folder".
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl NotePayload {
    /// Payload carrying only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// Per-field write instruction for nullable columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange<T> {
    /// Field omitted by the client; stored value stays untouched.
    Keep,
    /// Field overwritten with a new value.
    Set(T),
    /// Field unset in storage.
    Clear,
}

// Manual impl: the derive would require `T: Default`.
impl<T> Default for FieldChange<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T> FieldChange<T> {
    /// Value to persist on insert, where `Keep` and `Clear` both mean unset.
    pub fn into_initial(self) -> Option<T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Keep | Self::Clear => None,
        }
    }

    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

/// Validated field-set for note writes.
///
/// Produced only by the integrity checker; repositories apply it verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFieldSet {
    pub title: Option<String>,
    pub content: FieldChange<String>,
    pub folder_id: FieldChange<EntityId>,
    /// `Some` replaces the whole tag sequence.
    pub tags: Option<Vec<EntityId>>,
}

impl NoteFieldSet {
    /// Returns whether applying this field-set would change no client field.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_keep()
            && self.folder_id.is_keep()
            && self.tags.is_none()
    }

    /// Converts into an insertable document. `None` when the title is missing.
    pub fn into_document(self) -> Option<NoteDocument> {
        Some(NoteDocument {
            title: self.title?,
            content: self.content.into_initial(),
            folder_id: self.folder_id.into_initial(),
            tags: self.tags.unwrap_or_default(),
        })
    }
}

/// Insertable note document; id and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDocument {
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<EntityId>,
    pub tags: Vec<EntityId>,
}
