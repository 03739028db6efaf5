//! Referential-integrity checks and the tag-delete cascade.
//!
//! # Responsibility
//! - Validate client payloads before any store call.
//! - Translate note payloads into store field-sets.
//! - Run the tag-delete cascade (tag row delete + pull from notes).
//!
//! # Invariants
//! - References are checked for syntax only; existence is never queried.
//! - An empty `folderId` on update means "detach", distinct from omission.
//! - The cascade issues both sub-operations and never compensates: a failed
//!   pull leaves the tag deleted and stale note references behind.

use crate::model::id::EntityId;
use crate::model::note::{FieldChange, NoteFieldSet, NotePayload};
use crate::model::tag::NamePayload;
use crate::repo::error::RepoError;
use crate::repo::note_repo::NoteRepository;
use crate::repo::tag_repo::TagRepository;
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Kind of entity a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Folder,
    Tag,
}

impl Display for ReferenceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Folder => f.write_str("folder"),
            Self::Tag => f.write_str("tag"),
        }
    }
}

/// Input rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Supplied id is not well-formed.
    InvalidIdentifier(String),
    /// Required field absent or blank.
    MissingField(&'static str),
    /// Folder/tag reference is not well-formed.
    InvalidReference { kind: ReferenceKind, value: String },
    /// Search term is not a valid pattern.
    InvalidSearchTerm { term: String, message: String },
    /// Payload id disagrees with the target id.
    IdMismatch { target: String, payload: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIdentifier(value) => write!(f, "the `id` is not valid: `{value}`"),
            Self::MissingField(field) => write!(f, "Missing `{field}` in request body"),
            Self::InvalidReference { kind, value } => {
                write!(f, "the {kind} reference is not valid: `{value}`")
            }
            Self::InvalidSearchTerm { term, message } => {
                write!(f, "invalid search term `{term}`: {message}")
            }
            Self::IdMismatch { target, payload } => {
                write!(f, "ids do not match: `{target}` vs `{payload}`")
            }
        }
    }
}

impl Error for ValidationError {}

/// Which field rules apply to a note payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadMode {
    /// New note: title required, omitted fields start unset.
    Create,
    /// Full replace: title required, omitted fields are cleared.
    Replace,
    /// Partial update: only supplied fields are written.
    Patch,
}

/// Parses an id supplied for lookup/update/delete.
pub fn parse_target_id(value: &str) -> Result<EntityId, ValidationError> {
    EntityId::parse(value).ok_or_else(|| ValidationError::InvalidIdentifier(value.to_string()))
}

/// Rejects a payload id that disagrees with the target id.
pub fn ensure_id_matches(target: &EntityId, payload_id: Option<&str>) -> Result<(), ValidationError> {
    match payload_id {
        Some(value) if value != target.as_str() => Err(ValidationError::IdMismatch {
            target: target.to_string(),
            payload: value.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Validates a note payload and converts it into a store field-set.
///
/// # Errors
/// - `MissingField("title")` when the title is absent (create/replace) or
///   blank (any mode).
/// - `InvalidReference(Folder)` for a non-empty malformed `folderId`.
/// - `InvalidReference(Tag)` for any malformed tag entry.
pub fn validate_note_payload(
    payload: &NotePayload,
    mode: PayloadMode,
) -> Result<NoteFieldSet, ValidationError> {
    let title = match payload.title.as_deref() {
        Some(title) if title.trim().is_empty() => return Err(ValidationError::MissingField("title")),
        Some(title) => Some(title.to_string()),
        None if mode == PayloadMode::Patch => None,
        None => return Err(ValidationError::MissingField("title")),
    };

    let content = match (payload.content.as_ref(), mode) {
        (Some(content), _) => FieldChange::Set(content.clone()),
        (None, PayloadMode::Replace) => FieldChange::Clear,
        (None, _) => FieldChange::Keep,
    };

    let folder_id = match (payload.folder_id.as_deref(), mode) {
        (Some(""), PayloadMode::Create) => FieldChange::Keep,
        (Some(""), _) => FieldChange::Clear,
        (Some(value), _) => FieldChange::Set(parse_reference(ReferenceKind::Folder, value)?),
        (None, PayloadMode::Replace) => FieldChange::Clear,
        (None, _) => FieldChange::Keep,
    };

    let tags = match (payload.tags.as_ref(), mode) {
        (Some(values), _) => Some(
            values
                .iter()
                .map(|value| parse_reference(ReferenceKind::Tag, value))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        (None, PayloadMode::Replace) => Some(Vec::new()),
        (None, _) => None,
    };

    Ok(NoteFieldSet {
        title,
        content,
        folder_id,
        tags,
    })
}

/// Validates a folder/tag payload and returns the trimmed name.
pub fn validate_name_payload(payload: &NamePayload) -> Result<String, ValidationError> {
    match payload.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(ValidationError::MissingField("name")),
    }
}

fn parse_reference(kind: ReferenceKind, value: &str) -> Result<EntityId, ValidationError> {
    EntityId::parse(value).ok_or_else(|| ValidationError::InvalidReference {
        kind,
        value: value.to_string(),
    })
}

/// Successful tag-delete cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeOutcome {
    pub tag_id: EntityId,
    /// Notes whose tag sequence lost `tag_id`.
    pub notes_updated: usize,
}

/// Failed tag-delete cascade.
#[derive(Debug)]
pub enum CascadeError {
    /// Deleting the tag row failed (including `NotFound`).
    TagDelete(RepoError),
    /// Tag row is gone but removing it from notes failed.
    NotePull { tag_id: EntityId, source: RepoError },
}

impl Display for CascadeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TagDelete(err) => write!(f, "{err}"),
            Self::NotePull { tag_id, source } => write!(
                f,
                "tag {tag_id} deleted but note references were not removed: {source}"
            ),
        }
    }
}

impl Error for CascadeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TagDelete(err) => Some(err),
            Self::NotePull { source, .. } => Some(source),
        }
    }
}

pub type CascadeResult = Result<CascadeOutcome, CascadeError>;

/// Deletes one tag and pulls its id from every note.
///
/// Both sub-operations are always issued; they target disjoint collections
/// and have no ordering dependency. Pulling after a `NotFound` delete also
/// clears references left by an earlier incomplete cascade.
pub fn on_tag_deleted<T, N>(tags: &T, notes: &N, tag_id: &EntityId) -> CascadeResult
where
    T: TagRepository + ?Sized,
    N: NoteRepository + ?Sized,
{
    let deleted = tags.delete_tag(tag_id);
    let pulled = notes.pull_tag(tag_id);

    match (deleted, pulled) {
        (Ok(()), Ok(notes_updated)) => {
            info!(
                "event=tag_cascade module=integrity status=ok tag_id={} notes_updated={}",
                tag_id, notes_updated
            );
            Ok(CascadeOutcome {
                tag_id: tag_id.clone(),
                notes_updated,
            })
        }
        (Ok(()), Err(source)) => {
            warn!(
                "event=tag_cascade module=integrity status=partial tag_id={} error={}",
                tag_id, source
            );
            Err(CascadeError::NotePull {
                tag_id: tag_id.clone(),
                source,
            })
        }
        (Err(err), pulled) => {
            if let Err(pull_err) = pulled {
                warn!(
                    "event=tag_cascade module=integrity status=error stage=pull tag_id={} error={}",
                    tag_id, pull_err
                );
            }
            Err(CascadeError::TagDelete(err))
        }
    }
}
