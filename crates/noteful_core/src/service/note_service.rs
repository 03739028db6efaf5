//! Note use-case service.
//!
//! # Responsibility
//! - Provide note list/get/create/update/replace/delete APIs.
//! - Run id validation and integrity checks before touching the store.
//!
//! # Invariants
//! - `update_note` writes only supplied fields (field-set, not overwrite).
//! - `replace_note` requires a title and clears omitted fields.
//! - Listing is sorted by `created_at ASC` regardless of filters.

use crate::integrity::{
    ensure_id_matches, parse_target_id, validate_note_payload, PayloadMode, ValidationError,
};
use crate::model::id::EntityId;
use crate::model::note::{Note, NotePayload};
use crate::query::filter::{build_note_filter, NoteListParams};
use crate::repo::note_repo::NoteRepository;
use crate::service::error::{EntityKind, ServiceError, ServiceResult};
use log::{debug, info};

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists notes matching optional search term, folder and tag filters.
    pub fn list_notes(&self, params: &NoteListParams) -> ServiceResult<Vec<Note>> {
        let query = build_note_filter(params)?;
        let notes = self
            .repo
            .find_notes(&query)
            .map_err(|err| ServiceError::from_repo(EntityKind::Note, err))?;
        debug!(
            "event=note_list module=service status=ok clauses={} count={}",
            query.filter.clauses().len(),
            notes.len()
        );
        Ok(notes)
    }

    /// Gets one note by id.
    pub fn get_note(&self, id: &str) -> ServiceResult<Note> {
        let id = parse_target_id(id)?;
        self.load(&id)
    }

    /// Creates one note. Title is required; references are checked for syntax.
    pub fn create_note(&self, payload: &NotePayload) -> ServiceResult<Note> {
        let doc = validate_note_payload(payload, PayloadMode::Create)?
            .into_document()
            .ok_or(ValidationError::MissingField("title"))?;
        let note = self
            .repo
            .insert_note(&doc)
            .map_err(|err| ServiceError::from_repo(EntityKind::Note, err))?;
        info!(
            "event=note_create module=service status=ok note_id={} tags={}",
            note.id,
            note.tags.len()
        );
        Ok(note)
    }

    /// Partially updates one note; omitted fields stay untouched.
    ///
    /// An empty `folderId` detaches the note from its folder.
    pub fn update_note(&self, id: &str, payload: &NotePayload) -> ServiceResult<Note> {
        self.write(id, payload, PayloadMode::Patch)
    }

    /// Fully replaces one note's client fields.
    pub fn replace_note(&self, id: &str, payload: &NotePayload) -> ServiceResult<Note> {
        self.write(id, payload, PayloadMode::Replace)
    }

    /// Deletes one note by id.
    pub fn delete_note(&self, id: &str) -> ServiceResult<()> {
        let id = parse_target_id(id)?;
        self.repo
            .delete_note(&id)
            .map_err(|err| ServiceError::from_repo(EntityKind::Note, err))?;
        info!("event=note_delete module=service status=ok note_id={}", id);
        Ok(())
    }

    fn write(&self, id: &str, payload: &NotePayload, mode: PayloadMode) -> ServiceResult<Note> {
        let id = parse_target_id(id)?;
        ensure_id_matches(&id, payload.id.as_deref())?;
        let fields = validate_note_payload(payload, mode)?;
        self.repo
            .update_note(&id, &fields)
            .map_err(|err| ServiceError::from_repo(EntityKind::Note, err))?;
        info!(
            "event=note_update module=service status=ok note_id={} mode={:?}",
            id, mode
        );
        self.load(&id)
    }

    fn load(&self, id: &EntityId) -> ServiceResult<Note> {
        self.repo
            .find_note(id)
            .map_err(|err| ServiceError::from_repo(EntityKind::Note, err))?
            .ok_or_else(|| ServiceError::NotFound {
                kind: EntityKind::Note,
                id: id.clone(),
            })
    }
}
