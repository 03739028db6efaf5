//! Tag use-case service.
//!
//! # Invariants
//! - Duplicate names surface as `ServiceError::Conflict`.
//! - Deleting a tag runs the cascade: the id is pulled from every note.
//! - A cascade that deletes the tag but fails the pull is reported as
//!   `CascadeIncomplete`; the tag stays deleted.

use crate::integrity::{
    ensure_id_matches, on_tag_deleted, parse_target_id, validate_name_payload, CascadeOutcome,
};
use crate::model::tag::{NamePayload, Tag};
use crate::repo::error::RepoError;
use crate::repo::note_repo::NoteRepository;
use crate::repo::tag_repo::TagRepository;
use crate::service::error::{EntityKind, ServiceError, ServiceResult};
use log::info;

/// Tag service facade; holds the note repository for the delete cascade.
pub struct TagService<T: TagRepository, N: NoteRepository> {
    tags: T,
    notes: N,
}

impl<T: TagRepository, N: NoteRepository> TagService<T, N> {
    pub fn new(tags: T, notes: N) -> Self {
        Self { tags, notes }
    }

    /// Lists all tags sorted by name.
    pub fn list_tags(&self) -> ServiceResult<Vec<Tag>> {
        self.tags.find_tags().map_err(store_error)
    }

    pub fn get_tag(&self, id: &str) -> ServiceResult<Tag> {
        let id = parse_target_id(id)?;
        self.tags
            .find_tag(&id)
            .map_err(store_error)?
            .ok_or(ServiceError::NotFound {
                kind: EntityKind::Tag,
                id,
            })
    }

    pub fn create_tag(&self, payload: &NamePayload) -> ServiceResult<Tag> {
        let name = validate_name_payload(payload)?;
        let tag = self.tags.insert_tag(&name).map_err(store_error)?;
        info!("event=tag_create module=service status=ok tag_id={}", tag.id);
        Ok(tag)
    }

    /// Renames one tag. `name` is required.
    pub fn update_tag(&self, id: &str, payload: &NamePayload) -> ServiceResult<Tag> {
        let id = parse_target_id(id)?;
        ensure_id_matches(&id, payload.id.as_deref())?;
        let name = validate_name_payload(payload)?;
        self.tags.rename_tag(&id, &name).map_err(store_error)?;
        info!("event=tag_update module=service status=ok tag_id={}", id);
        self.tags
            .find_tag(&id)
            .map_err(store_error)?
            .ok_or(ServiceError::InconsistentState(
                "updated tag not found in read-back",
            ))
    }

    /// Deletes one tag and removes its id from every note's tags.
    pub fn delete_tag(&self, id: &str) -> ServiceResult<CascadeOutcome> {
        let id = parse_target_id(id)?;
        Ok(on_tag_deleted(&self.tags, &self.notes, &id)?)
    }
}

fn store_error(err: RepoError) -> ServiceError {
    ServiceError::from_repo(EntityKind::Tag, err)
}
