//! Folder use-case service.
//!
//! # Invariants
//! - Duplicate names surface as `ServiceError::Conflict`.
//! - Deleting a folder leaves notes that reference it untouched.

use crate::integrity::{ensure_id_matches, parse_target_id, validate_name_payload};
use crate::model::folder::Folder;
use crate::model::tag::NamePayload;
use crate::repo::error::RepoError;
use crate::repo::folder_repo::FolderRepository;
use crate::service::error::{EntityKind, ServiceError, ServiceResult};
use log::info;

/// Folder service facade over repository implementations.
pub struct FolderService<R: FolderRepository> {
    repo: R,
}

impl<R: FolderRepository> FolderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all folders sorted by name.
    pub fn list_folders(&self) -> ServiceResult<Vec<Folder>> {
        self.repo.find_folders().map_err(store_error)
    }

    pub fn get_folder(&self, id: &str) -> ServiceResult<Folder> {
        let id = parse_target_id(id)?;
        self.repo
            .find_folder(&id)
            .map_err(store_error)?
            .ok_or(ServiceError::NotFound {
                kind: EntityKind::Folder,
                id,
            })
    }

    pub fn create_folder(&self, payload: &NamePayload) -> ServiceResult<Folder> {
        let name = validate_name_payload(payload)?;
        let folder = self.repo.insert_folder(&name).map_err(store_error)?;
        info!(
            "event=folder_create module=service status=ok folder_id={}",
            folder.id
        );
        Ok(folder)
    }

    /// Renames one folder. `name` is required.
    pub fn update_folder(&self, id: &str, payload: &NamePayload) -> ServiceResult<Folder> {
        let id = parse_target_id(id)?;
        ensure_id_matches(&id, payload.id.as_deref())?;
        let name = validate_name_payload(payload)?;
        self.repo.rename_folder(&id, &name).map_err(store_error)?;
        info!("event=folder_update module=service status=ok folder_id={}", id);
        self.repo
            .find_folder(&id)
            .map_err(store_error)?
            .ok_or(ServiceError::InconsistentState(
                "updated folder not found in read-back",
            ))
    }

    /// Deletes one folder; referencing notes keep their `folder_id`.
    pub fn delete_folder(&self, id: &str) -> ServiceResult<()> {
        let id = parse_target_id(id)?;
        self.repo.delete_folder(&id).map_err(store_error)?;
        info!("event=folder_delete module=service status=ok folder_id={}", id);
        Ok(())
    }
}

fn store_error(err: RepoError) -> ServiceError {
    ServiceError::from_repo(EntityKind::Folder, err)
}
