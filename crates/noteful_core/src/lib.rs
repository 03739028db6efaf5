//! Core data model and integrity/query engine for notes, folders and tags.
//! This crate is the single source of truth for referential-integrity rules.

pub mod config;
pub mod db;
pub mod integrity;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use integrity::{
    on_tag_deleted, validate_note_payload, CascadeError, CascadeOutcome, CascadeResult,
    PayloadMode, ReferenceKind, ValidationError,
};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::folder::Folder;
pub use model::id::{is_valid_id, EntityId};
pub use model::note::{FieldChange, Note, NoteDocument, NoteFieldSet, NotePayload};
pub use model::tag::{NamePayload, Tag};
pub use query::filter::{
    build_note_filter, NoteFilter, NoteFilterClause, NoteListParams, NoteQuery, SearchPattern,
    SortKey, SortOrder, SortSpec,
};
pub use repo::error::{RepoError, RepoResult};
pub use repo::folder_repo::{FolderRepository, SqliteFolderRepository};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::tag_repo::{SqliteTagRepository, TagRepository};
pub use service::error::{EntityKind, ServiceError, ServiceErrorKind, ServiceResult};
pub use service::folder_service::FolderService;
pub use service::note_service::NoteService;
pub use service::tag_service::TagService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
