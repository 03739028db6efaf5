//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define one CRUD contract per entity collection (note, folder, tag).
//! - Isolate SQL details from integrity checks and service orchestration.
//!
//! # Invariants
//! - Repositories assign ids and timestamps; callers never supply them.
//! - Update/delete on an absent id returns `RepoError::NotFound`.
//! - Duplicate-key failures are classified as `RepoError::Duplicate`.

pub mod error;
pub mod folder_repo;
mod named;
pub mod note_repo;
pub mod tag_repo;

/// Current time in epoch milliseconds, evaluated by SQLite.
pub(crate) const NOW_MS_SQL: &str = "(CAST((julianday('now') - 2440587.5) * 86400000 AS INTEGER))";
