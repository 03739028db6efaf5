//! Folder repository contract and SQLite implementation.
//!
//! # Invariants
//! - Folder names are unique; violations surface as `RepoError::Duplicate`.
//! - Deleting a folder never touches notes referencing it.

use crate::model::folder::Folder;
use crate::model::id::EntityId;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::named::{self, NamedRow};
use rusqlite::Connection;

const FOLDERS_TABLE: &str = "folders";

/// Repository interface for folder CRUD.
pub trait FolderRepository {
    /// Lists all folders sorted by name.
    fn find_folders(&self) -> RepoResult<Vec<Folder>>;
    fn find_folder(&self, id: &EntityId) -> RepoResult<Option<Folder>>;
    /// Inserts one folder; the store assigns id and timestamps.
    fn insert_folder(&self, name: &str) -> RepoResult<Folder>;
    fn rename_folder(&self, id: &EntityId, name: &str) -> RepoResult<()>;
    fn delete_folder(&self, id: &EntityId) -> RepoResult<()>;
}

/// SQLite-backed folder repository.
pub struct SqliteFolderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFolderRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        if !named::table_exists(conn, FOLDERS_TABLE)? {
            return Err(RepoError::MissingRequiredTable(FOLDERS_TABLE));
        }
        Ok(Self { conn })
    }
}

impl FolderRepository for SqliteFolderRepository<'_> {
    fn find_folders(&self) -> RepoResult<Vec<Folder>> {
        let rows = named::find_all(self.conn, FOLDERS_TABLE)?;
        Ok(rows.into_iter().map(Folder::from).collect())
    }

    fn find_folder(&self, id: &EntityId) -> RepoResult<Option<Folder>> {
        Ok(named::find_one(self.conn, FOLDERS_TABLE, id)?.map(Folder::from))
    }

    fn insert_folder(&self, name: &str) -> RepoResult<Folder> {
        named::insert(self.conn, FOLDERS_TABLE, name).map(Folder::from)
    }

    fn rename_folder(&self, id: &EntityId, name: &str) -> RepoResult<()> {
        named::rename(self.conn, FOLDERS_TABLE, id, name)
    }

    fn delete_folder(&self, id: &EntityId) -> RepoResult<()> {
        named::delete(self.conn, FOLDERS_TABLE, id)
    }
}

impl From<NamedRow> for Folder {
    fn from(row: NamedRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
