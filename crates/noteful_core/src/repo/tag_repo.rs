//! Tag repository contract and SQLite implementation.
//!
//! # Invariants
//! - Tag names are unique; violations surface as `RepoError::Duplicate`.
//! - Deleting a tag row does not touch notes; the cascade lives in `integrity`.

use crate::model::id::EntityId;
use crate::model::tag::Tag;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::named::{self, NamedRow};
use rusqlite::Connection;

const TAGS_TABLE: &str = "tags";

/// Repository interface for tag CRUD.
pub trait TagRepository {
    /// Lists all tags sorted by name.
    fn find_tags(&self) -> RepoResult<Vec<Tag>>;
    fn find_tag(&self, id: &EntityId) -> RepoResult<Option<Tag>>;
    /// Inserts one tag; the store assigns id and timestamps.
    fn insert_tag(&self, name: &str) -> RepoResult<Tag>;
    fn rename_tag(&self, id: &EntityId, name: &str) -> RepoResult<()>;
    fn delete_tag(&self, id: &EntityId) -> RepoResult<()>;
}

/// SQLite-backed tag repository.
pub struct SqliteTagRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTagRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        if !named::table_exists(conn, TAGS_TABLE)? {
            return Err(RepoError::MissingRequiredTable(TAGS_TABLE));
        }
        Ok(Self { conn })
    }
}

impl TagRepository for SqliteTagRepository<'_> {
    fn find_tags(&self) -> RepoResult<Vec<Tag>> {
        let rows = named::find_all(self.conn, TAGS_TABLE)?;
        Ok(rows.into_iter().map(Tag::from).collect())
    }

    fn find_tag(&self, id: &EntityId) -> RepoResult<Option<Tag>> {
        Ok(named::find_one(self.conn, TAGS_TABLE, id)?.map(Tag::from))
    }

    fn insert_tag(&self, name: &str) -> RepoResult<Tag> {
        named::insert(self.conn, TAGS_TABLE, name).map(Tag::from)
    }

    fn rename_tag(&self, id: &EntityId, name: &str) -> RepoResult<()> {
        named::rename(self.conn, TAGS_TABLE, id, name)
    }

    fn delete_tag(&self, id: &EntityId) -> RepoResult<()> {
        named::delete(self.conn, TAGS_TABLE, id)
    }
}

impl From<NamedRow> for Tag {
    fn from(row: NamedRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
