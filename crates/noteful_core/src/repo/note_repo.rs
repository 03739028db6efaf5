//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide note persistence on top of `notes` + `note_tags`.
//! - Translate `NoteQuery` filter and sort order into SQL.
//! - Own the tag "pull" used by the tag-delete cascade.
//!
//! # Invariants
//! - Field-set updates write only the fields they carry, plus `updated_at`.
//! - A note's tag sequence is read back in insertion (`position`) order.
//! - Each write runs in one transaction, so every note changes atomically.

use crate::model::id::EntityId;
use crate::model::note::{FieldChange, Note, NoteDocument, NoteFieldSet};
use crate::query::filter::{NoteFilterClause, NoteQuery, SortKey, SortOrder};
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::named::{parse_id, table_exists};
use crate::repo::NOW_MS_SQL;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    folder_id,
    created_at,
    updated_at
FROM notes";

/// Repository interface for note operations.
pub trait NoteRepository {
    /// Finds notes matching the query's filter, in the query's sort order.
    fn find_notes(&self, query: &NoteQuery) -> RepoResult<Vec<Note>>;
    fn find_note(&self, id: &EntityId) -> RepoResult<Option<Note>>;
    /// Inserts one note; the store assigns id and timestamps.
    fn insert_note(&self, doc: &NoteDocument) -> RepoResult<Note>;
    /// Applies a field-set to one note.
    fn update_note(&self, id: &EntityId, fields: &NoteFieldSet) -> RepoResult<()>;
    fn delete_note(&self, id: &EntityId) -> RepoResult<()>;
    /// Removes every occurrence of `tag_id` from every note's tags.
    ///
    /// Returns the number of notes changed.
    fn pull_tag(&self, tag_id: &EntityId) -> RepoResult<usize>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        for table in ["notes", "note_tags"] {
            if !table_exists(conn, table)? {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn find_notes(&self, query: &NoteQuery) -> RepoResult<Vec<Note>> {
        let mut sql = format!("{NOTE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        for clause in query.filter.clauses() {
            match clause {
                NoteFilterClause::TextMatches(pattern) => {
                    sql.push_str(" AND (title REGEXP ? OR content REGEXP ?)");
                    let source = pattern.regex_source();
                    bind_values.push(Value::Text(source.clone()));
                    bind_values.push(Value::Text(source));
                }
                NoteFilterClause::FolderEquals(folder_id) => {
                    sql.push_str(" AND folder_id = ?");
                    bind_values.push(Value::Text(folder_id.to_string()));
                }
                NoteFilterClause::TagsContain(tag_id) => {
                    sql.push_str(
                        " AND EXISTS (
                            SELECT 1
                            FROM note_tags nt
                            WHERE nt.note_id = notes.id
                              AND nt.tag_id = ?
                        )",
                    );
                    bind_values.push(Value::Text(tag_id.to_string()));
                }
            }
        }

        let column = match query.sort.key {
            SortKey::CreatedAt => "created_at",
        };
        let direction = match query.sort.order {
            SortOrder::Ascending => "ASC",
        };
        // rowid keeps insertion order stable for equal timestamps.
        sql.push_str(&format!(" ORDER BY {column} {direction}, rowid {direction}"));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(self.conn, row)?);
        }

        Ok(notes)
    }

    fn find_note(&self, id: &EntityId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.as_str()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(self.conn, row)?));
        }

        Ok(None)
    }

    fn insert_note(&self, doc: &NoteDocument) -> RepoResult<Note> {
        let id = EntityId::generate();
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO notes (id, title, content, folder_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                id.as_str(),
                doc.title.as_str(),
                doc.content.as_deref(),
                doc.folder_id.as_ref().map(EntityId::as_str),
            ],
        )?;
        write_tags(&tx, &id, &doc.tags)?;
        tx.commit()?;

        self.find_note(&id)?
            .ok_or_else(|| RepoError::InvalidData(format!("inserted note `{id}` missing")))
    }

    fn update_note(&self, id: &EntityId, fields: &NoteFieldSet) -> RepoResult<()> {
        let mut assignments: Vec<&'static str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(title) = fields.title.as_ref() {
            assignments.push("title = ?");
            bind_values.push(Value::Text(title.clone()));
        }
        match &fields.content {
            FieldChange::Keep => {}
            FieldChange::Set(content) => {
                assignments.push("content = ?");
                bind_values.push(Value::Text(content.clone()));
            }
            FieldChange::Clear => assignments.push("content = NULL"),
        }
        match &fields.folder_id {
            FieldChange::Keep => {}
            FieldChange::Set(folder_id) => {
                assignments.push("folder_id = ?");
                bind_values.push(Value::Text(folder_id.to_string()));
            }
            FieldChange::Clear => assignments.push("folder_id = NULL"),
        }

        let mut sql = String::from("UPDATE notes SET ");
        for assignment in assignments {
            sql.push_str(assignment);
            sql.push_str(", ");
        }
        sql.push_str(&format!("updated_at = {NOW_MS_SQL} WHERE id = ?;"));
        bind_values.push(Value::Text(id.to_string()));

        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::NotFound(id.clone()));
        }
        if let Some(tags) = fields.tags.as_ref() {
            tx.execute("DELETE FROM note_tags WHERE note_id = ?1;", [id.as_str()])?;
            write_tags(&tx, id, tags)?;
        }
        tx.commit()?;

        Ok(())
    }

    fn delete_note(&self, id: &EntityId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id.as_str()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id.clone()));
        }

        Ok(())
    }

    fn pull_tag(&self, tag_id: &EntityId) -> RepoResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let touched = tx.execute(
            &format!(
                "UPDATE notes
                 SET updated_at = {NOW_MS_SQL}
                 WHERE id IN (SELECT note_id FROM note_tags WHERE tag_id = ?1);"
            ),
            [tag_id.as_str()],
        )?;
        tx.execute("DELETE FROM note_tags WHERE tag_id = ?1;", [tag_id.as_str()])?;
        tx.commit()?;

        Ok(touched)
    }
}

fn write_tags(conn: &Connection, note_id: &EntityId, tags: &[EntityId]) -> RepoResult<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO note_tags (note_id, position, tag_id)
         VALUES (?1, ?2, ?3);",
    )?;
    for (position, tag_id) in tags.iter().enumerate() {
        stmt.execute(params![note_id.as_str(), position as i64, tag_id.as_str()])?;
    }
    Ok(())
}

fn load_tags_for_note(conn: &Connection, note_id: &str) -> RepoResult<Vec<EntityId>> {
    let mut stmt = conn.prepare(
        "SELECT tag_id
         FROM note_tags
         WHERE note_id = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([note_id])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        tags.push(parse_id("note_tags.tag_id", row.get(0)?)?);
    }
    Ok(tags)
}

fn parse_note_row(conn: &Connection, row: &Row<'_>) -> RepoResult<Note> {
    let id_text: String = row.get("id")?;
    let tags = load_tags_for_note(conn, &id_text)?;
    let folder_id = match row.get::<_, Option<String>>("folder_id")? {
        Some(value) => Some(parse_id("notes.folder_id", value)?),
        None => None,
    };

    Ok(Note {
        id: parse_id("notes.id", id_text)?,
        title: row.get("title")?,
        content: row.get("content")?,
        folder_id,
        tags,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
