//! SQL shared by the uniquely-named collections (`folders`, `tags`).
//!
//! Table names are crate-internal constants, never caller input.

use crate::model::id::EntityId;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::NOW_MS_SQL;
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Row shape common to folders and tags.
pub(crate) struct NamedRow {
    pub id: EntityId,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

pub(crate) fn find_all(conn: &Connection, table: &'static str) -> RepoResult<Vec<NamedRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, name, created_at, updated_at
         FROM {table}
         ORDER BY name ASC, id ASC;"
    ))?;
    let mut rows = stmt.query([])?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse_named_row(table, row)?);
    }
    Ok(items)
}

pub(crate) fn find_one(
    conn: &Connection,
    table: &'static str,
    id: &EntityId,
) -> RepoResult<Option<NamedRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, name, created_at, updated_at
         FROM {table}
         WHERE id = ?1;"
    ))?;
    let mut rows = stmt.query([id.as_str()])?;
    match rows.next()? {
        Some(row) => Ok(Some(parse_named_row(table, row)?)),
        None => Ok(None),
    }
}

pub(crate) fn insert(conn: &Connection, table: &'static str, name: &str) -> RepoResult<NamedRow> {
    let id = EntityId::generate();
    conn.execute(
        &format!("INSERT INTO {table} (id, name) VALUES (?1, ?2);"),
        params![id.as_str(), name],
    )?;
    find_one(conn, table, &id)?.ok_or_else(|| {
        RepoError::InvalidData(format!("inserted row `{id}` missing from {table}"))
    })
}

pub(crate) fn rename(
    conn: &Connection,
    table: &'static str,
    id: &EntityId,
    name: &str,
) -> RepoResult<()> {
    let changed = conn.execute(
        &format!(
            "UPDATE {table}
             SET
                name = ?2,
                updated_at = {NOW_MS_SQL}
             WHERE id = ?1;"
        ),
        params![id.as_str(), name],
    )?;
    if changed == 0 {
        return Err(RepoError::NotFound(id.clone()));
    }
    Ok(())
}

pub(crate) fn delete(conn: &Connection, table: &'static str, id: &EntityId) -> RepoResult<()> {
    let changed = conn.execute(
        &format!("DELETE FROM {table} WHERE id = ?1;"),
        [id.as_str()],
    )?;
    if changed == 0 {
        return Err(RepoError::NotFound(id.clone()));
    }
    Ok(())
}

pub(crate) fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(exists.is_some())
}

pub(crate) fn parse_id(table: &str, value: String) -> RepoResult<EntityId> {
    EntityId::try_from(value)
        .map_err(|message| RepoError::InvalidData(format!("{message} in {table}")))
}

fn parse_named_row(table: &'static str, row: &Row<'_>) -> RepoResult<NamedRow> {
    Ok(NamedRow {
        id: parse_id(table, row.get("id")?)?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
