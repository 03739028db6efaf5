//! Schema steps for the notes, folders and tags store.
//!
//! Steps run in version order inside one transaction. The applied version is
//! kept in `PRAGMA user_version`, so reopening a migrated file is a no-op and
//! a file written by a newer build is refused instead of downgraded.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "folders_tags_notes",
        sql: include_str!("0001_init.sql"),
    },
    Migration {
        version: 2,
        name: "note_tag_sequence",
        sql: include_str!("0002_note_tags.sql"),
    },
];

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings the schema up to [`latest_version`]; returns how many steps ran.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file is newer than this build.
/// - `Migration` naming the step whose SQL failed; earlier steps of the
///   same run are rolled back with it.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<usize> {
    let db_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();
    if db_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported: latest,
        });
    }

    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > db_version)
        .collect();
    if pending.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for migration in &pending {
        tx.execute_batch(migration.sql)
            .and_then(|()| tx.pragma_update(None, "user_version", migration.version))
            .map_err(|source| DbError::Migration {
                version: migration.version,
                name: migration.name,
                source,
            })?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={} steps={}",
        db_version,
        latest,
        pending.len()
    );
    Ok(pending.len())
}
