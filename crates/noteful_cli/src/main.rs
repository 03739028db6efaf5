//! Command-line entry point over `noteful_core` services.
//!
//! # Responsibility
//! - Load configuration, start logging and open the configured store.
//! - Map one subcommand onto one service call and print JSON results.
//!
//! Exit status is 0 on success, 1 on configuration, store or service errors,
//! and 2 on usage errors (reported by clap).

mod args;

use args::{Args, Command};
use clap::Parser;
use log::error;
use noteful_core::db::open_db;
use noteful_core::{
    init_from_config, CoreConfig, FolderService, NamePayload, NoteListParams, NotePayload,
    NoteService, ServiceError, SqliteFolderRepository, SqliteNoteRepository,
    SqliteTagRepository, TagService,
};
use rusqlite::Connection;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(db) = args.db {
        config.db_path = db;
    }
    if let Err(err) = init_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open `{}`: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };

    match run(&conn, args.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(
                "event=cli_command module=cli status=error kind={:?}",
                err.kind()
            );
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(conn: &Connection, command: Command) -> Result<String, ServiceError> {
    let output = match command {
        Command::Notes {
            search_term,
            folder,
            tag,
        } => {
            let params = NoteListParams {
                search_term,
                folder_id: folder,
                tag_id: tag,
            };
            to_json(&notes(conn)?.list_notes(&params)?)
        }
        Command::Note { id } => to_json(&notes(conn)?.get_note(&id)?),
        Command::AddNote {
            title,
            content,
            folder,
            tags,
        } => {
            let payload = NotePayload {
                content,
                folder_id: folder,
                tags: Some(tags),
                ..NotePayload::titled(title)
            };
            to_json(&notes(conn)?.create_note(&payload)?)
        }
        Command::MoveNote { note_id, folder_id } => {
            let payload = NotePayload {
                folder_id: Some(folder_id),
                ..NotePayload::default()
            };
            to_json(&notes(conn)?.update_note(&note_id, &payload)?)
        }
        Command::TagNote { note_id, tag_id } => {
            let service = notes(conn)?;
            let mut tags: Vec<String> = service
                .get_note(&note_id)?
                .tags
                .into_iter()
                .map(String::from)
                .collect();
            tags.push(tag_id);
            let payload = NotePayload {
                tags: Some(tags),
                ..NotePayload::default()
            };
            to_json(&service.update_note(&note_id, &payload)?)
        }
        Command::DeleteNote { id } => {
            notes(conn)?.delete_note(&id)?;
            to_json(&id)
        }
        Command::Folders => to_json(&folders(conn)?.list_folders()?),
        Command::AddFolder { name } => {
            to_json(&folders(conn)?.create_folder(&NamePayload::named(name))?)
        }
        Command::RenameFolder { id, name } => {
            to_json(&folders(conn)?.update_folder(&id, &NamePayload::named(name))?)
        }
        Command::DeleteFolder { id } => {
            folders(conn)?.delete_folder(&id)?;
            to_json(&id)
        }
        Command::Tags => to_json(&tags(conn)?.list_tags()?),
        Command::AddTag { name } => to_json(&tags(conn)?.create_tag(&NamePayload::named(name))?),
        Command::RenameTag { id, name } => {
            to_json(&tags(conn)?.update_tag(&id, &NamePayload::named(name))?)
        }
        Command::DeleteTag { id } => to_json(&tags(conn)?.delete_tag(&id)?),
    };

    Ok(output)
}

fn notes(conn: &Connection) -> Result<NoteService<SqliteNoteRepository<'_>>, ServiceError> {
    let repo = SqliteNoteRepository::try_new(conn).map_err(ServiceError::Store)?;
    Ok(NoteService::new(repo))
}

fn folders(conn: &Connection) -> Result<FolderService<SqliteFolderRepository<'_>>, ServiceError> {
    let repo = SqliteFolderRepository::try_new(conn).map_err(ServiceError::Store)?;
    Ok(FolderService::new(repo))
}

fn tags(
    conn: &Connection,
) -> Result<TagService<SqliteTagRepository<'_>, SqliteNoteRepository<'_>>, ServiceError> {
    let tag_repo = SqliteTagRepository::try_new(conn).map_err(ServiceError::Store)?;
    let note_repo = SqliteNoteRepository::try_new(conn).map_err(ServiceError::Store)?;
    Ok(TagService::new(tag_repo, note_repo))
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|err| format!("{{\"error\":\"{err}\"}}"))
}
