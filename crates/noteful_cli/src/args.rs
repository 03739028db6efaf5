use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Notes, folders and tags over a local SQLite store")]
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// SQLite file to use instead of NOTEFUL_DB_PATH
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List notes, oldest first
    Notes {
        /// Case-insensitive pattern matched against title or content
        #[arg(value_name = "SEARCH")]
        search_term: Option<String>,

        /// Only notes in this folder
        #[arg(long, value_name = "FOLDER_ID")]
        folder: Option<String>,

        /// Only notes carrying this tag
        #[arg(long, value_name = "TAG_ID")]
        tag: Option<String>,
    },

    /// Show one note
    Note {
        #[arg(value_name = "NOTE_ID")]
        id: String,
    },

    /// Create a note
    AddNote {
        title: String,

        content: Option<String>,

        #[arg(long, value_name = "FOLDER_ID")]
        folder: Option<String>,

        /// Tag reference; repeat for several tags
        #[arg(long = "tag", value_name = "TAG_ID")]
        tags: Vec<String>,
    },

    /// Move a note into a folder, or out of it with an empty id
    MoveNote {
        #[arg(value_name = "NOTE_ID")]
        note_id: String,

        #[arg(value_name = "FOLDER_ID")]
        folder_id: String,
    },

    /// Append a tag to a note
    TagNote {
        #[arg(value_name = "NOTE_ID")]
        note_id: String,

        #[arg(value_name = "TAG_ID")]
        tag_id: String,
    },

    /// Delete one note
    DeleteNote {
        #[arg(value_name = "NOTE_ID")]
        id: String,
    },

    /// List folders by name
    Folders,

    /// Create a folder
    AddFolder { name: String },

    /// Rename a folder
    RenameFolder {
        #[arg(value_name = "FOLDER_ID")]
        id: String,

        name: String,
    },

    /// Delete a folder; notes keep their reference
    DeleteFolder {
        #[arg(value_name = "FOLDER_ID")]
        id: String,
    },

    /// List tags by name
    Tags,

    /// Create a tag
    AddTag { name: String },

    /// Rename a tag
    RenameTag {
        #[arg(value_name = "TAG_ID")]
        id: String,

        name: String,
    },

    /// Delete a tag and pull it from every note
    DeleteTag {
        #[arg(value_name = "TAG_ID")]
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::{Args, Command};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn notes_accepts_term_and_filters() {
        let args = Args::try_parse_from([
            "noteful", "notes", "gaga", "--folder", "f1", "--tag", "t1",
        ])
        .unwrap();
        assert_eq!(
            args.command,
            Command::Notes {
                search_term: Some("gaga".to_string()),
                folder: Some("f1".to_string()),
                tag: Some("t1".to_string()),
            }
        );
    }

    #[test]
    fn add_note_collects_repeated_tags() {
        let args = Args::try_parse_from([
            "noteful", "add-note", "Title", "--tag", "a", "--tag", "b", "--db", "/tmp/n.db",
        ])
        .unwrap();
        assert_eq!(args.db, Some(PathBuf::from("/tmp/n.db")));
        assert_eq!(
            args.command,
            Command::AddNote {
                title: "Title".to_string(),
                content: None,
                folder: None,
                tags: vec!["a".to_string(), "b".to_string()],
            }
        );
    }

    #[test]
    fn extra_positional_is_a_usage_error() {
        let err = Args::try_parse_from(["noteful", "notes", "a", "b"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn missing_argument_is_a_usage_error() {
        let err = Args::try_parse_from(["noteful", "tag-note", "n1"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }
}
