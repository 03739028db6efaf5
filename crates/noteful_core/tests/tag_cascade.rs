use noteful_core::db::open_db_in_memory;
use noteful_core::{
    EntityId, NamePayload, Note, NoteDocument, NoteFieldSet, NotePayload, NoteQuery,
    NoteRepository, NoteService, RepoError, RepoResult, ServiceError, ServiceErrorKind,
    SqliteNoteRepository, SqliteTagRepository, TagService,
};
use rusqlite::Connection;
use std::cell::Cell;

fn tag_service(conn: &Connection) -> TagService<SqliteTagRepository<'_>, SqliteNoteRepository<'_>> {
    TagService::new(
        SqliteTagRepository::try_new(conn).unwrap(),
        SqliteNoteRepository::try_new(conn).unwrap(),
    )
}

fn tagged(title: &str, tags: &[&EntityId]) -> NotePayload {
    NotePayload {
        tags: Some(tags.iter().map(|tag| tag.to_string()).collect()),
        ..NotePayload::titled(title)
    }
}

#[test]
fn deleting_a_tag_pulls_it_from_every_note() {
    let conn = open_db_in_memory().unwrap();
    let tags = tag_service(&conn);
    let notes = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    let doomed = tags.create_tag(&NamePayload::named("doomed")).unwrap();
    let kept = tags.create_tag(&NamePayload::named("kept")).unwrap();
    let first = notes
        .create_note(&tagged("N1", &[&doomed.id, &kept.id]))
        .unwrap();
    let second = notes
        .create_note(&tagged("N2", &[&kept.id, &doomed.id, &doomed.id]))
        .unwrap();
    let untouched = notes.create_note(&tagged("N3", &[&kept.id])).unwrap();

    let outcome = tags.delete_tag(doomed.id.as_str()).unwrap();
    assert_eq!(outcome.tag_id, doomed.id);
    assert_eq!(outcome.notes_updated, 2);

    assert_eq!(
        tags.get_tag(doomed.id.as_str()).unwrap_err().kind(),
        ServiceErrorKind::NotFound
    );
    for note in [&first, &second, &untouched] {
        let reloaded = notes.get_note(note.id.as_str()).unwrap();
        assert_eq!(reloaded.tags, vec![kept.id.clone()]);
    }

    let reloaded = notes.get_note(first.id.as_str()).unwrap();
    assert!(reloaded.updated_at >= first.updated_at);
    assert_eq!(
        notes.get_note(untouched.id.as_str()).unwrap().updated_at,
        untouched.updated_at
    );
}

#[test]
fn deleting_an_unused_tag_updates_no_notes() {
    let conn = open_db_in_memory().unwrap();
    let tags = tag_service(&conn);

    let lonely = tags.create_tag(&NamePayload::named("lonely")).unwrap();
    let outcome = tags.delete_tag(lonely.id.as_str()).unwrap();
    assert_eq!(outcome.notes_updated, 0);
    assert!(tags.list_tags().unwrap().is_empty());
}

#[test]
fn deleting_a_missing_tag_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let tags = tag_service(&conn);
    let tag = tags.create_tag(&NamePayload::named("once")).unwrap();

    tags.delete_tag(tag.id.as_str()).unwrap();
    let err = tags.delete_tag(tag.id.as_str()).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { ref id, .. } if *id == tag.id));

    assert_eq!(
        tags.delete_tag("xyz").unwrap_err().kind(),
        ServiceErrorKind::InvalidIdentifier
    );
}

#[test]
fn stale_references_to_a_missing_tag_are_still_pulled() {
    let conn = open_db_in_memory().unwrap();
    let tags = tag_service(&conn);
    let notes = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    // Well-formed but never created; references are not checked for existence.
    let ghost = EntityId::generate();
    let note = notes.create_note(&tagged("N", &[&ghost])).unwrap();

    let err = tags.delete_tag(ghost.as_str()).unwrap_err();
    assert_eq!(err.kind(), ServiceErrorKind::NotFound);
    assert!(notes.get_note(note.id.as_str()).unwrap().tags.is_empty());
}

#[test]
fn failed_pull_leaves_tag_deleted_and_reports_incomplete_cascade() {
    let conn = open_db_in_memory().unwrap();
    let notes = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());
    let failing = FailingPullRepository {
        inner: SqliteNoteRepository::try_new(&conn).unwrap(),
        pulls: Cell::new(0),
    };
    let tags = TagService::new(SqliteTagRepository::try_new(&conn).unwrap(), &failing);

    let tag = tags.create_tag(&NamePayload::named("half")).unwrap();
    let note = notes.create_note(&tagged("N", &[&tag.id])).unwrap();

    let err = tags.delete_tag(tag.id.as_str()).unwrap_err();
    assert!(matches!(err, ServiceError::CascadeIncomplete { ref tag_id, .. } if *tag_id == tag.id));
    assert_eq!(err.kind(), ServiceErrorKind::Store);
    assert_eq!(failing.pulls.get(), 1);

    assert_eq!(
        tags.get_tag(tag.id.as_str()).unwrap_err().kind(),
        ServiceErrorKind::NotFound
    );
    // No compensation: the stale reference stays behind.
    assert_eq!(notes.get_note(note.id.as_str()).unwrap().tags, vec![tag.id]);
}

#[test]
fn failed_tag_delete_still_attempts_the_pull() {
    let conn = open_db_in_memory().unwrap();
    let failing = FailingPullRepository {
        inner: SqliteNoteRepository::try_new(&conn).unwrap(),
        pulls: Cell::new(0),
    };
    let tags = TagService::new(SqliteTagRepository::try_new(&conn).unwrap(), &failing);

    let err = tags.delete_tag(EntityId::generate().as_str()).unwrap_err();
    assert_eq!(err.kind(), ServiceErrorKind::NotFound);
    assert_eq!(failing.pulls.get(), 1);
}

/// Delegates to SQLite but fails every `pull_tag`.
struct FailingPullRepository<'conn> {
    inner: SqliteNoteRepository<'conn>,
    pulls: Cell<usize>,
}

impl NoteRepository for &FailingPullRepository<'_> {
    fn find_notes(&self, query: &NoteQuery) -> RepoResult<Vec<Note>> {
        self.inner.find_notes(query)
    }

    fn find_note(&self, id: &EntityId) -> RepoResult<Option<Note>> {
        self.inner.find_note(id)
    }

    fn insert_note(&self, doc: &NoteDocument) -> RepoResult<Note> {
        self.inner.insert_note(doc)
    }

    fn update_note(&self, id: &EntityId, fields: &NoteFieldSet) -> RepoResult<()> {
        self.inner.update_note(id, fields)
    }

    fn delete_note(&self, id: &EntityId) -> RepoResult<()> {
        self.inner.delete_note(id)
    }

    fn pull_tag(&self, _tag_id: &EntityId) -> RepoResult<usize> {
        self.pulls.set(self.pulls.get() + 1);
        Err(RepoError::InvalidData("note store unavailable".to_string()))
    }
}
