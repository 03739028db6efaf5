use noteful_core::db::open_db_in_memory;
use noteful_core::{
    EntityKind, FolderService, NamePayload, NoteListParams, NotePayload, NoteService,
    ServiceError, ServiceErrorKind, SqliteFolderRepository, SqliteNoteRepository,
    SqliteTagRepository, TagService,
};

#[test]
fn folders_are_listed_by_name() {
    let conn = open_db_in_memory().unwrap();
    let service = FolderService::new(SqliteFolderRepository::try_new(&conn).unwrap());
    for name in ["Work", "Archive", "Personal"] {
        service.create_folder(&NamePayload::named(name)).unwrap();
    }

    let names: Vec<String> = service
        .list_folders()
        .unwrap()
        .into_iter()
        .map(|folder| folder.name)
        .collect();
    assert_eq!(names, vec!["Archive", "Personal", "Work"]);
}

#[test]
fn folder_create_requires_name() {
    let conn = open_db_in_memory().unwrap();
    let service = FolderService::new(SqliteFolderRepository::try_new(&conn).unwrap());

    let err = service.create_folder(&NamePayload::default()).unwrap_err();
    assert_eq!(err.kind(), ServiceErrorKind::MissingField);
    assert_eq!(err.to_string(), "Missing `name` in request body");
    assert!(service.list_folders().unwrap().is_empty());
}

#[test]
fn folder_rename_to_existing_name_conflicts() {
    let conn = open_db_in_memory().unwrap();
    let service = FolderService::new(SqliteFolderRepository::try_new(&conn).unwrap());
    service.create_folder(&NamePayload::named("Work")).unwrap();
    let home = service.create_folder(&NamePayload::named("Home")).unwrap();

    let err = service
        .update_folder(home.id.as_str(), &NamePayload::named("Work"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Conflict {
            kind: EntityKind::Folder
        }
    ));

    let renamed = service
        .update_folder(home.id.as_str(), &NamePayload::named("House"))
        .unwrap();
    assert_eq!(renamed.name, "House");
    assert_eq!(renamed.created_at, home.created_at);
}

#[test]
fn folder_update_requires_matching_id_and_existing_target() {
    let conn = open_db_in_memory().unwrap();
    let service = FolderService::new(SqliteFolderRepository::try_new(&conn).unwrap());
    let work = service.create_folder(&NamePayload::named("Work")).unwrap();

    let mismatch = NamePayload {
        id: Some("000000000000000000000000".to_string()),
        name: Some("Other".to_string()),
    };
    let err = service
        .update_folder(work.id.as_str(), &mismatch)
        .unwrap_err();
    assert_eq!(err.kind(), ServiceErrorKind::InvalidInput);

    let err = service
        .update_folder("000000000000000000000000", &NamePayload::named("Other"))
        .unwrap_err();
    assert_eq!(err.kind(), ServiceErrorKind::NotFound);

    let err = service
        .update_folder("nope", &NamePayload::named("Other"))
        .unwrap_err();
    assert_eq!(err.kind(), ServiceErrorKind::InvalidIdentifier);
}

#[test]
fn folder_delete_leaves_note_references_in_place() {
    let conn = open_db_in_memory().unwrap();
    let folders = FolderService::new(SqliteFolderRepository::try_new(&conn).unwrap());
    let notes = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());
    let work = folders.create_folder(&NamePayload::named("Work")).unwrap();
    let note = notes
        .create_note(&NotePayload {
            folder_id: Some(work.id.to_string()),
            ..NotePayload::titled("A")
        })
        .unwrap();

    folders.delete_folder(work.id.as_str()).unwrap();
    assert_eq!(
        folders.get_folder(work.id.as_str()).unwrap_err().kind(),
        ServiceErrorKind::NotFound
    );
    assert_eq!(
        folders.delete_folder(work.id.as_str()).unwrap_err().kind(),
        ServiceErrorKind::NotFound
    );

    let reloaded = notes.get_note(note.id.as_str()).unwrap();
    assert_eq!(reloaded.folder_id, Some(work.id.clone()));
    let in_folder = notes
        .list_notes(&NoteListParams::in_folder(work.id.as_str()))
        .unwrap();
    assert_eq!(in_folder.len(), 1);
}

#[test]
fn tags_are_listed_by_name_and_names_are_unique() {
    let conn = open_db_in_memory().unwrap();
    let service = TagService::new(
        SqliteTagRepository::try_new(&conn).unwrap(),
        SqliteNoteRepository::try_new(&conn).unwrap(),
    );
    service.create_tag(&NamePayload::named("rust")).unwrap();
    service.create_tag(&NamePayload::named("cooking")).unwrap();

    let err = service.create_tag(&NamePayload::named("rust")).unwrap_err();
    assert_eq!(err.kind(), ServiceErrorKind::Conflict);
    assert_eq!(err.to_string(), "The tag name already exists");

    let names: Vec<String> = service
        .list_tags()
        .unwrap()
        .into_iter()
        .map(|tag| tag.name)
        .collect();
    assert_eq!(names, vec!["cooking", "rust"]);
}

#[test]
fn tag_get_and_update_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = TagService::new(
        SqliteTagRepository::try_new(&conn).unwrap(),
        SqliteNoteRepository::try_new(&conn).unwrap(),
    );
    let created = service.create_tag(&NamePayload::named(" draft ")).unwrap();
    assert_eq!(created.name, "draft");
    assert_eq!(service.get_tag(created.id.as_str()).unwrap(), created);

    let payload = NamePayload {
        id: Some(created.id.to_string()),
        name: Some("final".to_string()),
    };
    let updated = service.update_tag(created.id.as_str(), &payload).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "final");

    let err = service
        .update_tag(created.id.as_str(), &NamePayload::default())
        .unwrap_err();
    assert_eq!(err.kind(), ServiceErrorKind::MissingField);
    assert_eq!(
        service.get_tag("not-valid").unwrap_err().kind(),
        ServiceErrorKind::InvalidIdentifier
    );
}

#[test]
fn tag_rename_to_existing_name_conflicts() {
    let conn = open_db_in_memory().unwrap();
    let service = TagService::new(
        SqliteTagRepository::try_new(&conn).unwrap(),
        SqliteNoteRepository::try_new(&conn).unwrap(),
    );
    service.create_tag(&NamePayload::named("rust")).unwrap();
    let cooking = service.create_tag(&NamePayload::named("cooking")).unwrap();

    let err = service
        .update_tag(cooking.id.as_str(), &NamePayload::named("rust"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Conflict {
            kind: EntityKind::Tag
        }
    ));
    assert_eq!(err.kind(), ServiceErrorKind::Conflict);

    let unchanged = service.get_tag(cooking.id.as_str()).unwrap();
    assert_eq!(unchanged.name, "cooking");
    assert_eq!(unchanged.updated_at, cooking.updated_at);
}
