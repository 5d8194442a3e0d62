//! Integration tests for view projections over a populated vault.

mod helpers;

use cloudvault_entity::item::ItemRef;
use cloudvault_store::{DriveStore, RECENT_LIMIT, ROOT_LABEL, ViewMode, ViewRequest};

fn request(mode: ViewMode) -> ViewRequest {
    ViewRequest {
        mode,
        ..ViewRequest::default()
    }
}

/// One store exercising every view at once.
fn populated() -> DriveStore {
    let mut store = DriveStore::new();
    let docs = store.create_folder("Documents", None).expect("create").id;
    let media = store.create_folder("Media", None).expect("create").id;

    let report = store
        .ingest_file(
            helpers::upload_at("annual report.pdf", "2024-05-03T09:00:00Z"),
            Some(docs),
        )
        .expect("ingest")
        .id;
    let draft = store
        .ingest_file(
            helpers::upload_at("report DRAFT.pdf", "2024-05-04T09:00:00Z"),
            Some(docs),
        )
        .expect("ingest")
        .id;
    store
        .ingest_file(helpers::upload_at("song.mp3", "2024-05-01T09:00:00Z"), Some(media))
        .expect("ingest");

    store.toggle_starred(ItemRef::File(report));
    store.toggle_starred(ItemRef::Folder(media));
    store.trash_item(ItemRef::File(draft));
    store.trash_item(ItemRef::Folder(media));

    store
}

#[test]
fn test_views_partition_a_mixed_vault() {
    let store = populated();

    // Root children: Documents only, Media is trashed.
    let files = store.project(&request(ViewMode::Files));
    assert_eq!(files.folders.len(), 1);
    assert_eq!(files.folders[0].name, "Documents");
    assert!(files.files.is_empty());

    // Starred: the report; the starred Media folder is trashed.
    let starred = store.project(&request(ViewMode::Starred));
    assert_eq!(starred.folders.len(), 0);
    assert_eq!(starred.files.len(), 1);
    assert_eq!(starred.files[0].name, "annual report.pdf");

    // Trash: the draft and the Media folder, wherever they lived.
    let trash = store.project(&request(ViewMode::Trash));
    assert_eq!(trash.folders.len(), 1);
    assert_eq!(trash.files.len(), 1);
    assert_eq!(trash.files[0].name, "report DRAFT.pdf");

    // Recent: newest first, trashed draft excluded.
    let recent = store.project(&request(ViewMode::Recent));
    let names: Vec<&str> = recent.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["annual report.pdf", "song.mp3"]);
}

#[test]
fn test_search_spans_the_vault_and_skips_trash() {
    let store = populated();

    let listing = store.project(&ViewRequest {
        mode: ViewMode::Files,
        folder_id: None,
        query: "REPORT".to_string(),
    });
    // The trashed draft matches the query but stays hidden.
    assert_eq!(listing.files.len(), 1);
    assert_eq!(listing.files[0].name, "annual report.pdf");
    assert!(listing.folders.is_empty());
}

#[test]
fn test_recent_cap_holds_across_kinds() {
    let mut store = DriveStore::new();
    for i in 0..30 {
        store
            .ingest_file(
                helpers::upload_at(&format!("f{i:02}.txt"), &format!("2024-01-01T10:{i:02}:00Z")),
                None,
            )
            .expect("ingest");
    }

    let recent = store.project(&request(ViewMode::Recent));
    assert_eq!(recent.len(), RECENT_LIMIT);
    assert_eq!(recent.files[0].name, "f29.txt");
    assert_eq!(recent.files[RECENT_LIMIT - 1].name, "f10.txt");
}

#[test]
fn test_breadcrumbs_walk_a_deep_tree() {
    let mut store = DriveStore::new();
    let a = store.create_folder("a", None).expect("create").id;
    let b = store.create_folder("b", Some(a)).expect("create").id;
    let c = store.create_folder("c", Some(b)).expect("create").id;

    let names: Vec<String> = store
        .breadcrumbs(Some(c))
        .into_iter()
        .map(|crumb| crumb.name)
        .collect();
    assert_eq!(names, vec![ROOT_LABEL, "a", "b", "c"]);

    // Trashing a folder on the path does not break the trail.
    store.trash_item(ItemRef::Folder(b));
    assert_eq!(store.breadcrumbs(Some(c)).len(), 4);
}

#[test]
fn test_empty_vault_views_are_empty() {
    let store = DriveStore::new();
    for mode in [ViewMode::Files, ViewMode::Recent, ViewMode::Starred, ViewMode::Trash] {
        let listing = store.project(&request(mode));
        assert!(listing.is_empty());
        assert_eq!(listing.len(), 0);
    }
    assert_eq!(store.breadcrumbs(None)[0].name, ROOT_LABEL);
}
