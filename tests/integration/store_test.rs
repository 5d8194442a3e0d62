//! Integration tests for the mutation engine across whole-drive flows.

mod helpers;

use cloudvault_core::types::FolderId;
use cloudvault_entity::item::ItemRef;
use cloudvault_store::DriveStore;

#[test]
fn test_full_drive_lifecycle() {
    let mut store = DriveStore::new();

    // Build a small tree: /Docs/Reports, /Media, two files.
    let docs = store.create_folder("Docs", None).expect("create").id;
    let reports = store.create_folder("Reports", Some(docs)).expect("create").id;
    let media = store.create_folder("Media", None).expect("create").id;
    let summary = store
        .ingest_file(helpers::upload("summary.txt", &[0u8; 300]), Some(reports))
        .expect("ingest")
        .id;
    let photo = store
        .ingest_file(helpers::upload("photo.raw", &[0u8; 700]), Some(media))
        .expect("ingest")
        .id;

    assert_eq!(store.used_bytes(), 1_000);

    // Reorganize: rename, then pull the reports folder to the root.
    assert!(store.rename_item(ItemRef::Folder(reports), "Quarterly"));
    assert!(store.move_item(ItemRef::Folder(reports), None));
    assert_eq!(store.folder(reports).expect("folder").parent_id, None);
    assert_eq!(
        store.file(summary).expect("file").parent_id,
        Some(reports),
        "children follow their parent"
    );

    // Trash the photo; usage drops, the record stays.
    assert!(store.trash_item(ItemRef::File(photo)));
    assert_eq!(store.used_bytes(), 300);
    assert!(store.file(photo).is_some());

    // Restore brings the bytes back to the same place.
    assert!(store.restore_item(ItemRef::File(photo)));
    assert_eq!(store.used_bytes(), 1_000);
    assert_eq!(store.file(photo).expect("file").parent_id, Some(media));

    // Purge is final.
    assert!(store.trash_item(ItemRef::File(photo)));
    assert_eq!(store.empty_trash(), 1);
    assert!(store.file(photo).is_none());
    assert_eq!(store.used_bytes(), 300);
}

#[test]
fn test_deep_tree_move_keeps_ancestry_acyclic() {
    let mut store = DriveStore::new();

    let mut parent = None;
    let mut chain = Vec::new();
    for depth in 0..8 {
        let folder = store
            .create_folder(&format!("level-{depth}"), parent)
            .expect("create");
        parent = Some(folder.id);
        chain.push(folder.id);
    }

    // Any move of an ancestor into a deeper descendant is rejected.
    for (i, &upper) in chain.iter().enumerate() {
        for &lower in &chain[i..] {
            assert!(
                !store.move_item(ItemRef::Folder(upper), Some(lower)),
                "moving an ancestor under its descendant must be a no-op"
            );
        }
    }

    // The chain is intact afterwards.
    let leaf = *chain.last().expect("leaf");
    assert_eq!(store.ancestors(leaf).len(), 8);

    // Sideways moves still work.
    let side = store.create_folder("side", None).expect("create").id;
    assert!(store.move_item(ItemRef::Folder(leaf), Some(side)));
    assert_eq!(store.ancestors(leaf), vec![leaf, side]);
}

#[test]
fn test_vault_blob_round_trips_through_json() {
    let mut store = DriveStore::new();
    let docs = store.create_folder("Docs", None).expect("create").id;
    let file = store
        .ingest_file(helpers::upload_at("notes.txt", "2024-03-01T12:00:00Z"), Some(docs))
        .expect("ingest")
        .id;
    store.toggle_starred(ItemRef::File(file));
    store.trash_item(ItemRef::Folder(docs));

    let blob = serde_json::to_string(&store).expect("serialize");
    let loaded: DriveStore = serde_json::from_str(&blob).expect("deserialize");

    assert_eq!(loaded.folders.len(), 1);
    assert_eq!(loaded.files.len(), 1);
    let loaded_file = loaded.file(file).expect("file");
    assert!(loaded_file.is_starred);
    assert_eq!(loaded_file.parent_id, Some(docs));
    assert_eq!(loaded_file.content.as_bytes(), b"x");
    assert!(loaded.folder(docs).expect("folder").is_trashed);

    // The blob uses snake_case field names; a rename would strand
    // existing vault files.
    assert!(blob.contains("\"is_trashed\""));
    assert!(blob.contains("\"parent_id\""));
    assert!(blob.contains("\"source_modified\""));
}

#[test]
fn test_trashed_parent_rejects_new_children_but_keeps_old() {
    let mut store = DriveStore::new();
    let docs = store.create_folder("Docs", None).expect("create").id;
    store
        .ingest_file(helpers::upload("kept.txt", b"old"), Some(docs))
        .expect("ingest");

    store.trash_item(ItemRef::Folder(docs));
    assert!(store.create_folder("Sub", Some(docs)).is_err());
    assert!(store
        .ingest_file(helpers::upload("new.txt", b"new"), Some(docs))
        .is_err());

    // The pre-existing child is untouched and still counted.
    assert_eq!(store.files.len(), 1);
    assert_eq!(store.used_bytes(), 3);
}

#[test]
fn test_moving_file_into_missing_folder_is_rejected() {
    let mut store = DriveStore::new();
    let file = store
        .ingest_file(helpers::upload("a.txt", b"x"), None)
        .expect("ingest")
        .id;

    assert!(!store.move_item(ItemRef::File(file), Some(FolderId::new())));
    assert_eq!(store.file(file).expect("file").parent_id, None);
}
