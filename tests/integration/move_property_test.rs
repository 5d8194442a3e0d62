//! Randomized move sequences must never corrupt the folder tree.

mod helpers;

use std::collections::HashSet;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use cloudvault_entity::item::ItemRef;
use cloudvault_store::DriveStore;

/// One step of a randomized drive session.
#[derive(Debug, Clone)]
enum Op {
    /// Create a folder under the parent picked by index (mod count).
    CreateFolder { parent: usize },
    /// Ingest a file under the parent picked by index (mod count).
    IngestFile { parent: usize },
    /// Move a folder onto a target folder, or to the root.
    MoveFolder { folder: usize, target: Option<usize> },
    /// Move a file onto a target folder, or to the root.
    MoveFile { file: usize, target: Option<usize> },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..24usize).prop_map(|parent| Op::CreateFolder { parent }),
        (0..24usize).prop_map(|parent| Op::IngestFile { parent }),
        ((0..24usize), proptest::option::of(0..24usize))
            .prop_map(|(folder, target)| Op::MoveFolder { folder, target }),
        ((0..24usize), proptest::option::of(0..24usize))
            .prop_map(|(file, target)| Op::MoveFile { file, target }),
    ]
}

fn pick<T: Copy>(items: &[T], index: usize) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[index % items.len()])
    }
}

/// Every folder's ancestor chain is duplicate-free and ends at a root;
/// every placed item points at a folder that exists.
fn assert_tree_consistent(store: &DriveStore) -> Result<(), TestCaseError> {
    for folder in &store.folders {
        let chain = store.ancestors(folder.id);
        let unique: HashSet<_> = chain.iter().copied().collect();
        prop_assert_eq!(
            unique.len(),
            chain.len(),
            "cycle through folder {}",
            folder.id
        );

        let top = chain.last().expect("chain includes the start");
        prop_assert_eq!(
            store.folder(*top).expect("chain folders exist").parent_id,
            None,
            "chain must end at a root"
        );

        if let Some(parent) = folder.parent_id {
            prop_assert!(store.folder(parent).is_some(), "dangling folder parent");
        }
    }

    for file in &store.files {
        if let Some(parent) = file.parent_id {
            prop_assert!(store.folder(parent).is_some(), "dangling file parent");
        }
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// No sequence of creates and moves can introduce a parent cycle,
    /// lose a record, or leave a dangling parent reference.
    #[test]
    fn prop_random_moves_never_create_cycles(ops in proptest::collection::vec(op_strategy(), 1..60)) {
        let mut store = DriveStore::new();
        let mut folders = Vec::new();
        let mut files = Vec::new();

        for op in ops {
            match op {
                Op::CreateFolder { parent } => {
                    let parent = pick(&folders, parent);
                    let folder = store
                        .create_folder(&format!("folder-{}", folders.len()), parent)
                        .expect("parents here are never trashed");
                    folders.push(folder.id);
                }
                Op::IngestFile { parent } => {
                    let parent = pick(&folders, parent);
                    let file = store
                        .ingest_file(helpers::upload(&format!("file-{}.txt", files.len()), b"x"), parent)
                        .expect("parents here are never trashed");
                    files.push(file.id);
                }
                Op::MoveFolder { folder, target } => {
                    let Some(folder) = pick(&folders, folder) else { continue };
                    let target = target.and_then(|t| pick(&folders, t));
                    let before = store.folder(folder).expect("exists").parent_id;
                    let moved = store.move_item(ItemRef::Folder(folder), target);
                    if !moved {
                        prop_assert_eq!(
                            store.folder(folder).expect("exists").parent_id,
                            before,
                            "a rejected move must leave the folder in place"
                        );
                    }
                }
                Op::MoveFile { file, target } => {
                    let Some(file) = pick(&files, file) else { continue };
                    let target = target.and_then(|t| pick(&folders, t));
                    store.move_item(ItemRef::File(file), target);
                }
            }

            assert_tree_consistent(&store)?;
        }

        prop_assert_eq!(store.folders.len(), folders.len(), "no folder may vanish");
        prop_assert_eq!(store.files.len(), files.len(), "no file may vanish");
    }
}
