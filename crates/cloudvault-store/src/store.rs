//! The canonical per-identity store and its mutation engine.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use cloudvault_core::AppError;
use cloudvault_core::result::AppResult;
use cloudvault_core::types::{FileId, FolderId};
use cloudvault_entity::file::{File, FileUpload};
use cloudvault_entity::folder::Folder;
use cloudvault_entity::item::ItemRef;

/// The canonical collection of all file and folder records for one
/// identity.
///
/// This struct is the single source of truth for a session; views are
/// derived from it and never mutated separately. Its serde form is the
/// persisted vault blob.
///
/// Mutating methods return `bool` ("did the store change") where the
/// contract is a silent no-op on invalid targets, and `AppResult` where
/// construction can fail validation. A `false`/`Err` return always means
/// the store is unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriveStore {
    /// All file records, including trashed ones.
    pub files: Vec<File>,
    /// All folder records, including trashed ones.
    pub folders: Vec<Folder>,
}

impl DriveStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the store holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }

    /// Look up a file by id.
    pub fn file(&self, id: FileId) -> Option<&File> {
        self.files.iter().find(|f| f.id == id)
    }

    /// Look up a folder by id.
    pub fn folder(&self, id: FolderId) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    fn file_mut(&mut self, id: FileId) -> Option<&mut File> {
        self.files.iter_mut().find(|f| f.id == id)
    }

    fn folder_mut(&mut self, id: FolderId) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|f| f.id == id)
    }

    /// Walk the parent chain upward from `start`, inclusive.
    ///
    /// Returns ids in leaf-to-root order. The engine never creates
    /// cycles, but persisted blobs are external input, so a visited set
    /// truncates the walk instead of hanging on corrupted data.
    pub fn ancestors(&self, start: FolderId) -> Vec<FolderId> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(start);
        while let Some(id) = current {
            if !seen.insert(id) {
                break;
            }
            chain.push(id);
            current = self.folder(id).and_then(|f| f.parent_id);
        }
        chain
    }

    fn require_parent(&self, parent_id: Option<FolderId>) -> AppResult<()> {
        if let Some(parent_id) = parent_id {
            let parent = self
                .folder(parent_id)
                .ok_or_else(|| AppError::not_found("Parent folder not found"))?;
            if parent.is_trashed {
                return Err(AppError::validation(
                    "Cannot create items inside a trashed folder",
                ));
            }
        }
        Ok(())
    }

    // ── Mutations ──────────────────────────────────────────────────────

    /// Create a new folder under `parent_id` (None for root level).
    pub fn create_folder(&mut self, name: &str, parent_id: Option<FolderId>) -> AppResult<Folder> {
        self.require_parent(parent_id)?;
        let folder = Folder::new(name, parent_id)?;

        info!(folder_id = %folder.id, name = %folder.name, "Folder created");
        self.folders.push(folder.clone());
        Ok(folder)
    }

    /// Ingest one uploaded file under `parent_id` (None for root level).
    ///
    /// The payload is accepted as-is; size and kind classification are
    /// derived from it.
    pub fn ingest_file(
        &mut self,
        upload: FileUpload,
        parent_id: Option<FolderId>,
    ) -> AppResult<File> {
        self.require_parent(parent_id)?;
        let file = File::new(upload, parent_id)?;

        info!(
            file_id = %file.id,
            name = %file.name,
            size = file.size,
            mime_type = %file.mime_type,
            "File ingested"
        );
        self.files.push(file.clone());
        Ok(file)
    }

    /// Rename an item. No-op if the item is missing, the new name trims
    /// to empty, or the name is unchanged.
    pub fn rename_item(&mut self, item: ItemRef, new_name: &str) -> bool {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return false;
        }

        let renamed = match item {
            ItemRef::File(id) => self.file_mut(id).map(|f| {
                if f.name == new_name {
                    false
                } else {
                    f.name = new_name.to_string();
                    true
                }
            }),
            ItemRef::Folder(id) => self.folder_mut(id).map(|f| {
                if f.name == new_name {
                    false
                } else {
                    f.name = new_name.to_string();
                    true
                }
            }),
        };

        match renamed {
            Some(true) => {
                info!(%item, new_name = %new_name, "Item renamed");
                true
            }
            Some(false) => false,
            None => {
                debug!(%item, "Rename target not found");
                false
            }
        }
    }

    /// Move an item to the trash (soft delete). The parent reference is
    /// left untouched so a later restore puts the item back where it was.
    pub fn trash_item(&mut self, item: ItemRef) -> bool {
        let changed = match item {
            ItemRef::File(id) => self.file_mut(id).map(|f| {
                let change = !f.is_trashed;
                f.is_trashed = true;
                change
            }),
            ItemRef::Folder(id) => self.folder_mut(id).map(|f| {
                let change = !f.is_trashed;
                f.is_trashed = true;
                change
            }),
        };

        match changed {
            Some(true) => {
                info!(%item, "Item moved to trash");
                true
            }
            _ => false,
        }
    }

    /// Restore an item from the trash. No-op unless the item exists and
    /// is currently trashed.
    pub fn restore_item(&mut self, item: ItemRef) -> bool {
        let changed = match item {
            ItemRef::File(id) => self.file_mut(id).map(|f| {
                let change = f.is_trashed;
                f.is_trashed = false;
                change
            }),
            ItemRef::Folder(id) => self.folder_mut(id).map(|f| {
                let change = f.is_trashed;
                f.is_trashed = false;
                change
            }),
        };

        match changed {
            Some(true) => {
                info!(%item, "Item restored from trash");
                true
            }
            _ => false,
        }
    }

    /// Permanently remove an item from the store. Irreversible.
    pub fn purge_item(&mut self, item: ItemRef) -> bool {
        let removed = match item {
            ItemRef::File(id) => {
                let pos = self.files.iter().position(|f| f.id == id);
                pos.map(|pos| {
                    self.files.remove(pos);
                })
            }
            ItemRef::Folder(id) => {
                let pos = self.folders.iter().position(|f| f.id == id);
                pos.map(|pos| {
                    self.folders.remove(pos);
                })
            }
        };

        match removed {
            Some(()) => {
                info!(%item, "Item permanently deleted");
                true
            }
            None => {
                debug!(%item, "Purge target not found");
                false
            }
        }
    }

    /// Permanently remove every trashed item from both collections.
    /// Returns the number of removed records. Irreversible.
    pub fn empty_trash(&mut self) -> usize {
        let before = self.files.len() + self.folders.len();
        self.files.retain(|f| !f.is_trashed);
        self.folders.retain(|f| !f.is_trashed);
        let removed = before - self.files.len() - self.folders.len();

        if removed > 0 {
            info!(removed, "Trash emptied");
        }
        removed
    }

    /// Move an item to a new parent folder (None for root level).
    ///
    /// Silently rejected when the target folder is missing, when a folder
    /// is moved into itself, or when it is moved into one of its own
    /// descendants.
    pub fn move_item(&mut self, item: ItemRef, target: Option<FolderId>) -> bool {
        if let Some(target_id) = target {
            if self.folder(target_id).is_none() {
                debug!(%item, target = %target_id, "Move target not found");
                return false;
            }

            if let ItemRef::Folder(folder_id) = item {
                // Cannot move into itself
                if folder_id == target_id {
                    warn!(%item, "Rejected move of a folder into itself");
                    return false;
                }
                // Cannot move into its own subtree
                if self.ancestors(target_id).contains(&folder_id) {
                    warn!(
                        %item,
                        target = %target_id,
                        "Rejected move of a folder into one of its descendants"
                    );
                    return false;
                }
            }
        }

        let moved = match item {
            ItemRef::File(id) => self.file_mut(id).map(|f| {
                let change = f.parent_id != target;
                f.parent_id = target;
                change
            }),
            ItemRef::Folder(id) => self.folder_mut(id).map(|f| {
                let change = f.parent_id != target;
                f.parent_id = target;
                change
            }),
        };

        match moved {
            Some(true) => {
                info!(%item, target = ?target, "Item moved");
                true
            }
            Some(false) => false,
            None => {
                debug!(%item, "Move source not found");
                false
            }
        }
    }

    /// Flip an item's starred flag.
    pub fn toggle_starred(&mut self, item: ItemRef) -> bool {
        let toggled = match item {
            ItemRef::File(id) => self.file_mut(id).map(|f| {
                f.is_starred = !f.is_starred;
                f.is_starred
            }),
            ItemRef::Folder(id) => self.folder_mut(id).map(|f| {
                f.is_starred = !f.is_starred;
                f.is_starred
            }),
        };

        match toggled {
            Some(starred) => {
                debug!(%item, starred, "Star toggled");
                true
            }
            None => false,
        }
    }

    /// Flip an item's shared flag.
    pub fn toggle_shared(&mut self, item: ItemRef) -> bool {
        let toggled = match item {
            ItemRef::File(id) => self.file_mut(id).map(|f| {
                f.is_shared = !f.is_shared;
                f.is_shared
            }),
            ItemRef::Folder(id) => self.folder_mut(id).map(|f| {
                f.is_shared = !f.is_shared;
                f.is_shared
            }),
        };

        match toggled {
            Some(shared) => {
                debug!(%item, shared, "Share toggled");
                true
            }
            None => false,
        }
    }
}
