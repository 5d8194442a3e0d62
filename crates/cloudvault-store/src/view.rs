//! Pure view projections over a [`DriveStore`].
//!
//! A projection never mutates the store; it clones the matching records
//! into a [`Listing`] snapshot for display. Record clones are cheap
//! because file payloads are reference-counted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cloudvault_core::types::FolderId;
use cloudvault_entity::file::File;
use cloudvault_entity::folder::Folder;
use cloudvault_entity::item::ItemRef;

use crate::store::DriveStore;

/// Maximum number of items in the recent view.
pub const RECENT_LIMIT: usize = 20;

/// Display label of the synthetic root breadcrumb.
pub const ROOT_LABEL: &str = "My Cloud";

/// Which browsing view to materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Children of the active folder, or a global search when a query is
    /// present.
    #[default]
    Files,
    /// Most recently modified items, newest first.
    Recent,
    /// All starred items, regardless of location.
    Starred,
    /// All trashed items, regardless of location.
    Trash,
}

/// Parameters of one view materialization.
#[derive(Debug, Clone, Default)]
pub struct ViewRequest {
    /// The view to materialize.
    pub mode: ViewMode,
    /// The active folder (None for root level). Only meaningful in
    /// [`ViewMode::Files`] without a search query.
    pub folder_id: Option<FolderId>,
    /// Search query. Any non-empty query turns [`ViewMode::Files`] into a
    /// vault-wide name search.
    pub query: String,
}

/// A materialized view: the folders and files to display, in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Listing {
    /// Folders in this view.
    pub folders: Vec<Folder>,
    /// Files in this view.
    pub files: Vec<File>,
}

impl Listing {
    /// Total number of items in the view.
    pub fn len(&self) -> usize {
        self.folders.len() + self.files.len()
    }

    /// Whether the view holds no items.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }
}

/// One entry in a navigation breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// The folder this crumb navigates to (None for the synthetic root).
    pub id: Option<FolderId>,
    /// Display name.
    pub name: String,
}

impl DriveStore {
    /// Materialize one browsing view.
    pub fn project(&self, request: &ViewRequest) -> Listing {
        match request.mode {
            ViewMode::Trash => Listing {
                folders: self
                    .folders
                    .iter()
                    .filter(|f| f.is_trashed)
                    .cloned()
                    .collect(),
                files: self.files.iter().filter(|f| f.is_trashed).cloned().collect(),
            },
            ViewMode::Starred => Listing {
                folders: self
                    .folders
                    .iter()
                    .filter(|f| !f.is_trashed && f.is_starred)
                    .cloned()
                    .collect(),
                files: self
                    .files
                    .iter()
                    .filter(|f| !f.is_trashed && f.is_starred)
                    .cloned()
                    .collect(),
            },
            ViewMode::Recent => self.recent(),
            ViewMode::Files => {
                // Any non-empty query searches, even all-whitespace; only
                // the empty string falls back to the folder listing.
                if request.query.is_empty() {
                    self.children_of(request.folder_id)
                } else {
                    self.search(&request.query)
                }
            }
        }
    }

    /// Non-trashed items carrying a modification timestamp, newest first,
    /// capped at [`RECENT_LIMIT`] across both kinds.
    fn recent(&self) -> Listing {
        let mut stamped: Vec<(DateTime<Utc>, ItemRef)> = Vec::new();
        for folder in self.folders.iter().filter(|f| !f.is_trashed) {
            if let Some(ts) = folder.last_modified {
                stamped.push((ts, ItemRef::Folder(folder.id)));
            }
        }
        for file in self.files.iter().filter(|f| !f.is_trashed) {
            if let Some(ts) = file.last_modified {
                stamped.push((ts, ItemRef::File(file.id)));
            }
        }

        stamped.sort_by(|a, b| b.0.cmp(&a.0));
        stamped.truncate(RECENT_LIMIT);

        let mut listing = Listing::default();
        for (_, item) in stamped {
            match item {
                ItemRef::Folder(id) => {
                    if let Some(folder) = self.folder(id) {
                        listing.folders.push(folder.clone());
                    }
                }
                ItemRef::File(id) => {
                    if let Some(file) = self.file(id) {
                        listing.files.push(file.clone());
                    }
                }
            }
        }
        listing
    }

    /// Case-insensitive substring search over all non-trashed items,
    /// ignoring the active folder.
    fn search(&self, query: &str) -> Listing {
        let needle = query.to_lowercase();
        Listing {
            folders: self
                .folders
                .iter()
                .filter(|f| !f.is_trashed && f.name.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
            files: self
                .files
                .iter()
                .filter(|f| !f.is_trashed && f.name.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
        }
    }

    /// Non-trashed direct children of `parent_id`.
    ///
    /// Deliberately parent-exact: items inside a trashed folder still
    /// appear under their parent, because trashing does not cascade.
    fn children_of(&self, parent_id: Option<FolderId>) -> Listing {
        Listing {
            folders: self
                .folders
                .iter()
                .filter(|f| !f.is_trashed && f.parent_id == parent_id)
                .cloned()
                .collect(),
            files: self
                .files
                .iter()
                .filter(|f| !f.is_trashed && f.parent_id == parent_id)
                .cloned()
                .collect(),
        }
    }

    /// Breadcrumb trail from the synthetic root down to `folder_id`.
    ///
    /// The walk follows `parent_id` upward and stops at the first missing
    /// folder, so a dangling reference degrades to a shorter trail.
    pub fn breadcrumbs(&self, folder_id: Option<FolderId>) -> Vec<Breadcrumb> {
        let mut trail = vec![Breadcrumb {
            id: None,
            name: ROOT_LABEL.to_string(),
        }];

        if let Some(start) = folder_id {
            let mut chain = Vec::new();
            for id in self.ancestors(start) {
                match self.folder(id) {
                    Some(folder) => chain.push(Breadcrumb {
                        id: Some(id),
                        name: folder.name.clone(),
                    }),
                    None => break,
                }
            }
            chain.reverse();
            trail.extend(chain);
        }

        trail
    }
}
