//! Typed references to items of either kind.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cloudvault_core::types::{FileId, FolderId};

/// Whether an item is a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A file record.
    File,
    /// A folder record.
    Folder,
}

/// A typed reference to one item in a vault.
///
/// Engine operations that work on "an item" (trash, restore, rename,
/// toggles, move) take one of these instead of a loose `(id, kind)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemRef {
    /// Reference to a file.
    File(FileId),
    /// Reference to a folder.
    Folder(FolderId),
}

impl ItemRef {
    /// Build a reference from a kind tag and a raw UUID.
    pub fn from_parts(kind: ItemKind, id: Uuid) -> Self {
        match kind {
            ItemKind::File => Self::File(FileId::from_uuid(id)),
            ItemKind::Folder => Self::Folder(FolderId::from_uuid(id)),
        }
    }

    /// The kind of the referenced item.
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::File(_) => ItemKind::File,
            Self::Folder(_) => ItemKind::Folder,
        }
    }

    /// The raw UUID of the referenced item.
    pub fn uuid(&self) -> Uuid {
        match self {
            Self::File(id) => id.into_uuid(),
            Self::Folder(id) => id.into_uuid(),
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(id) => write!(f, "file {id}"),
            Self::Folder(id) => write!(f, "folder {id}"),
        }
    }
}
