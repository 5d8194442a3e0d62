//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cloudvault_core::AppError;
use cloudvault_core::result::AppResult;
use cloudvault_core::types::FolderId;

/// A folder in the vault hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Parent folder ID (None for root-level folders).
    pub parent_id: Option<FolderId>,
    /// Folder name.
    pub name: String,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last modified. The engine never stamps
    /// folders; only files carry modification times.
    pub last_modified: Option<DateTime<Utc>>,
    /// Whether the folder is in the trash.
    pub is_trashed: bool,
    /// Whether the folder is starred.
    pub is_starred: bool,
    /// Whether the folder is shared.
    pub is_shared: bool,
}

impl Folder {
    /// Create a new folder record.
    ///
    /// The name is trimmed; an empty result is a validation error.
    pub fn new(name: &str, parent_id: Option<FolderId>) -> AppResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        Ok(Self {
            id: FolderId::new(),
            parent_id,
            name: name.to_string(),
            created_at: Utc::now(),
            last_modified: None,
            is_trashed: false,
            is_starred: false,
            is_shared: false,
        })
    }

    /// Check if this is a root-level folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
