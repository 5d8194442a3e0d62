//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cloudvault_core::AppError;
use cloudvault_core::result::AppResult;
use cloudvault_core::types::{FileId, FolderId};

use crate::content::FileContent;
use crate::kind::FileKind;

/// A file stored in a CloudVault vault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// The folder containing this file (None for root level).
    pub parent_id: Option<FolderId>,
    /// The file name (including extension).
    pub name: String,
    /// Broad content category, classified from the MIME type at ingest.
    pub kind: FileKind,
    /// MIME type of the file.
    pub mime_type: String,
    /// File size in bytes. Immutable after ingest.
    pub size: u64,
    /// The full binary payload.
    pub content: FileContent,
    /// When the file was ingested.
    pub created_at: DateTime<Utc>,
    /// When the file was last modified: the source timestamp when the
    /// upload carried one, otherwise the ingest time.
    pub last_modified: Option<DateTime<Utc>>,
    /// The unaltered modification timestamp of the source file, when the
    /// upload provided one.
    pub source_modified: Option<DateTime<Utc>>,
    /// Whether the file is in the trash.
    pub is_trashed: bool,
    /// Whether the file is starred.
    pub is_starred: bool,
    /// Whether the file is shared.
    pub is_shared: bool,
}

/// Data handed to the engine to ingest one file.
///
/// The caller is responsible for reading the source blob fully; by the
/// time an upload reaches the engine it is plain bytes plus metadata.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Original file name.
    pub name: String,
    /// MIME type reported by the source.
    pub mime_type: String,
    /// The raw payload.
    pub content: FileContent,
    /// Modification timestamp of the source file, if known.
    pub source_modified: Option<DateTime<Utc>>,
}

impl File {
    /// Create a new file record from an upload.
    ///
    /// The name is trimmed; an empty result is a validation error. Size
    /// and kind are derived from the payload and MIME type; no payload
    /// is ever rejected.
    pub fn new(upload: FileUpload, parent_id: Option<FolderId>) -> AppResult<Self> {
        let name = upload.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }

        let now = Utc::now();
        Ok(Self {
            id: FileId::new(),
            parent_id,
            name: name.to_string(),
            kind: FileKind::from_mime(&upload.mime_type),
            mime_type: upload.mime_type,
            size: upload.content.len() as u64,
            content: upload.content,
            created_at: now,
            last_modified: Some(upload.source_modified.unwrap_or(now)),
            source_modified: upload.source_modified,
            is_trashed: false,
            is_starred: false,
            is_shared: false,
        })
    }
}
