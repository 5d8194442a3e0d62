//! File kind classification.

use serde::{Deserialize, Serialize};

/// Broad content category of a file, derived from its MIME type at ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// `image/*` MIME types.
    Image,
    /// `video/*` MIME types.
    Video,
    /// `audio/*` MIME types.
    Audio,
    /// Everything else (documents, archives, unknown).
    Doc,
}

impl FileKind {
    /// Classify a MIME type by its prefix.
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type.starts_with("image/") {
            Self::Image
        } else if mime_type.starts_with("video/") {
            Self::Video
        } else if mime_type.starts_with("audio/") {
            Self::Audio
        } else {
            Self::Doc
        }
    }
}
