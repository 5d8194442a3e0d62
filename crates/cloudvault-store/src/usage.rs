//! Storage accounting over the canonical file set.

use serde::{Deserialize, Serialize};

use crate::store::DriveStore;

/// A point-in-time usage snapshot against the configured quota.
///
/// Purely informational: the engine never rejects an ingest for
/// exceeding the quota.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StorageUsage {
    /// Bytes held by all non-trashed files.
    pub used_bytes: u64,
    /// Configured total quota in bytes.
    pub quota_bytes: u64,
    /// Usage percentage (0.0 - 100.0).
    pub percent: f64,
}

impl StorageUsage {
    /// Compute a usage snapshot from used and total values.
    pub fn new(used_bytes: u64, quota_bytes: u64) -> Self {
        let percent = if quota_bytes == 0 {
            0.0
        } else {
            (used_bytes as f64 / quota_bytes as f64) * 100.0
        };

        Self {
            used_bytes,
            quota_bytes,
            percent,
        }
    }
}

impl DriveStore {
    /// Sum of `size` over all non-trashed files.
    ///
    /// Trashed files do not count against usage until restored.
    pub fn used_bytes(&self) -> u64 {
        self.files
            .iter()
            .filter(|f| !f.is_trashed)
            .map(|f| f.size)
            .sum()
    }

    /// Usage snapshot of this store against `quota_bytes`.
    pub fn usage(&self, quota_bytes: u64) -> StorageUsage {
        StorageUsage::new(self.used_bytes(), quota_bytes)
    }
}
