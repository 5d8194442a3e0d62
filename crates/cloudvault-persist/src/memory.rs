//! In-memory vault persistence.

use std::sync::Mutex;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use cloudvault_core::result::AppResult;
use cloudvault_entity::identity::{Identity, IdentityKey};
use cloudvault_store::DriveStore;

use crate::provider::VaultPersistence;

/// In-process vault persistence, used by tests and ephemeral sessions.
///
/// Blobs are stored as serialized JSON strings keyed by identity slug,
/// so the round trip exercises the same serde path as the on-disk
/// provider.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    /// One serialized vault blob per identity slug.
    vaults: DashMap<String, String>,
    /// The single linked-identity record.
    identity: Mutex<Option<String>>,
}

impl MemoryPersistence {
    /// Create an empty in-memory persistence store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identity keys with a persisted vault.
    pub fn vault_count(&self) -> usize {
        self.vaults.len()
    }

    fn identity_slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // A poisoned lock only means a panic mid-write; the slot itself
        // is still a plain Option.
        self.identity
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl VaultPersistence for MemoryPersistence {
    async fn load_vault(&self, key: &IdentityKey) -> AppResult<Option<DriveStore>> {
        match self.vaults.get(&key.slug()) {
            Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
            None => Ok(None),
        }
    }

    async fn save_vault(&self, key: &IdentityKey, store: &DriveStore) -> AppResult<()> {
        let blob = serde_json::to_string(store)?;
        debug!(identity = %key, bytes = blob.len(), "Stored vault blob");
        self.vaults.insert(key.slug(), blob);
        Ok(())
    }

    async fn load_identity(&self) -> AppResult<Option<Identity>> {
        match self.identity_slot().as_deref() {
            Some(blob) => Ok(Some(serde_json::from_str(blob)?)),
            None => Ok(None),
        }
    }

    async fn save_identity(&self, identity: &Identity) -> AppResult<()> {
        let blob = serde_json::to_string(identity)?;
        *self.identity_slot() = Some(blob);
        Ok(())
    }

    async fn clear_identity(&self) -> AppResult<()> {
        *self.identity_slot() = None;
        Ok(())
    }
}
