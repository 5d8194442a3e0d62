//! Persistence manager that dispatches to the configured provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use cloudvault_core::config::storage::StorageConfig;
use cloudvault_core::error::AppError;
use cloudvault_core::result::AppResult;
use cloudvault_entity::identity::{Identity, IdentityKey};
use cloudvault_store::DriveStore;

/// Trait for vault persistence backends.
///
/// A vault is the whole [`DriveStore`] of one identity key, moved as a
/// unit: load gives back the last saved snapshot (or `None` if the key
/// has never been saved), save replaces the blob. The identity record is
/// a single separate slot describing which account is linked.
///
/// A failed save must leave the previously persisted blob untouched;
/// callers keep the in-memory store authoritative and may retry.
#[async_trait]
pub trait VaultPersistence: Send + Sync + std::fmt::Debug + 'static {
    /// Load the vault persisted for `key`, if any.
    async fn load_vault(&self, key: &IdentityKey) -> AppResult<Option<DriveStore>>;

    /// Persist `store` as the vault for `key`, replacing any previous blob.
    async fn save_vault(&self, key: &IdentityKey, store: &DriveStore) -> AppResult<()>;

    /// Load the linked identity record, if any.
    async fn load_identity(&self) -> AppResult<Option<Identity>>;

    /// Persist the linked identity record.
    async fn save_identity(&self, identity: &Identity) -> AppResult<()>;

    /// Remove the linked identity record, returning to anonymous mode.
    async fn clear_identity(&self) -> AppResult<()>;
}

/// Persistence manager that wraps the configured provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct PersistenceManager {
    /// The inner persistence provider.
    inner: Arc<dyn VaultPersistence>,
}

impl PersistenceManager {
    /// Create a new persistence manager from configuration.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let inner: Arc<dyn VaultPersistence> = match config.provider.as_str() {
            #[cfg(feature = "local")]
            "local" => {
                info!(data_dir = %config.data_dir, "Initializing local vault persistence");
                let provider = crate::local::LocalPersistence::new(&config.data_dir).await?;
                Arc::new(provider)
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory vault persistence");
                Arc::new(crate::memory::MemoryPersistence::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown persistence provider: '{other}'. Supported: local, memory"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a persistence manager from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn VaultPersistence>) -> Self {
        Self { inner: provider }
    }

    /// Get a shared handle to the inner provider.
    pub fn provider(&self) -> Arc<dyn VaultPersistence> {
        Arc::clone(&self.inner)
    }
}

#[async_trait]
impl VaultPersistence for PersistenceManager {
    async fn load_vault(&self, key: &IdentityKey) -> AppResult<Option<DriveStore>> {
        self.inner.load_vault(key).await
    }

    async fn save_vault(&self, key: &IdentityKey, store: &DriveStore) -> AppResult<()> {
        self.inner.save_vault(key, store).await
    }

    async fn load_identity(&self) -> AppResult<Option<Identity>> {
        self.inner.load_identity().await
    }

    async fn save_identity(&self, identity: &Identity) -> AppResult<()> {
        self.inner.save_identity(identity).await
    }

    async fn clear_identity(&self) -> AppResult<()> {
        self.inner.clear_identity().await
    }
}
