//! Local filesystem vault persistence.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::debug;

use cloudvault_core::error::{AppError, ErrorKind};
use cloudvault_core::result::AppResult;
use cloudvault_entity::identity::{Identity, IdentityKey};
use cloudvault_store::DriveStore;

use crate::provider::VaultPersistence;

/// Local filesystem persistence provider.
///
/// Keeps one `vaults/<slug>.json` blob per identity key plus a single
/// `identity.json` record, all under the configured data directory.
#[derive(Debug, Clone)]
pub struct LocalPersistence {
    /// Root directory for all persisted data.
    root: PathBuf,
}

impl LocalPersistence {
    /// Create a new local persistence provider rooted at the given path.
    pub async fn new(data_dir: &str) -> AppResult<Self> {
        let root = PathBuf::from(data_dir);
        fs::create_dir_all(root.join("vaults")).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create data directory: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    fn vault_path(&self, key: &IdentityKey) -> PathBuf {
        self.root.join("vaults").join(format!("{}.json", key.slug()))
    }

    fn identity_path(&self) -> PathBuf {
        self.root.join("identity.json")
    }

    async fn read_json<T: DeserializeOwned>(&self, path: &Path) -> AppResult<Option<T>> {
        let blob = match fs::read_to_string(path).await {
            Ok(blob) => blob,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read {}", path.display()),
                    e,
                ));
            }
        };

        let value = serde_json::from_str(&blob).map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Malformed blob at {}", path.display()),
                e,
            )
        })?;
        Ok(Some(value))
    }

    async fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> AppResult<()> {
        let blob = serde_json::to_string(value)?;
        fs::write(path, &blob).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write {}", path.display()),
                e,
            )
        })?;

        debug!(path = %path.display(), bytes = blob.len(), "Wrote blob");
        Ok(())
    }
}

#[async_trait]
impl VaultPersistence for LocalPersistence {
    async fn load_vault(&self, key: &IdentityKey) -> AppResult<Option<DriveStore>> {
        self.read_json(&self.vault_path(key)).await
    }

    async fn save_vault(&self, key: &IdentityKey, store: &DriveStore) -> AppResult<()> {
        self.write_json(&self.vault_path(key), store).await
    }

    async fn load_identity(&self) -> AppResult<Option<Identity>> {
        self.read_json(&self.identity_path()).await
    }

    async fn save_identity(&self, identity: &Identity) -> AppResult<()> {
        self.write_json(&self.identity_path(), identity).await
    }

    async fn clear_identity(&self) -> AppResult<()> {
        let path = self.identity_path();
        if path.exists() {
            fs::remove_file(&path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to remove {}", path.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}
