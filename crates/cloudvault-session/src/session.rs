//! The live drive session: in-memory store, identity, and save wiring.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use cloudvault_core::AppError;
use cloudvault_core::config::AppConfig;
use cloudvault_core::error::ErrorKind;
use cloudvault_core::result::AppResult;
use cloudvault_core::types::FolderId;
use cloudvault_entity::file::{File, FileUpload};
use cloudvault_entity::folder::Folder;
use cloudvault_entity::identity::{Identity, IdentityKey};
use cloudvault_entity::item::ItemRef;
use cloudvault_persist::VaultPersistence;
use cloudvault_store::{Breadcrumb, DriveStore, Listing, StorageUsage, ViewRequest};

use crate::saver::Saver;

/// One open drive: the authoritative in-memory store for the active
/// identity, plus the background saver that persists it.
///
/// All mutations go through this type so every change schedules a save.
/// Reads and mutations are synchronous; only opening the session and the
/// identity switches touch the persistence provider directly.
#[derive(Debug)]
pub struct DriveSession {
    persistence: Arc<dyn VaultPersistence>,
    store: DriveStore,
    identity: Option<Identity>,
    saver: Saver,
    quota_bytes: u64,
}

impl DriveSession {
    /// Open a session against `persistence`.
    ///
    /// Restores the linked identity (if any) and that identity's vault.
    /// A malformed persisted blob is discarded and the session starts
    /// from an empty store; storage errors propagate.
    pub async fn open(
        persistence: Arc<dyn VaultPersistence>,
        config: &AppConfig,
    ) -> AppResult<Self> {
        let identity = match persistence.load_identity().await {
            Ok(identity) => identity,
            Err(e) if e.kind == ErrorKind::Serialization => {
                warn!(error = %e, "Discarding malformed identity blob");
                None
            }
            Err(e) => return Err(e),
        };

        let key = IdentityKey::for_identity(identity.as_ref());
        let store = load_vault_or_default(&persistence, &key).await?;

        info!(
            identity = %key,
            files = store.files.len(),
            folders = store.folders.len(),
            "Session opened"
        );

        let saver = Saver::new(
            Arc::clone(&persistence),
            Duration::from_millis(config.save.delay_ms),
        );

        Ok(Self {
            persistence,
            store,
            identity,
            saver,
            quota_bytes: config.storage.quota_bytes,
        })
    }

    /// The in-memory store for the active identity.
    pub fn store(&self) -> &DriveStore {
        &self.store
    }

    /// The linked identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// The persistence key the session currently reads and writes.
    pub fn active_key(&self) -> IdentityKey {
        IdentityKey::for_identity(self.identity.as_ref())
    }

    // ── Mutations ──────────────────────────────────────────────────────

    /// Create a folder and schedule a save.
    pub fn create_folder(&mut self, name: &str, parent_id: Option<FolderId>) -> AppResult<Folder> {
        let folder = self.store.create_folder(name, parent_id)?;
        self.schedule_save();
        Ok(folder)
    }

    /// Ingest an uploaded file and schedule a save.
    pub fn ingest_file(
        &mut self,
        upload: FileUpload,
        parent_id: Option<FolderId>,
    ) -> AppResult<File> {
        let file = self.store.ingest_file(upload, parent_id)?;
        self.schedule_save();
        Ok(file)
    }

    /// Rename an item. Saves only when the store changed.
    pub fn rename_item(&mut self, item: ItemRef, new_name: &str) -> bool {
        let changed = self.store.rename_item(item, new_name);
        if changed {
            self.schedule_save();
        }
        changed
    }

    /// Move an item to the trash. Saves only when the store changed.
    pub fn trash_item(&mut self, item: ItemRef) -> bool {
        let changed = self.store.trash_item(item);
        if changed {
            self.schedule_save();
        }
        changed
    }

    /// Restore an item from the trash. Saves only when the store changed.
    pub fn restore_item(&mut self, item: ItemRef) -> bool {
        let changed = self.store.restore_item(item);
        if changed {
            self.schedule_save();
        }
        changed
    }

    /// Permanently delete an item. Saves only when the store changed.
    pub fn purge_item(&mut self, item: ItemRef) -> bool {
        let changed = self.store.purge_item(item);
        if changed {
            self.schedule_save();
        }
        changed
    }

    /// Permanently delete every trashed item. Returns the removed count.
    pub fn empty_trash(&mut self) -> usize {
        let removed = self.store.empty_trash();
        if removed > 0 {
            self.schedule_save();
        }
        removed
    }

    /// Move an item under a new parent. Saves only when the store changed.
    pub fn move_item(&mut self, item: ItemRef, target: Option<FolderId>) -> bool {
        let changed = self.store.move_item(item, target);
        if changed {
            self.schedule_save();
        }
        changed
    }

    /// Flip an item's starred flag. Saves only when the store changed.
    pub fn toggle_starred(&mut self, item: ItemRef) -> bool {
        let changed = self.store.toggle_starred(item);
        if changed {
            self.schedule_save();
        }
        changed
    }

    /// Flip an item's shared flag. Saves only when the store changed.
    pub fn toggle_shared(&mut self, item: ItemRef) -> bool {
        let changed = self.store.toggle_shared(item);
        if changed {
            self.schedule_save();
        }
        changed
    }

    // ── Views ──────────────────────────────────────────────────────────

    /// Project the requested view over the store.
    pub fn project(&self, request: &ViewRequest) -> Listing {
        self.store.project(request)
    }

    /// Breadcrumb trail for a location, root first.
    pub fn breadcrumbs(&self, folder_id: Option<FolderId>) -> Vec<Breadcrumb> {
        self.store.breadcrumbs(folder_id)
    }

    /// Usage snapshot against the configured quota.
    pub fn usage(&self) -> StorageUsage {
        self.store.usage(self.quota_bytes)
    }

    /// Bytes held by all non-trashed files.
    pub fn used_bytes(&self) -> u64 {
        self.store.used_bytes()
    }

    // ── Saving ─────────────────────────────────────────────────────────

    /// Whether a scheduled save has not been committed yet.
    pub fn is_saving(&self) -> bool {
        self.saver.is_saving()
    }

    /// The error of the most recent save, if it failed.
    pub fn last_save_error(&self) -> Option<AppError> {
        self.saver.last_error()
    }

    /// Wait for every pending save to commit.
    pub async fn flush(&self) {
        self.saver.flush().await;
    }

    fn schedule_save(&self) {
        self.saver.schedule(self.active_key(), self.store.clone());
    }

    // ── Identity ───────────────────────────────────────────────────────

    /// Link an identity and switch to its vault.
    ///
    /// Pending saves for the current key commit first, then the session
    /// swaps to the linked key's independent vault. Contents are never
    /// merged across keys. A storage failure leaves the session on its
    /// current key with nothing recorded.
    pub async fn link_identity(&mut self, email: &str) -> AppResult<Identity> {
        let identity = Identity::link(email)?;

        self.saver.flush().await;
        let store = load_vault_or_default(&self.persistence, &identity.key()).await?;
        self.persistence.save_identity(&identity).await?;

        self.store = store;
        self.identity = Some(identity.clone());
        info!(email = %identity.email, "Identity linked");
        Ok(identity)
    }

    /// Unlink the active identity and switch back to the anonymous vault.
    ///
    /// Returns `false` without touching anything when the session is
    /// already anonymous. A storage failure leaves the session fully
    /// linked; the switch can be retried.
    pub async fn unlink_identity(&mut self) -> AppResult<bool> {
        let Some(email) = self.identity.as_ref().map(|i| i.email.clone()) else {
            return Ok(false);
        };

        self.saver.flush().await;
        // Every fallible step runs before the session mutates, so an
        // error cannot strand it between keys.
        let store = load_vault_or_default(&self.persistence, &IdentityKey::Anonymous).await?;
        self.persistence.clear_identity().await?;

        self.store = store;
        self.identity = None;
        info!(email = %email, "Identity unlinked");
        Ok(true)
    }
}

async fn load_vault_or_default(
    persistence: &Arc<dyn VaultPersistence>,
    key: &IdentityKey,
) -> AppResult<DriveStore> {
    match persistence.load_vault(key).await {
        Ok(Some(store)) => Ok(store),
        Ok(None) => Ok(DriveStore::new()),
        Err(e) if e.kind == ErrorKind::Serialization => {
            warn!(identity = %key, error = %e, "Discarding malformed vault blob");
            Ok(DriveStore::new())
        }
        Err(e) => Err(e),
    }
}
