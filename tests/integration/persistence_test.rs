//! Integration tests for the persistence providers and their dispatch.

mod helpers;

use cloudvault_core::error::ErrorKind;
use cloudvault_entity::identity::{Identity, IdentityKey};
use cloudvault_persist::local::LocalPersistence;
use cloudvault_persist::memory::MemoryPersistence;
use cloudvault_persist::{PersistenceManager, VaultPersistence};
use cloudvault_store::DriveStore;

fn sample_store(folder: &str) -> DriveStore {
    let mut store = DriveStore::new();
    store.create_folder(folder, None).expect("create");
    store
        .ingest_file(helpers::upload("readme.txt", b"hello"), None)
        .expect("ingest");
    store
}

#[tokio::test]
async fn test_local_vaults_survive_reopening() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_dir = dir.path().to_str().expect("utf-8 path").to_string();

    {
        let provider = LocalPersistence::new(&data_dir).await.expect("init");
        provider
            .save_vault(&IdentityKey::Anonymous, &sample_store("Anon"))
            .await
            .expect("save");
        provider
            .save_vault(
                &IdentityKey::Linked("user@example.com".to_string()),
                &sample_store("Linked"),
            )
            .await
            .expect("save");
    }

    // A fresh provider over the same directory sees both blobs.
    let provider = LocalPersistence::new(&data_dir).await.expect("reopen");
    let anon = provider
        .load_vault(&IdentityKey::Anonymous)
        .await
        .expect("load")
        .expect("present");
    assert_eq!(anon.folders[0].name, "Anon");

    let linked = provider
        .load_vault(&IdentityKey::Linked("user@example.com".to_string()))
        .await
        .expect("load")
        .expect("present");
    assert_eq!(linked.folders[0].name, "Linked");

    // Each key owns its own file under vaults/.
    assert!(dir.path().join("vaults/anonymous.json").exists());
    assert!(dir.path().join("vaults/user@example.com.json").exists());
}

#[tokio::test]
async fn test_local_malformed_blob_is_a_serialization_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_dir = dir.path().to_str().expect("utf-8 path").to_string();
    let provider = LocalPersistence::new(&data_dir).await.expect("init");

    tokio::fs::write(dir.path().join("vaults/anonymous.json"), b"{not json")
        .await
        .expect("write garbage");

    let err = provider
        .load_vault(&IdentityKey::Anonymous)
        .await
        .expect_err("malformed blob");
    assert_eq!(err.kind, ErrorKind::Serialization);
}

#[tokio::test]
async fn test_local_identity_record_lifecycle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_dir = dir.path().to_str().expect("utf-8 path").to_string();
    let provider = LocalPersistence::new(&data_dir).await.expect("init");

    assert!(provider.load_identity().await.expect("load").is_none());

    let identity = Identity::link("ada@example.com").expect("valid email");
    provider.save_identity(&identity).await.expect("save");
    assert!(dir.path().join("identity.json").exists());

    let loaded = provider
        .load_identity()
        .await
        .expect("load")
        .expect("present");
    assert_eq!(loaded.email, "ada@example.com");

    provider.clear_identity().await.expect("clear");
    assert!(provider.load_identity().await.expect("load").is_none());
    assert!(!dir.path().join("identity.json").exists());
}

#[tokio::test]
async fn test_memory_keys_are_independent() {
    let provider = MemoryPersistence::new();
    let anon = IdentityKey::Anonymous;
    let linked = IdentityKey::Linked("a@b.co".to_string());

    provider
        .save_vault(&anon, &sample_store("Anon"))
        .await
        .expect("save");
    assert_eq!(provider.vault_count(), 1);
    assert!(provider.load_vault(&linked).await.expect("load").is_none());

    provider
        .save_vault(&linked, &sample_store("Linked"))
        .await
        .expect("save");
    assert_eq!(provider.vault_count(), 2);

    // Overwriting one key leaves the other blob alone.
    provider
        .save_vault(&anon, &DriveStore::new())
        .await
        .expect("save");
    assert!(provider
        .load_vault(&anon)
        .await
        .expect("load")
        .expect("present")
        .is_empty());
    assert_eq!(
        provider
            .load_vault(&linked)
            .await
            .expect("load")
            .expect("present")
            .folders[0]
            .name,
        "Linked"
    );
}

#[tokio::test]
async fn test_manager_dispatches_by_provider_name() {
    let mut config = helpers::immediate_config();

    config.storage.provider = "memory".to_string();
    let manager = PersistenceManager::new(&config.storage)
        .await
        .expect("memory provider");
    manager
        .save_vault(&IdentityKey::Anonymous, &sample_store("M"))
        .await
        .expect("save through manager");

    let dir = tempfile::tempdir().expect("tempdir");
    config.storage.provider = "local".to_string();
    config.storage.data_dir = dir.path().to_str().expect("utf-8 path").to_string();
    PersistenceManager::new(&config.storage)
        .await
        .expect("local provider");

    config.storage.provider = "s3".to_string();
    let err = PersistenceManager::new(&config.storage)
        .await
        .expect_err("unknown provider");
    assert_eq!(err.kind, ErrorKind::Configuration);
}
