//! # cloudvault-persist
//!
//! Vault persistence providers for CloudVault. Supports two modes:
//!
//! - **memory**: In-process blobs held in a [dashmap](https://crates.io/crates/dashmap)
//! - **local**: One JSON file per identity key under a data directory
//!
//! The provider is selected at runtime based on configuration. Every
//! identity key owns an independent blob; providers never share state
//! between keys.

#[cfg(feature = "local")]
pub mod local;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use provider::{PersistenceManager, VaultPersistence};
