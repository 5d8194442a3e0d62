//! Vault storage configuration.

use serde::{Deserialize, Serialize};

/// Per-identity vault storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Persistence provider to use: `"local"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Root directory for persisted vaults and the identity record.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Total storage quota in bytes (informational, never enforced).
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            data_dir: default_data_dir(),
            quota_bytes: default_quota_bytes(),
        }
    }
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_quota_bytes() -> u64 {
    10_995_116_277_760_000 // 10,000 TiB
}
