//! Delayed-save configuration.

use serde::{Deserialize, Serialize};

/// Settings for the background vault saver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveConfig {
    /// Artificial delay in milliseconds between scheduling a save and
    /// committing it, simulating sync latency. Set to 0 to write
    /// immediately.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
        }
    }
}

fn default_delay_ms() -> u64 {
    800
}
