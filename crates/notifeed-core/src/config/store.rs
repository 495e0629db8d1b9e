//! Persistent key-value store configuration.

use serde::{Deserialize, Serialize};

/// Store backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store provider: `"memory"` or `"file"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Path of the JSON document backing the `"file"` provider.
    #[serde(default = "default_path")]
    pub path: String,
    /// Optional byte quota for the `"memory"` provider.
    #[serde(default)]
    pub quota_bytes: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            path: default_path(),
            quota_bytes: None,
        }
    }
}

fn default_provider() -> String {
    "file".to_string()
}

fn default_path() -> String {
    "data/notifeed-store.json".to_string()
}
