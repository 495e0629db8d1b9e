//! Store manager that dispatches to the configured provider.

use std::sync::Arc;

use tracing::info;

use notifeed_core::config::StoreConfig;
use notifeed_core::error::AppError;
use notifeed_core::result::AppResult;
use notifeed_core::traits::store::KeyValueStore;

/// Store manager that wraps the configured key-value provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The inner store provider.
    inner: Arc<dyn KeyValueStore>,
}

impl StoreManager {
    /// Create a new store manager from configuration.
    pub fn new(config: &StoreConfig) -> AppResult<Self> {
        let inner: Arc<dyn KeyValueStore> = match config.provider.as_str() {
            #[cfg(feature = "file")]
            "file" => {
                info!(path = %config.path, "Initializing file store provider");
                Arc::new(crate::file::FileStore::open(&config.path)?)
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory store provider");
                match config.quota_bytes {
                    Some(quota) => Arc::new(crate::memory::MemoryStore::with_quota(quota)),
                    None => Arc::new(crate::memory::MemoryStore::new()),
                }
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown store provider: '{other}'. Supported: memory, file"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a store manager from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn KeyValueStore>) -> Self {
        Self { inner: provider }
    }

    /// Shared handle to the inner provider.
    pub fn provider(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.inner)
    }
}

impl KeyValueStore for StoreManager {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.inner.remove(key)
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        self.inner.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notifeed_core::error::ErrorKind;

    #[test]
    fn test_memory_provider_selected() {
        let config = StoreConfig {
            provider: "memory".to_string(),
            ..Default::default()
        };
        let manager = StoreManager::new(&config).unwrap();
        manager.set("k", "v").unwrap();
        assert_eq!(manager.provider().get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_unknown_provider_is_configuration_error() {
        let config = StoreConfig {
            provider: "redis".to_string(),
            ..Default::default()
        };
        let err = StoreManager::new(&config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
