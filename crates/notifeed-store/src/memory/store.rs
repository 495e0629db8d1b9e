//! In-memory store implementation using the dashmap crate.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use notifeed_core::error::AppError;
use notifeed_core::result::AppResult;
use notifeed_core::traits::store::KeyValueStore;

/// In-memory key-value store.
///
/// Clones share the same map. An optional byte quota (keys plus values)
/// makes oversized writes fail the way a full browser store does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// The underlying map.
    entries: Arc<DashMap<String, String>>,
    /// Maximum total bytes, if limited.
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    /// Create an unlimited store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes beyond `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Total bytes currently held.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| entry.key().len() + entry.value().len())
            .sum()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        if let Some(quota) = self.quota_bytes {
            let existing = self
                .entries
                .get(key)
                .map(|v| key.len() + v.value().len())
                .unwrap_or(0);
            let projected = self.used_bytes() - existing + key.len() + value.len();
            if projected > quota {
                debug!(key, projected, quota, "Memory store quota exceeded");
                return Err(AppError::storage(format!(
                    "Quota exceeded writing '{key}' ({projected} > {quota} bytes)"
                )));
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        Ok(self.entries.iter().map(|e| e.key().clone()).collect())
    }
}
