//! Persistent key-value store trait.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::result::AppResult;

/// A synchronous string key-value store (the equivalent of browser
/// `localStorage`).
///
/// Values are JSON strings. Writes are synchronous and may fail (quota
/// exceeded, I/O error); callers that treat persistence as best-effort
/// log and swallow those failures.
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> AppResult<()>;

    /// List all keys currently stored.
    fn keys(&self) -> AppResult<Vec<String>>;
}

impl dyn KeyValueStore {
    /// Get a typed value by deserializing from JSON.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self.get(key)? {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }

    /// Set a typed value by serializing to JSON.
    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.set(key, &json)
    }
}
