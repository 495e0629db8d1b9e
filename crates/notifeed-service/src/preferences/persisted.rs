//! Load/save helpers shared by the preference services.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use notifeed_core::traits::KeyValueStore;

/// Reads `key`, falling back to `T::default()` when missing or malformed.
pub(crate) fn load_or_default<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.get_json::<T>(key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            debug!(key, error = %e, "Malformed preference record, using defaults");
            T::default()
        }
    }
}

/// Writes `value` under `key`, logging and swallowing failures.
pub(crate) fn persist<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> bool
where
    T: Serialize + ?Sized,
{
    match store.set_json(key, value) {
        Ok(()) => true,
        Err(e) => {
            warn!(key, error = %e, "Failed to persist preference record");
            false
        }
    }
}
