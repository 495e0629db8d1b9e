//! Persisted feed filter and grouping mode.

use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use notifeed_core::traits::KeyValueStore;
use notifeed_entity::{FeedFilter, GroupMode};
use notifeed_store::keys;

use super::persisted::persist;

#[derive(Debug, Clone, Copy, Default)]
struct ViewState {
    filter: FeedFilter,
    group_mode: GroupMode,
}

/// Remembers the active filter and grouping across sessions.
#[derive(Debug)]
pub struct ViewPreferences {
    store: Arc<dyn KeyValueStore>,
    state: RwLock<ViewState>,
}

impl ViewPreferences {
    /// Creates the service, loading stored values.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let state = load(store.as_ref());
        Self {
            store,
            state: RwLock::new(state),
        }
    }

    /// Active filter.
    pub fn filter(&self) -> FeedFilter {
        self.state.read().unwrap_or_else(|e| e.into_inner()).filter
    }

    /// Active grouping mode.
    pub fn group_mode(&self) -> GroupMode {
        self.state.read().unwrap_or_else(|e| e.into_inner()).group_mode
    }

    /// Sets and persists the filter.
    pub fn set_filter(&self, filter: FeedFilter) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.filter = filter;
        persist(self.store.as_ref(), keys::FILTER, &filter);
        info!(filter = filter.as_str(), "Feed filter changed");
    }

    /// Sets and persists the grouping mode.
    pub fn set_group_mode(&self, mode: GroupMode) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.group_mode = mode;
        persist(self.store.as_ref(), keys::GROUP_MODE, &mode);
        info!(mode = mode.as_str(), "Group mode changed");
    }

    /// Re-reads both values from the store.
    pub fn reload(&self) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        *state = load(self.store.as_ref());
    }
}

fn load(store: &dyn KeyValueStore) -> ViewState {
    ViewState {
        filter: load_value(store, keys::FILTER, FeedFilter::from_str_value),
        group_mode: load_value(store, keys::GROUP_MODE, GroupMode::from_str_value),
    }
}

/// Accepts both JSON strings and bare values written by older clients.
fn load_value<T>(store: &dyn KeyValueStore, key: &str, parse: fn(&str) -> Option<T>) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            debug!(key, error = %e, "Failed to read view preference");
            return T::default();
        }
    };
    serde_json::from_str::<T>(&raw)
        .ok()
        .or_else(|| parse(raw.trim()))
        .unwrap_or_else(|| {
            debug!(key, raw = %raw, "Unrecognised view preference, using default");
            T::default()
        })
}
