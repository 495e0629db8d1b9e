//! Do-not-disturb policy.

use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use notifeed_core::traits::{Clock, KeyValueStore};
use notifeed_entity::DndPreferences;
use notifeed_entity::preference::DndPrefsPatch;
use notifeed_store::keys;

use super::persisted::{load_or_default, persist};

/// Persists [`DndPreferences`] and answers whether delivery is muted.
#[derive(Debug)]
pub struct DndService {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    prefs: RwLock<DndPreferences>,
}

impl DndService {
    /// Creates the service, loading stored preferences.
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let prefs = load_or_default(store.as_ref(), keys::DND_PREFS);
        Self {
            store,
            clock,
            prefs: RwLock::new(prefs),
        }
    }

    /// Current preferences.
    pub fn prefs(&self) -> DndPreferences {
        self.prefs.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Merges `patch` and persists the result.
    pub fn update_prefs(&self, patch: &DndPrefsPatch) -> DndPreferences {
        let updated = {
            let mut prefs = self.prefs.write().unwrap_or_else(|e| e.into_inner());
            prefs.apply(patch);
            persist(self.store.as_ref(), keys::DND_PREFS, &*prefs);
            prefs.clone()
        };
        info!(
            enabled = updated.enabled,
            schedule = updated.schedule_enabled,
            "Updated do-not-disturb preferences"
        );
        updated
    }

    /// Re-reads preferences from the store.
    pub fn reload(&self) -> DndPreferences {
        let mut prefs = self.prefs.write().unwrap_or_else(|e| e.into_inner());
        *prefs = load_or_default(self.store.as_ref(), keys::DND_PREFS);
        prefs.clone()
    }

    /// Whether the local time falls inside the configured quiet-hours
    /// window. Always false while the schedule is off.
    pub fn is_in_quiet_hours(&self) -> bool {
        let prefs = self.prefs();
        prefs.schedule_enabled && prefs.window_contains(self.clock.local_time())
    }

    /// Whether a notification of the given urgency should be silenced.
    pub fn is_muted(&self, is_urgent: bool) -> bool {
        let prefs = self.prefs();
        if !prefs.enabled {
            return false;
        }
        if prefs.allow_urgent && is_urgent {
            debug!("Urgent notification bypasses do-not-disturb");
            return false;
        }
        if prefs.schedule_enabled {
            return self.is_in_quiet_hours();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use notifeed_core::traits::ManualClock;
    use notifeed_store::memory::MemoryStore;

    fn service_at(hour: u32, minute: u32) -> (DndService, Arc<ManualClock>) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 1, 10, hour, minute, 0).unwrap(),
        ));
        (DndService::new(store, clock.clone()), clock)
    }

    #[test]
    fn test_disabled_never_mutes() {
        let (dnd, _) = service_at(23, 0);
        assert!(!dnd.is_muted(false));
        assert!(!dnd.is_muted(true));
    }

    #[test]
    fn test_enabled_without_schedule_mutes_everything_but_urgent() {
        let (dnd, _) = service_at(12, 0);
        dnd.update_prefs(&DndPrefsPatch {
            enabled: Some(true),
            ..Default::default()
        });
        assert!(dnd.is_muted(false));
        assert!(!dnd.is_muted(true));

        dnd.update_prefs(&DndPrefsPatch {
            allow_urgent: Some(false),
            ..Default::default()
        });
        assert!(dnd.is_muted(true));
    }

    #[test]
    fn test_schedule_follows_local_time() {
        let (dnd, clock) = service_at(23, 0);
        dnd.update_prefs(&DndPrefsPatch {
            enabled: Some(true),
            schedule_enabled: Some(true),
            ..Default::default()
        });
        assert!(dnd.is_in_quiet_hours());
        assert!(dnd.is_muted(false));

        clock.set(Utc.with_ymd_and_hms(2026, 1, 11, 9, 0, 0).unwrap());
        assert!(!dnd.is_in_quiet_hours());
        assert!(!dnd.is_muted(false));

        clock.set(Utc.with_ymd_and_hms(2026, 1, 11, 7, 59, 0).unwrap());
        assert!(dnd.is_in_quiet_hours());
    }
}
