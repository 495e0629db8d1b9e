//! Snoozed ids: hidden from the feed until their resurface time.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use notifeed_entity::SnoozeRecord;
use notifeed_store::keys;

use super::manager::RetentionManager;

impl RetentionManager {
    /// Hides `id` until `until`. Snoozing again replaces the previous time.
    pub fn snooze(&self, id: &str, until: DateTime<Utc>) {
        let mut state = self.lock();
        state.snoozed.insert(id.to_string(), until);
        self.persist_snoozes(&state.snoozed);
        debug!(id, until = %until, "Snoozed notification");
    }

    /// Cancels a snooze. Returns whether one existed.
    pub fn unsnooze(&self, id: &str) -> bool {
        let mut state = self.lock();
        if state.snoozed.remove(id).is_none() {
            return false;
        }
        self.persist_snoozes(&state.snoozed);
        true
    }

    /// The resurface time of `id`, if it is snoozed into the future.
    pub fn snoozed_until(&self, id: &str) -> Option<DateTime<Utc>> {
        let now = self.clock.now();
        self.lock()
            .snoozed
            .get(id)
            .copied()
            .filter(|until| *until > now)
    }

    /// Every snooze entry, including ones whose time has passed but have
    /// not been swept yet.
    pub fn snoozed(&self) -> BTreeMap<String, DateTime<Utc>> {
        self.lock().snoozed.clone()
    }

    /// Drops entries whose resurface time has passed and returns their ids.
    pub fn sweep_snoozes(&self) -> Vec<String> {
        let now = self.clock.now();
        let mut state = self.lock();
        let expired: Vec<String> = state
            .snoozed
            .iter()
            .filter(|(_, until)| **until <= now)
            .map(|(id, _)| id.clone())
            .collect();
        if expired.is_empty() {
            return expired;
        }
        for id in &expired {
            state.snoozed.remove(id);
        }
        self.persist_snoozes(&state.snoozed);
        debug!(count = expired.len(), "Swept expired snoozes");
        expired
    }

    fn persist_snoozes(&self, entries: &BTreeMap<String, DateTime<Utc>>) {
        if entries.is_empty() {
            if let Err(e) = self.store.remove(keys::SNOOZED) {
                warn!(error = %e, "Failed to clear snooze record");
            }
            return;
        }
        let record = SnoozeRecord {
            entries: entries.clone(),
            timestamp: self.clock.now_millis(),
        };
        if let Err(e) = self.store.set_json(keys::SNOOZED, &record) {
            warn!(error = %e, "Failed to persist snooze record");
        }
    }
}
