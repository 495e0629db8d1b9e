//! Dismissed/read id sets with size caps and age-based discard.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use notifeed_core::config::RetentionConfig;
use notifeed_core::traits::{Clock, KeyValueStore};
use notifeed_entity::{PersistenceRecord, SnoozeRecord};
use notifeed_store::keys;

/// Outcome of a retention cleanup pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    /// Whether the once-per-interval gate was open.
    pub ran: bool,
    /// Keys whose record was older than the retention window and was removed.
    pub pruned: Vec<String>,
}

/// In-memory view of the persisted sets.
#[derive(Debug, Default)]
pub(super) struct RetentionState {
    /// Dismissed ids, oldest first.
    pub(super) dismissed: Vec<String>,
    /// Read ids, oldest first.
    pub(super) read: Vec<String>,
    /// Snoozed ids and the instant each one resurfaces.
    pub(super) snoozed: BTreeMap<String, DateTime<Utc>>,
}

/// Tracks which notification ids were dismissed, read, or snoozed.
///
/// Every mutation rewrites the whole record with a fresh write timestamp.
/// Persistence is best effort: a failing store is logged and the in-memory
/// state stays authoritative for the session.
#[derive(Debug)]
pub struct RetentionManager {
    /// Backing store.
    pub(super) store: Arc<dyn KeyValueStore>,
    /// Time source for record timestamps and snooze expiry.
    pub(super) clock: Arc<dyn Clock>,
    /// Caps and age limits.
    pub(super) config: RetentionConfig,
    /// Current sets.
    pub(super) state: Mutex<RetentionState>,
}

impl RetentionManager {
    /// Creates the manager, running the gated cleanup and loading every record.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        config: RetentionConfig,
    ) -> Self {
        let manager = Self {
            store,
            clock,
            config,
            state: Mutex::new(RetentionState::default()),
        };
        manager.run_cleanup();
        manager.reload();
        manager
    }

    /// Re-reads every record from the store.
    ///
    /// Mutations persist while holding the state lock, so a reload never
    /// observes a write that has not reached the store yet.
    pub fn reload(&self) {
        let mut state = self.lock();
        state.dismissed = self.load_ids(keys::DISMISSED_IDS);
        state.read = self.load_ids(keys::READ_IDS);
        state.snoozed = self.load_snoozes();
    }

    /// Discards records older than `max_age_days`, at most once per
    /// `cleanup_interval_hours`.
    pub fn run_cleanup(&self) -> CleanupReport {
        let now_ms = self.clock.now_millis();
        let interval_ms = Duration::hours(self.config.cleanup_interval_hours).num_milliseconds();

        let last = match self.store.get_json::<i64>(keys::LAST_CLEANUP) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "Ignoring malformed last-cleanup marker");
                None
            }
        };
        if let Some(last) = last {
            if now_ms - last < interval_ms {
                return CleanupReport::default();
            }
        }

        let max_age_ms = self.max_age_ms();
        let mut pruned = Vec::new();
        for key in keys::RETENTION_KEYS {
            if self.record_expired(key, now_ms, max_age_ms) {
                match self.store.remove(key) {
                    Ok(()) => pruned.push(key.to_string()),
                    Err(e) => warn!(key, error = %e, "Failed to discard expired record"),
                }
            }
        }

        if let Err(e) = self.store.set_json(keys::LAST_CLEANUP, &now_ms) {
            warn!(error = %e, "Failed to persist last-cleanup marker");
        }

        if !pruned.is_empty() {
            info!(pruned = ?pruned, "Discarded expired retention records");
            let mut state = self.lock();
            for key in &pruned {
                match key.as_str() {
                    keys::DISMISSED_IDS => state.dismissed.clear(),
                    keys::READ_IDS => state.read.clear(),
                    keys::SNOOZED => state.snoozed.clear(),
                    _ => {}
                }
            }
        }

        CleanupReport { ran: true, pruned }
    }

    /// Whether `id` was dismissed.
    pub fn is_dismissed(&self, id: &str) -> bool {
        self.lock().dismissed.iter().any(|d| d == id)
    }

    /// Whether `id` was marked read locally.
    pub fn is_read(&self, id: &str) -> bool {
        self.lock().read.iter().any(|r| r == id)
    }

    /// Adds `id` to the dismissed set.
    pub fn mark_dismissed(&self, id: &str) {
        let mut state = self.lock();
        push_unique(&mut state.dismissed, id, self.config.dismissed_cap);
        self.persist_ids(keys::DISMISSED_IDS, &state.dismissed);
    }

    /// Adds every id to the dismissed set with a single write.
    pub fn mark_all_dismissed<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = self.lock();
        for id in ids {
            push_unique(&mut state.dismissed, id.as_ref(), self.config.dismissed_cap);
        }
        self.persist_ids(keys::DISMISSED_IDS, &state.dismissed);
    }

    /// Adds `id` to the read set.
    pub fn mark_read(&self, id: &str) {
        let mut state = self.lock();
        push_unique(&mut state.read, id, self.config.read_cap);
        self.persist_ids(keys::READ_IDS, &state.read);
    }

    /// Adds every id to the read set with a single write.
    pub fn mark_all_read<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = self.lock();
        for id in ids {
            push_unique(&mut state.read, id.as_ref(), self.config.read_cap);
        }
        self.persist_ids(keys::READ_IDS, &state.read);
    }

    /// Forgets every dismissed, read, and snoozed id.
    pub fn clear_all(&self) {
        let mut state = self.lock();
        *state = RetentionState::default();
        for key in keys::RETENTION_KEYS {
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "Failed to clear retention record");
            }
        }
        drop(state);
        info!("Cleared all retention records");
    }

    /// Dismissed ids, oldest first.
    pub fn dismissed_ids(&self) -> Vec<String> {
        self.lock().dismissed.clone()
    }

    /// Read ids, oldest first.
    pub fn read_ids(&self) -> Vec<String> {
        self.lock().read.clone()
    }

    /// The clock this manager stamps records with.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, RetentionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(super) fn max_age_ms(&self) -> i64 {
        Duration::days(self.config.max_age_days).num_milliseconds()
    }

    fn record_expired(&self, key: &str, now_ms: i64, max_age_ms: i64) -> bool {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                warn!(key, error = %e, "Failed to read retention record");
                return false;
            }
        };
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => {
                let timestamp = value.get("timestamp").and_then(|t| t.as_i64()).unwrap_or(0);
                now_ms - timestamp > max_age_ms
            }
            Err(e) => {
                debug!(key, error = %e, "Malformed retention record, discarding");
                true
            }
        }
    }

    fn load_ids(&self, key: &str) -> Vec<String> {
        match self.store.get_json::<PersistenceRecord>(key) {
            Ok(Some(record)) => {
                if record.is_expired(self.clock.now_millis(), self.max_age_ms())
                    && self.cleanup_due()
                {
                    debug!(key, "Retention record expired on load");
                    return Vec::new();
                }
                record.ids
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                debug!(key, error = %e, "Malformed retention record, using empty set");
                Vec::new()
            }
        }
    }

    fn load_snoozes(&self) -> BTreeMap<String, DateTime<Utc>> {
        match self.store.get_json::<SnoozeRecord>(keys::SNOOZED) {
            Ok(Some(record)) => record.entries,
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                debug!(error = %e, "Malformed snooze record, using empty map");
                BTreeMap::new()
            }
        }
    }

    /// Whether the cleanup gate would currently be open.
    fn cleanup_due(&self) -> bool {
        let interval_ms = Duration::hours(self.config.cleanup_interval_hours).num_milliseconds();
        match self.store.get_json::<i64>(keys::LAST_CLEANUP) {
            Ok(Some(last)) => self.clock.now_millis() - last >= interval_ms,
            _ => true,
        }
    }

    fn persist_ids(&self, key: &str, ids: &[String]) {
        let record = PersistenceRecord {
            ids: ids.to_vec(),
            timestamp: self.clock.now_millis(),
        };
        if let Err(e) = self.store.set_json(key, &record) {
            warn!(key, error = %e, "Failed to persist retention record");
        }
    }
}

/// Appends `id` unless present, then keeps only the newest `cap` entries.
fn push_unique(ids: &mut Vec<String>, id: &str, cap: usize) {
    if !ids.iter().any(|existing| existing == id) {
        ids.push(id.to_string());
    }
    if ids.len() > cap {
        let excess = ids.len() - cap;
        ids.drain(..excess);
    }
}
