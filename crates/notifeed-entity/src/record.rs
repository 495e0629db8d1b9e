//! Persisted retention records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An ordered id set stamped with its last write time.
///
/// The whole record expires `max_age_days` after `timestamp`; every write
/// re-stamps it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceRecord {
    /// Ids, oldest first.
    #[serde(default)]
    pub ids: Vec<String>,
    /// Write time, epoch milliseconds.
    #[serde(default)]
    pub timestamp: i64,
}

impl PersistenceRecord {
    /// Whether the record was written more than `max_age_ms` before `now_ms`.
    pub fn is_expired(&self, now_ms: i64, max_age_ms: i64) -> bool {
        now_ms - self.timestamp > max_age_ms
    }
}

/// Snoozed notification ids with their wake-up times.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnoozeRecord {
    /// Id → snoozed until.
    #[serde(default)]
    pub entries: BTreeMap<String, DateTime<Utc>>,
    /// Write time, epoch milliseconds.
    #[serde(default)]
    pub timestamp: i64,
}

impl SnoozeRecord {
    /// Whether the record was written more than `max_age_ms` before `now_ms`.
    pub fn is_expired(&self, now_ms: i64, max_age_ms: i64) -> bool {
        now_ms - self.timestamp > max_age_ms
    }
}
