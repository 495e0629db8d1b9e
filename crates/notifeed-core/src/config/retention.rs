//! Dismissed/read record retention configuration.

use serde::{Deserialize, Serialize};

/// Size caps and age limits for the persisted dismissed/read records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    /// Most recent dismissed ids kept.
    #[serde(default = "default_dismissed_cap")]
    pub dismissed_cap: usize,
    /// Most recent read ids kept.
    #[serde(default = "default_read_cap")]
    pub read_cap: usize,
    /// Records whose write timestamp is older than this are discarded.
    #[serde(default = "default_max_age_days")]
    pub max_age_days: i64,
    /// Minimum hours between two cleanup passes.
    #[serde(default = "default_cleanup_interval_hours")]
    pub cleanup_interval_hours: i64,
    /// Cron expression for the scheduled cleanup tick.
    #[serde(default = "default_cleanup_cron")]
    pub cleanup_cron: String,
    /// Cron expression for re-surfacing expired snoozes.
    #[serde(default = "default_snooze_sweep_cron")]
    pub snooze_sweep_cron: String,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            dismissed_cap: default_dismissed_cap(),
            read_cap: default_read_cap(),
            max_age_days: default_max_age_days(),
            cleanup_interval_hours: default_cleanup_interval_hours(),
            cleanup_cron: default_cleanup_cron(),
            snooze_sweep_cron: default_snooze_sweep_cron(),
        }
    }
}

fn default_dismissed_cap() -> usize {
    100
}

fn default_read_cap() -> usize {
    200
}

fn default_max_age_days() -> i64 {
    7
}

fn default_cleanup_interval_hours() -> i64 {
    24
}

fn default_cleanup_cron() -> String {
    "0 0 3 * * *".to_string()
}

fn default_snooze_sweep_cron() -> String {
    "0 * * * * *".to_string()
}
