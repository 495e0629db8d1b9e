//! Feed polling and badge configuration.

use serde::{Deserialize, Serialize};

/// Feed refresh cadence and badge/title presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Interval between refreshes while the panel is open.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Interval between badge refreshes, independent of the panel.
    #[serde(default = "default_badge_poll_interval")]
    pub badge_poll_interval_seconds: u64,
    /// Whether the panel starts open.
    #[serde(default)]
    pub panel_open_on_start: bool,
    /// Host title that receives the `(N) ` unread prefix.
    #[serde(default = "default_title")]
    pub title: String,
    /// Largest count shown verbatim on the badge; larger counts render as `N+`.
    #[serde(default = "default_badge_cap")]
    pub badge_cap: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: default_poll_interval(),
            badge_poll_interval_seconds: default_badge_poll_interval(),
            panel_open_on_start: false,
            title: default_title(),
            badge_cap: default_badge_cap(),
        }
    }
}

fn default_poll_interval() -> u64 {
    30
}

fn default_badge_poll_interval() -> u64 {
    60
}

fn default_title() -> String {
    "Dashboard".to_string()
}

fn default_badge_cap() -> usize {
    9
}
