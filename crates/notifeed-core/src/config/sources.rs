//! Notification source endpoint configuration.

use serde::{Deserialize, Serialize};

/// Backend endpoints the aggregator fetches from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Base URL of the dashboard backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// `limit` query parameter for the alerts history endpoint.
    #[serde(default = "default_limit")]
    pub alerts_limit: u32,
    /// `days` query parameter for the alerts history endpoint.
    #[serde(default = "default_alerts_days")]
    pub alerts_days: u32,
    /// `limit` query parameter for the events endpoint.
    #[serde(default = "default_limit")]
    pub events_limit: u32,
    /// `limit` query parameter for the activity endpoint.
    #[serde(default = "default_limit")]
    pub activity_limit: u32,
    /// Per-request timeout. Unset means a slow source delays its share of
    /// the merge indefinitely.
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
    /// Sources to fetch, in merge order.
    #[serde(default = "default_enabled")]
    pub enabled: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            alerts_limit: default_limit(),
            alerts_days: default_alerts_days(),
            events_limit: default_limit(),
            activity_limit: default_limit(),
            request_timeout_seconds: None,
            enabled: default_enabled(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_limit() -> u32 {
    50
}

fn default_alerts_days() -> u32 {
    7
}

fn default_enabled() -> Vec<String> {
    ["alerts", "events", "agents", "activity"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
