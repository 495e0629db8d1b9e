//! `GET /api/health/alerts-history` records.

use serde::{Deserialize, Serialize};

use super::RawId;

/// Response envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertsResponse {
    /// Alert history entries.
    #[serde(default)]
    pub alerts: Vec<AlertRecord>,
}

/// A health alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    /// Backend id.
    pub id: RawId,
    /// When the alert fired (ISO-8601).
    pub timestamp: String,
    /// `critical`, `error`, `warning`, ...
    pub status: String,
    /// Human-readable description.
    #[serde(default)]
    pub message: String,
    /// Services affected by the alert.
    #[serde(default)]
    pub affected_services: Option<Vec<String>>,
    /// When the alert resolved, if it has.
    #[serde(default)]
    pub resolved_at: Option<String>,
}
