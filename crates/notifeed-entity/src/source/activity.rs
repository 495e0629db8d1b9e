//! `GET /api/activity` records.

use serde::{Deserialize, Serialize};

use super::RawId;

/// Response envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityResponse {
    /// Activity log entries.
    #[serde(default)]
    pub activities: Vec<ActivityRecord>,
}

/// An activity log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Backend id.
    pub id: RawId,
    /// Activity kind (`commit`, `deploy`, ...).
    #[serde(rename = "type", default)]
    pub activity_type: String,
    /// Title line.
    pub title: String,
    /// Optional body.
    #[serde(default)]
    pub description: Option<String>,
    /// Who did it.
    #[serde(default)]
    pub actor: Option<String>,
    /// When it happened (ISO-8601).
    pub created_at: String,
}
