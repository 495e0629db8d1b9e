//! `GET /api/events` records.

use serde::{Deserialize, Serialize};

use super::RawId;

/// Response envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventsResponse {
    /// Scheduled events.
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

/// A scheduled event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Backend id.
    pub id: RawId,
    /// When the event happens (ISO-8601).
    pub timestamp: String,
    /// Free-form event type (`info`, `warning`, `error`, `deploy`, ...).
    #[serde(rename = "type", default)]
    pub event_type: String,
    /// Title line.
    pub title: String,
    /// Optional body.
    #[serde(default)]
    pub description: Option<String>,
}
