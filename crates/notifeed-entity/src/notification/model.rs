//! Unified notification model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::action::NotificationAction;
use super::kind::NotificationType;
use super::priority::NotificationPriority;

/// A normalized notification from any source.
///
/// Notifications are recomputed on every fetch cycle; identity is the
/// source-prefixed `id`, not the object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Source-prefixed, globally unique id (`alert-42`, `event-7`, ...).
    pub id: String,
    /// Notification kind.
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// Title line.
    pub title: String,
    /// Body text.
    pub message: String,
    /// When the underlying event happened.
    pub timestamp: DateTime<Utc>,
    /// Whether the notification counts as read.
    pub read: bool,
    /// Source name (`alerts`, `events`, `agents`, `activity`).
    pub source: String,
    /// Optional priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<NotificationPriority>,
    /// Ordered action buttons.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<NotificationAction>,
    /// Hidden until this instant, when snoozed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snoozed_until: Option<DateTime<Utc>>,
    /// Source-specific extra data.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Notification {
    /// Create an unread notification with no priority, actions, or metadata.
    pub fn new(
        id: impl Into<String>,
        kind: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            message: message.into(),
            timestamp,
            read: false,
            source: source.into(),
            priority: None,
            actions: Vec::new(),
            snoozed_until: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Check if the notification has not been read.
    pub fn is_unread(&self) -> bool {
        !self.read
    }

    /// Urgent notifications bypass quiet hours when DND allows it.
    pub fn is_urgent(&self) -> bool {
        self.kind == NotificationType::Alert
    }

    /// Check if the notification is snoozed at `now`.
    pub fn is_snoozed_at(&self, now: DateTime<Utc>) -> bool {
        self.snoozed_until.map(|until| until > now).unwrap_or(false)
    }
}
