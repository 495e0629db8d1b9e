//! Notification priority.

use serde::{Deserialize, Serialize};

/// How prominently a source wants a notification shown.
///
/// Only the alert, agent, and activity normalizers assign one; backend
/// events carry none. Variants order from least to most pressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    /// Activity-log entries.
    Low,
    Normal,
    /// Warnings and failed agent runs.
    High,
    /// Critical alerts.
    Urgent,
}
