//! Notification type enumeration and its display styles.

use serde::{Deserialize, Serialize};

/// The kind of a notification, used for filtering, grouping, and urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    /// A system alert (including source-level errors).
    Alert,
    /// A warning.
    Warning,
    /// A scheduled event.
    Event,
    /// Informational message.
    Info,
    /// Something finished successfully.
    Success,
    /// Agent run status.
    Agent,
    /// Activity log entry.
    Activity,
}

/// Label, icon, and color used when notifications are grouped by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeStyle {
    /// Group header label.
    pub label: &'static str,
    /// Header icon.
    pub icon: &'static str,
    /// Accent color.
    pub color: &'static str,
}

impl NotificationType {
    /// Every type, in display order.
    pub const ALL: [Self; 7] = [
        Self::Alert,
        Self::Warning,
        Self::Event,
        Self::Info,
        Self::Success,
        Self::Agent,
        Self::Activity,
    ];

    /// Return the type as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Warning => "warning",
            Self::Event => "event",
            Self::Info => "info",
            Self::Success => "success",
            Self::Agent => "agent",
            Self::Activity => "activity",
        }
    }

    /// Fixed per-type style table.
    pub fn style(&self) -> TypeStyle {
        match self {
            Self::Alert => TypeStyle {
                label: "Alerts",
                icon: "🚨",
                color: "red",
            },
            Self::Warning => TypeStyle {
                label: "Warnings",
                icon: "⚠️",
                color: "amber",
            },
            Self::Event => TypeStyle {
                label: "Events",
                icon: "📅",
                color: "blue",
            },
            Self::Info => TypeStyle {
                label: "Info",
                icon: "ℹ️",
                color: "slate",
            },
            Self::Success => TypeStyle {
                label: "Success",
                icon: "✅",
                color: "green",
            },
            Self::Agent => TypeStyle {
                label: "Agents",
                icon: "🤖",
                color: "purple",
            },
            Self::Activity => TypeStyle {
                label: "Activity",
                icon: "📝",
                color: "teal",
            },
        }
    }

    /// Whether this type belongs to the agent-related filter.
    pub fn is_agent_related(&self) -> bool {
        matches!(self, Self::Agent | Self::Activity)
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
