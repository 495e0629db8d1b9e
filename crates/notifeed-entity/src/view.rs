//! Feed view settings: filter and grouping mode.

use serde::{Deserialize, Serialize};

use crate::notification::Notification;

/// Which notifications the panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedFilter {
    /// Everything.
    #[default]
    All,
    /// Only unread notifications.
    Unread,
    /// Only agent and activity notifications.
    Agents,
}

impl FeedFilter {
    /// Whether a notification passes this filter.
    pub fn matches(&self, notification: &Notification) -> bool {
        match self {
            Self::All => true,
            Self::Unread => !notification.read,
            Self::Agents => notification.kind.is_agent_related(),
        }
    }

    /// Parse from string.
    pub fn from_str_value(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(Self::All),
            "unread" => Some(Self::Unread),
            "agents" => Some(Self::Agents),
            _ => None,
        }
    }

    /// Return the filter as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Unread => "unread",
            Self::Agents => "agents",
        }
    }
}

/// How the panel groups notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupMode {
    /// A single flat list.
    #[default]
    None,
    /// One group per notification type.
    Type,
    /// One group per source.
    Source,
}

impl GroupMode {
    /// Parse from string.
    pub fn from_str_value(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(Self::None),
            "type" => Some(Self::Type),
            "source" => Some(Self::Source),
            _ => None,
        }
    }

    /// Return the mode as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Type => "type",
            Self::Source => "source",
        }
    }

    /// Whether the panel renders groups.
    pub fn is_grouped(&self) -> bool {
        !matches!(self, Self::None)
    }
}
