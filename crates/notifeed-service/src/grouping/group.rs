//! Partitioning the feed into display groups.

use std::collections::HashMap;

use serde::Serialize;

use notifeed_entity::{GroupMode, Notification};

/// A labelled run of notifications.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationGroup {
    /// Stable key: the type name, the source name, or `all`.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Display icon.
    pub icon: String,
    /// Display color name.
    pub color: String,
    /// Members in feed order.
    pub notifications: Vec<Notification>,
    /// Unread members.
    pub unread_count: usize,
}

impl NotificationGroup {
    fn new(key: String, label: String, icon: &str, color: &str) -> Self {
        Self {
            key,
            label,
            icon: icon.to_string(),
            color: color.to_string(),
            notifications: Vec::new(),
            unread_count: 0,
        }
    }

    fn push(&mut self, notification: Notification) {
        if !notification.read {
            self.unread_count += 1;
        }
        self.notifications.push(notification);
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

/// Key of the single group produced in [`GroupMode::None`].
pub const ALL_GROUP_KEY: &str = "all";

/// Groups `feed` by `mode`.
///
/// `None` yields one implicit group (or nothing for an empty feed). Other
/// modes order groups by unread count, then size, both descending; equal
/// groups keep first-appearance order.
pub fn group(feed: &[Notification], mode: GroupMode) -> Vec<NotificationGroup> {
    if feed.is_empty() {
        return Vec::new();
    }

    if mode == GroupMode::None {
        let mut all = NotificationGroup::new(
            ALL_GROUP_KEY.to_string(),
            "All notifications".to_string(),
            "🔔",
            "slate",
        );
        for n in feed {
            all.push(n.clone());
        }
        return vec![all];
    }

    let mut groups: Vec<NotificationGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for n in feed {
        let key = match mode {
            GroupMode::Type => n.kind.as_str().to_string(),
            _ => n.source.clone(),
        };
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            let group = match mode {
                GroupMode::Type => {
                    let style = n.kind.style();
                    NotificationGroup::new(key, style.label.to_string(), style.icon, style.color)
                }
                _ => NotificationGroup::new(key, n.source.clone(), "📡", "slate"),
            };
            groups.push(group);
            groups.len() - 1
        });
        groups[slot].push(n.clone());
    }

    groups.sort_by(|a, b| {
        b.unread_count
            .cmp(&a.unread_count)
            .then_with(|| b.len().cmp(&a.len()))
    });
    groups
}
