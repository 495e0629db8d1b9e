//! Which groups are expanded.

use std::collections::BTreeSet;

use notifeed_entity::GroupMode;

use super::group::NotificationGroup;

/// Expanded group keys, reset to "all expanded" whenever the grouped ids or
/// the grouping mode change.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    expanded: BTreeSet<String>,
    keys: Vec<String>,
    ids: Vec<String>,
    mode: Option<GroupMode>,
}

impl ExpansionState {
    /// Creates an empty state; the first [`sync`](Self::sync) expands everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts the current groups. Returns whether the state was reset.
    pub fn sync(&mut self, groups: &[NotificationGroup], mode: GroupMode) -> bool {
        let ids: Vec<String> = groups
            .iter()
            .flat_map(|g| g.notifications.iter().map(|n| n.id.clone()))
            .collect();
        let keys: Vec<String> = groups.iter().map(|g| g.key.clone()).collect();

        if self.mode == Some(mode) && self.ids == ids {
            self.keys = keys;
            return false;
        }

        self.expanded = keys.iter().cloned().collect();
        self.keys = keys;
        self.ids = ids;
        self.mode = Some(mode);
        true
    }

    /// Flips one group.
    pub fn toggle(&mut self, key: &str) {
        if !self.expanded.remove(key) {
            self.expanded.insert(key.to_string());
        }
    }

    /// Expands every known group.
    pub fn expand_all(&mut self) {
        self.expanded = self.keys.iter().cloned().collect();
    }

    /// Collapses every group.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Collapses everything if all groups are expanded, otherwise expands all.
    pub fn toggle_all(&mut self) {
        if self.all_expanded() {
            self.collapse_all();
        } else {
            self.expand_all();
        }
    }

    /// Whether `key` is expanded.
    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    /// Whether every known group is expanded.
    pub fn all_expanded(&self) -> bool {
        self.keys.iter().all(|k| self.expanded.contains(k))
    }

    /// Keys of the known groups, in display order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}
