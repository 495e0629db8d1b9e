//! Reactive feed state.
//!
//! Every publish recomputes the derived views (filtered list, groups,
//! expansion, unread count) and replaces the snapshot on a watch channel.
//! Discrete events go out on a broadcast channel.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tracing::debug;

use notifeed_entity::{FeedFilter, GroupMode, Notification};
use notifeed_service::feed::unread_count;
use notifeed_service::grouping::{ExpansionState, NotificationGroup, apply_filter, group};

/// Derived view of the feed at one point in time.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSnapshot {
    /// Reconciled feed, newest first.
    pub notifications: Vec<Notification>,
    /// Feed after the active filter.
    pub visible: Vec<Notification>,
    /// `visible` grouped by the active mode.
    pub groups: Vec<NotificationGroup>,
    /// Keys of the expanded groups, in display order.
    pub expanded: Vec<String>,
    /// Unread count over the whole reconciled feed.
    pub unread_count: usize,
    /// Active filter.
    pub filter: FeedFilter,
    /// Active grouping.
    pub group_mode: GroupMode,
    /// When sources were last fetched.
    pub last_refreshed: Option<DateTime<Utc>>,
}

impl FeedSnapshot {
    /// Whether the group with `key` is expanded.
    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.iter().any(|k| k == key)
    }
}

/// Discrete feed events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FeedEvent {
    /// Sources were fetched.
    Refreshed { total: usize, unread: usize },
    /// The unread count changed.
    UnreadChanged { previous: usize, current: usize },
    /// A sound/desktop alert fired.
    Delivered { id: String },
    /// Notifications were dismissed.
    Dismissed { ids: Vec<String> },
    /// Notifications were marked read.
    Read { ids: Vec<String> },
    /// A notification was snoozed.
    Snoozed { id: String, until: DateTime<Utc> },
}

/// Holds the current [`FeedSnapshot`] and fans out changes.
#[derive(Debug)]
pub struct FeedStore {
    snapshot_tx: watch::Sender<FeedSnapshot>,
    events_tx: broadcast::Sender<FeedEvent>,
    /// Expanded groups; reset whenever the grouped ids or the mode change.
    expansion: Mutex<ExpansionState>,
}

impl FeedStore {
    /// Creates an empty store; `event_buffer` bounds lagging event subscribers.
    pub fn new(event_buffer: usize) -> Self {
        let (snapshot_tx, _) = watch::channel(FeedSnapshot::default());
        let (events_tx, _) = broadcast::channel(event_buffer.max(1));
        Self {
            snapshot_tx,
            events_tx,
            expansion: Mutex::new(ExpansionState::new()),
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> FeedSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Observes snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Observes discrete events.
    pub fn events(&self) -> broadcast::Receiver<FeedEvent> {
        self.events_tx.subscribe()
    }

    /// Recomputes derived views and publishes a new snapshot.
    pub fn publish(
        &self,
        notifications: Vec<Notification>,
        filter: FeedFilter,
        group_mode: GroupMode,
        last_refreshed: Option<DateTime<Utc>>,
    ) -> FeedSnapshot {
        let visible = apply_filter(&notifications, filter);
        let groups = group(&visible, group_mode);
        let unread = unread_count(&notifications);

        let mut expansion = self.lock_expansion();
        if expansion.sync(&groups, group_mode) {
            debug!(mode = group_mode.as_str(), "Group expansion reset");
        }
        let snapshot = FeedSnapshot {
            expanded: expanded_keys(&expansion),
            notifications,
            visible,
            groups,
            unread_count: unread,
            filter,
            group_mode,
            last_refreshed,
        };
        let previous = self.snapshot_tx.send_replace(snapshot.clone());
        drop(expansion);

        if previous.unread_count != unread {
            self.emit(FeedEvent::UnreadChanged {
                previous: previous.unread_count,
                current: unread,
            });
        }
        snapshot
    }

    /// Flips one group. Returns whether it is now expanded, or `None` for
    /// an unknown key.
    pub fn toggle_group(&self, key: &str) -> Option<bool> {
        let mut expansion = self.lock_expansion();
        if !expansion.keys().iter().any(|k| k == key) {
            return None;
        }
        expansion.toggle(key);
        let now_expanded = expansion.is_expanded(key);
        self.publish_expansion(&expansion);
        Some(now_expanded)
    }

    /// Collapses every group if all are expanded, otherwise expands all.
    /// Returns whether every group is now expanded.
    pub fn toggle_all_groups(&self) -> bool {
        let mut expansion = self.lock_expansion();
        expansion.toggle_all();
        let all = expansion.all_expanded();
        self.publish_expansion(&expansion);
        all
    }

    fn publish_expansion(&self, expansion: &ExpansionState) {
        let expanded = expanded_keys(expansion);
        self.snapshot_tx
            .send_modify(|snapshot| snapshot.expanded = expanded);
    }

    fn lock_expansion(&self) -> std::sync::MutexGuard<'_, ExpansionState> {
        self.expansion.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sends an event to current subscribers.
    pub fn emit(&self, event: FeedEvent) {
        debug!(?event, "Feed event");
        // No subscribers is fine.
        let _ = self.events_tx.send(event);
    }
}

fn expanded_keys(expansion: &ExpansionState) -> Vec<String> {
    expansion
        .keys()
        .iter()
        .filter(|key| expansion.is_expanded(key))
        .cloned()
        .collect()
}

impl Default for FeedStore {
    fn default() -> Self {
        Self::new(64)
    }
}
