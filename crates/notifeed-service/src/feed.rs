//! Reconciles a fetched feed with the persisted dismissed/read/snoozed sets.

use std::sync::Arc;

use notifeed_entity::Notification;

use crate::retention::RetentionManager;

/// Applies retention state to a raw merged feed.
#[derive(Debug, Clone)]
pub struct FeedReconciler {
    retention: Arc<RetentionManager>,
}

impl FeedReconciler {
    /// Creates a reconciler over `retention`.
    pub fn new(retention: Arc<RetentionManager>) -> Self {
        Self { retention }
    }

    /// Drops dismissed and currently snoozed notifications and merges the
    /// local read state. Input order is preserved.
    pub fn reconcile(&self, raw: &[Notification]) -> Vec<Notification> {
        raw.iter()
            .filter(|n| !self.retention.is_dismissed(&n.id))
            .filter(|n| self.retention.snoozed_until(&n.id).is_none())
            .map(|n| {
                let mut n = n.clone();
                n.read = n.read || self.retention.is_read(&n.id);
                n.snoozed_until = None;
                n
            })
            .collect()
    }
}

/// Number of unread notifications.
pub fn unread_count(feed: &[Notification]) -> usize {
    feed.iter().filter(|n| !n.read).count()
}
