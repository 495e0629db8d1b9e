//! Feed filtering.

use notifeed_entity::{FeedFilter, Notification};

/// Notifications matching `filter`, in feed order.
pub fn apply_filter(feed: &[Notification], filter: FeedFilter) -> Vec<Notification> {
    feed.iter().filter(|n| filter.matches(n)).cloned().collect()
}
