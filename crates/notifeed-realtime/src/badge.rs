//! Unread badge and host title prefix.

use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use tracing::debug;

use crate::store::FeedSnapshot;

/// Badge text for `unread`: nothing at zero, `"{cap}+"` above `cap`.
pub fn badge_label(unread: usize, cap: usize) -> Option<String> {
    match unread {
        0 => None,
        n if n > cap => Some(format!("{cap}+")),
        n => Some(n.to_string()),
    }
}

/// Something with a settable title, such as a window or terminal.
pub trait TitleTarget: Send + Sync + std::fmt::Debug {
    fn set_title(&self, title: &str);
}

/// An in-process title other components can read.
#[derive(Debug, Clone, Default)]
pub struct SharedTitle {
    inner: Arc<RwLock<String>>,
}

impl SharedTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(title.into())),
        }
    }

    /// Current title.
    pub fn get(&self) -> String {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl TitleTarget for SharedTitle {
    fn set_title(&self, title: &str) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = title.to_string();
    }
}

/// Keeps a `(N) ` unread prefix on a host title.
///
/// The base title is restored when unread reaches zero and when the sync
/// is dropped.
#[derive(Debug)]
pub struct TitleSync {
    base: String,
    target: Arc<dyn TitleTarget>,
    last: Option<usize>,
}

impl TitleSync {
    pub fn new(base: impl Into<String>, target: Arc<dyn TitleTarget>) -> Self {
        Self {
            base: base.into(),
            target,
            last: None,
        }
    }

    /// Writes the title for `unread`, skipping redundant writes.
    pub fn update(&mut self, unread: usize) {
        if self.last == Some(unread) {
            return;
        }
        self.last = Some(unread);
        let title = if unread == 0 {
            self.base.clone()
        } else {
            format!("({unread}) {}", self.base)
        };
        debug!(%title, "Updating title");
        self.target.set_title(&title);
    }

    /// Restores the base title.
    pub fn reset(&mut self) {
        self.last = None;
        self.target.set_title(&self.base);
    }

    /// Follows snapshots until the feed store goes away.
    pub async fn run(mut self, mut snapshots: watch::Receiver<FeedSnapshot>) {
        loop {
            let unread = snapshots.borrow_and_update().unread_count;
            self.update(unread);
            if snapshots.changed().await.is_err() {
                break;
            }
        }
    }
}

impl Drop for TitleSync {
    fn drop(&mut self) {
        self.target.set_title(&self.base);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FeedStore;
    use notifeed_entity::{FeedFilter, GroupMode, Notification, NotificationType};

    #[test]
    fn test_badge_label_caps() {
        assert_eq!(badge_label(0, 9), None);
        assert_eq!(badge_label(3, 9).as_deref(), Some("3"));
        assert_eq!(badge_label(9, 9).as_deref(), Some("9"));
        assert_eq!(badge_label(10, 9).as_deref(), Some("9+"));
        assert_eq!(badge_label(250, 99).as_deref(), Some("99+"));
    }

    #[test]
    fn test_title_prefix_and_restore() {
        let title = SharedTitle::new("Dashboard");
        let mut sync = TitleSync::new("Dashboard", Arc::new(title.clone()));

        sync.update(3);
        assert_eq!(title.get(), "(3) Dashboard");
        sync.update(12);
        assert_eq!(title.get(), "(12) Dashboard");
        sync.update(0);
        assert_eq!(title.get(), "Dashboard");

        sync.update(1);
        drop(sync);
        assert_eq!(title.get(), "Dashboard");
    }

    #[tokio::test]
    async fn test_run_follows_store_and_restores_on_close() {
        let title = SharedTitle::new("Dashboard");
        let store = FeedStore::default();
        let sync = TitleSync::new("Dashboard", Arc::new(title.clone()));
        let task = tokio::spawn(sync.run(store.subscribe()));

        let unread = vec![Notification::new(
            "x",
            NotificationType::Info,
            "t",
            "m",
            chrono::Utc::now(),
            "events",
        )];
        store.publish(unread, FeedFilter::All, GroupMode::None, None);
        for _ in 0..50 {
            if title.get() == "(1) Dashboard" {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(title.get(), "(1) Dashboard");

        drop(store);
        task.await.unwrap();
        assert_eq!(title.get(), "Dashboard");
    }
}
