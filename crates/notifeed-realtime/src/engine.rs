//! Orchestration of fetch cycles and user actions.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use notifeed_core::error::AppError;
use notifeed_core::result::AppResult;
use notifeed_entity::{FeedFilter, GroupMode, Notification};
use notifeed_service::{CleanupReport, ServiceContext};
use notifeed_service::delivery::DeliveryOutcome;

use crate::store::{FeedEvent, FeedSnapshot, FeedStore};

/// Longest accepted snooze.
pub const MAX_SNOOZE_DAYS: i64 = 365;

/// Runs the fetch → reconcile → deliver → publish pipeline.
///
/// Local actions re-reconcile the last fetched raw feed without touching
/// the network. Every publish also feeds the delivery engine, so its
/// previous-unread count follows local changes too.
#[derive(Debug)]
pub struct NotificationEngine {
    services: ServiceContext,
    store: Arc<FeedStore>,
    /// Last merged feed as returned by the aggregator. Held across
    /// reconcile, delivery evaluation, and publish so snapshots never go
    /// backwards.
    raw: Mutex<Vec<Notification>>,
    /// Serializes overlapping refreshes from the panel and badge polls.
    refresh_lock: tokio::sync::Mutex<()>,
}

impl NotificationEngine {
    /// Creates the engine. Clicking a delivered desktop notice marks that
    /// notification read.
    pub fn new(services: ServiceContext) -> Arc<Self> {
        let engine = Arc::new_cyclic(|weak: &Weak<Self>| {
            let weak = weak.clone();
            services.delivery.set_click_handler(Arc::new(move |id: &str| {
                if let Some(engine) = weak.upgrade() {
                    engine.mark_read(id);
                }
            }));
            Self {
                services,
                store: Arc::new(FeedStore::default()),
                raw: Mutex::new(Vec::new()),
                refresh_lock: tokio::sync::Mutex::new(()),
            }
        });
        info!(sources = ?engine.services.aggregator.source_names(), "Notification engine ready");
        engine
    }

    /// The reactive store observers subscribe to.
    pub fn store(&self) -> &Arc<FeedStore> {
        &self.store
    }

    /// The services this engine drives.
    pub fn services(&self) -> &ServiceContext {
        &self.services
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> FeedSnapshot {
        self.store.snapshot()
    }

    /// Fetches every source, reconciles, evaluates delivery, and publishes.
    ///
    /// Persisted state is reloaded first so changes written by another
    /// process sharing the store take effect.
    pub async fn refresh(&self) -> DeliveryOutcome {
        let _guard = self.refresh_lock.lock().await;

        self.services.reload_persisted();
        let raw = self.services.aggregator.fetch_all().await;
        debug!(count = raw.len(), "Fetched raw feed");

        let (snapshot, outcome) = self.republish(Some(raw));
        self.store.emit(FeedEvent::Refreshed {
            total: snapshot.notifications.len(),
            unread: snapshot.unread_count,
        });
        outcome
    }

    /// Dismisses one notification. Returns whether it was in the feed.
    pub fn dismiss(&self, id: &str) -> bool {
        let present = self.in_feed(id);
        self.services.retention.mark_dismissed(id);
        self.republish_keeping_time();
        self.store.emit(FeedEvent::Dismissed {
            ids: vec![id.to_string()],
        });
        present
    }

    /// Dismisses every notification currently visible under the filter.
    pub fn dismiss_all(&self) -> usize {
        let ids: Vec<String> = self
            .store
            .snapshot()
            .visible
            .into_iter()
            .map(|n| n.id)
            .collect();
        if ids.is_empty() {
            return 0;
        }
        self.services.retention.mark_all_dismissed(&ids);
        self.republish_keeping_time();
        info!(count = ids.len(), "Dismissed all visible notifications");
        let count = ids.len();
        self.store.emit(FeedEvent::Dismissed { ids });
        count
    }

    /// Marks one notification read. Returns whether it was in the feed.
    pub fn mark_read(&self, id: &str) -> bool {
        let present = self.in_feed(id);
        self.services.retention.mark_read(id);
        self.republish_keeping_time();
        self.store.emit(FeedEvent::Read {
            ids: vec![id.to_string()],
        });
        present
    }

    /// Marks every unread notification in the feed read.
    pub fn mark_all_read(&self) -> usize {
        let ids: Vec<String> = self
            .store
            .snapshot()
            .notifications
            .into_iter()
            .filter(|n| !n.read)
            .map(|n| n.id)
            .collect();
        if ids.is_empty() {
            return 0;
        }
        self.services.retention.mark_all_read(&ids);
        self.republish_keeping_time();
        let count = ids.len();
        self.store.emit(FeedEvent::Read { ids });
        count
    }

    /// Hides a notification for `duration`, at most [`MAX_SNOOZE_DAYS`].
    /// Returns the resurface time.
    pub fn snooze(&self, id: &str, duration: Duration) -> AppResult<DateTime<Utc>> {
        if duration <= Duration::zero() || duration > Duration::days(MAX_SNOOZE_DAYS) {
            return Err(AppError::validation(format!(
                "Snooze duration must be between 1 second and {MAX_SNOOZE_DAYS} days"
            )));
        }
        let until = self
            .services
            .clock
            .now()
            .checked_add_signed(duration)
            .ok_or_else(|| AppError::validation("Snooze end is out of range"))?;

        self.services.retention.snooze(id, until);
        self.republish_keeping_time();
        self.store.emit(FeedEvent::Snoozed {
            id: id.to_string(),
            until,
        });
        Ok(until)
    }

    /// Forgets every dismissed, read, and snoozed id.
    pub fn reset(&self) {
        self.services.retention.clear_all();
        self.republish_keeping_time();
    }

    /// Changes and persists the filter.
    pub fn set_filter(&self, filter: FeedFilter) {
        self.services.view.set_filter(filter);
        self.republish_keeping_time();
    }

    /// Changes and persists the grouping mode.
    pub fn set_group_mode(&self, mode: GroupMode) {
        self.services.view.set_group_mode(mode);
        self.republish_keeping_time();
    }

    /// Expands or collapses one group. Returns whether it is now expanded,
    /// or `None` when no group has that key.
    pub fn toggle_group(&self, key: &str) -> Option<bool> {
        let _pipeline = self.lock_raw();
        self.store.toggle_group(key)
    }

    /// Collapses every group if all are expanded, otherwise expands all.
    pub fn toggle_all_groups(&self) -> bool {
        let _pipeline = self.lock_raw();
        self.store.toggle_all_groups()
    }

    /// Drops expired snoozes so their notifications resurface.
    pub fn resweep_snoozes(&self) -> Vec<String> {
        let resurfaced = self.services.retention.sweep_snoozes();
        if !resurfaced.is_empty() {
            debug!(count = resurfaced.len(), "Snoozed notifications resurfaced");
            self.republish_keeping_time();
        }
        resurfaced
    }

    /// Runs the retention cleanup pass and republishes if anything was
    /// pruned.
    pub fn run_retention_cleanup(&self) -> CleanupReport {
        let report = self.services.retention.run_cleanup();
        if !report.pruned.is_empty() {
            self.republish_keeping_time();
        }
        report
    }

    fn in_feed(&self, id: &str) -> bool {
        self.store
            .snapshot()
            .notifications
            .iter()
            .any(|n| n.id == id)
    }

    fn republish_keeping_time(&self) {
        self.republish(None);
    }

    /// Reconciles, evaluates delivery, and publishes under the pipeline
    /// lock. `fetched` replaces the raw feed and stamps the refresh time.
    fn republish(&self, fetched: Option<Vec<Notification>>) -> (FeedSnapshot, DeliveryOutcome) {
        let mut raw = self.lock_raw();
        let last_refreshed = match fetched {
            Some(feed) => {
                *raw = feed;
                Some(self.services.clock.now())
            }
            None => self.store.snapshot().last_refreshed,
        };
        let reconciled = self.services.reconciler.reconcile(&raw);
        let outcome = self.services.delivery.evaluate(&reconciled);

        let snapshot = self.store.publish(
            reconciled,
            self.services.view.filter(),
            self.services.view.group_mode(),
            last_refreshed,
        );
        drop(raw);

        if let DeliveryOutcome::Delivered { id } = &outcome {
            self.store.emit(FeedEvent::Delivered { id: id.clone() });
        }
        (snapshot, outcome)
    }

    fn lock_raw(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.raw.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{harness, item, start};
    use notifeed_entity::NotificationType;

    #[tokio::test]
    async fn test_first_load_is_silent_then_growth_delivers() {
        let h = harness();
        h.source.set(vec![
            item("a", NotificationType::Event, 10),
            item("b", NotificationType::Event, 20),
        ]);
        assert_eq!(h.engine.refresh().await, DeliveryOutcome::FirstLoad);
        assert_eq!(h.engine.snapshot().unread_count, 2);
        assert!(h.notifier.shown().is_empty());

        h.source.set(vec![
            item("c", NotificationType::Event, 1),
            item("a", NotificationType::Event, 10),
            item("b", NotificationType::Event, 20),
        ]);
        assert_eq!(
            h.engine.refresh().await,
            DeliveryOutcome::Delivered { id: "c".into() }
        );
        assert_eq!(h.audio.plays(), 1);
        let shown = h.notifier.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "title c");
        assert!(h.engine.snapshot().last_refreshed.is_some());
    }

    #[tokio::test]
    async fn test_local_actions_reconcile_without_fetching() {
        let h = harness();
        h.source.set(vec![
            item("a", NotificationType::Alert, 1),
            item("b", NotificationType::Agent, 2),
            item("c", NotificationType::Event, 3),
        ]);
        h.engine.refresh().await;

        // Source changes are not observed until the next refresh.
        h.source.set(Vec::new());

        assert!(h.engine.dismiss("a"));
        assert!(!h.engine.dismiss("a"));
        assert!(h.engine.mark_read("b"));
        let snapshot = h.engine.snapshot();
        assert_eq!(snapshot.notifications.len(), 2);
        assert_eq!(snapshot.unread_count, 1);
        assert!(h.engine.services().retention.is_dismissed("a"));

        assert_eq!(h.engine.mark_all_read(), 1);
        assert_eq!(h.engine.snapshot().unread_count, 0);
        assert_eq!(h.engine.mark_all_read(), 0);
    }

    #[tokio::test]
    async fn test_dismiss_all_only_touches_visible() {
        let h = harness();
        h.source.set(vec![
            item("a", NotificationType::Alert, 1),
            item("b", NotificationType::Agent, 2),
        ]);
        h.engine.refresh().await;
        h.engine.set_filter(FeedFilter::Agents);

        assert_eq!(h.engine.dismiss_all(), 1);
        h.engine.set_filter(FeedFilter::All);
        let ids: Vec<String> = h
            .engine
            .snapshot()
            .notifications
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn test_snooze_hides_until_expiry() {
        let h = harness();
        h.source.set(vec![item("a", NotificationType::Event, 1)]);
        h.engine.refresh().await;

        let until = h.engine.snooze("a", Duration::hours(1)).unwrap();
        assert_eq!(until, start() + Duration::hours(1));
        assert!(h.engine.snapshot().notifications.is_empty());

        h.clock.advance(Duration::minutes(61));
        assert_eq!(h.engine.resweep_snoozes(), vec!["a".to_string()]);
        assert_eq!(h.engine.snapshot().notifications.len(), 1);
    }

    #[tokio::test]
    async fn test_clicking_delivered_notice_marks_read() {
        let h = harness();
        h.source.set(vec![item("a", NotificationType::Event, 5)]);
        h.engine.refresh().await;
        h.source.set(vec![
            item("b", NotificationType::Event, 1),
            item("a", NotificationType::Event, 5),
        ]);
        h.engine.refresh().await;

        let notice = h.notifier.last_id().unwrap();
        assert!(h.engine.services().desktop.handle_click(notice));
        assert!(h.engine.services().retention.is_read("b"));
        assert_eq!(h.engine.snapshot().unread_count, 1);
        assert_eq!(h.notifier.focus_count(), 1);
    }

    #[tokio::test]
    async fn test_reset_restores_everything() {
        let h = harness();
        h.source.set(vec![
            item("a", NotificationType::Event, 1),
            item("b", NotificationType::Event, 2),
        ]);
        h.engine.refresh().await;
        h.engine.dismiss("a");
        h.engine.mark_read("b");
        assert_eq!(h.engine.snapshot().unread_count, 0);

        h.engine.reset();
        let snapshot = h.engine.snapshot();
        assert_eq!(snapshot.notifications.len(), 2);
        assert_eq!(snapshot.unread_count, 2);
    }

    #[tokio::test]
    async fn test_events_are_broadcast() {
        let h = harness();
        let mut events = h.engine.store().events();
        h.source.set(vec![item("a", NotificationType::Event, 1)]);
        h.engine.refresh().await;

        assert_eq!(
            events.recv().await.unwrap(),
            FeedEvent::UnreadChanged {
                previous: 0,
                current: 1
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            FeedEvent::Refreshed { total: 1, unread: 1 }
        );
    }

    #[tokio::test]
    async fn test_snooze_rejects_out_of_range_durations() {
        let h = harness();
        h.source.set(vec![item("a", NotificationType::Event, 1)]);
        h.engine.refresh().await;

        for duration in [
            Duration::minutes(999_999_999),
            Duration::days(MAX_SNOOZE_DAYS + 1),
            Duration::zero(),
            Duration::minutes(-5),
        ] {
            let err = h.engine.snooze("a", duration).unwrap_err();
            assert_eq!(err.kind, notifeed_core::error::ErrorKind::Validation);
        }
        assert!(h.engine.services().retention.snoozed_until("a").is_none());
        assert_eq!(h.engine.snapshot().notifications.len(), 1);

        let until = h.engine.snooze("a", Duration::days(MAX_SNOOZE_DAYS)).unwrap();
        assert_eq!(until, start() + Duration::days(MAX_SNOOZE_DAYS));
    }

    #[tokio::test]
    async fn test_previous_unread_survives_view_changes() {
        let h = harness();
        h.source.set(vec![
            item("a", NotificationType::Event, 10),
            item("b", NotificationType::Agent, 20),
        ]);
        assert_eq!(h.engine.refresh().await, DeliveryOutcome::FirstLoad);

        h.engine.set_filter(FeedFilter::Unread);
        h.engine.set_group_mode(GroupMode::Type);
        assert_eq!(h.engine.services().delivery.previous_unread(), 2);

        h.source.set(vec![
            item("c", NotificationType::Event, 1),
            item("a", NotificationType::Event, 10),
            item("b", NotificationType::Agent, 20),
        ]);
        assert_eq!(
            h.engine.refresh().await,
            DeliveryOutcome::Delivered { id: "c".into() }
        );
    }

    #[tokio::test]
    async fn test_group_expansion_resets_when_feed_changes() {
        let h = harness();
        h.source.set(vec![
            item("a", NotificationType::Alert, 1),
            item("b", NotificationType::Event, 2),
        ]);
        h.engine.set_group_mode(GroupMode::Type);
        h.engine.refresh().await;
        assert!(h.engine.snapshot().is_expanded("alert"));

        assert_eq!(h.engine.toggle_group("alert"), Some(false));
        // Same ids: the collapsed group stays collapsed.
        h.engine.refresh().await;
        assert!(!h.engine.snapshot().is_expanded("alert"));
        assert!(h.engine.snapshot().is_expanded("event"));

        h.source.set(vec![
            item("c", NotificationType::Alert, 0),
            item("a", NotificationType::Alert, 1),
            item("b", NotificationType::Event, 2),
        ]);
        h.engine.refresh().await;
        assert!(h.engine.snapshot().is_expanded("alert"));

        assert!(!h.engine.toggle_all_groups());
        assert!(h.engine.snapshot().expanded.is_empty());
        h.engine.set_group_mode(GroupMode::Source);
        let snapshot = h.engine.snapshot();
        assert_eq!(snapshot.expanded.len(), snapshot.groups.len());
    }

    #[test]
    fn test_concurrent_dismiss_and_refresh_keep_dismissal() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(4)
            .build()
            .unwrap();
        runtime.block_on(async {
            let h = harness();
            let ids: Vec<String> = (0..40).map(|i| format!("n{i}")).collect();
            h.source.set(
                ids.iter()
                    .enumerate()
                    .map(|(i, id)| item(id, NotificationType::Event, i as i64))
                    .collect(),
            );
            h.engine.refresh().await;

            let refresher = {
                let engine = Arc::clone(&h.engine);
                tokio::spawn(async move {
                    for _ in 0..20 {
                        engine.refresh().await;
                    }
                })
            };
            let dismisser = {
                let engine = Arc::clone(&h.engine);
                let ids = ids.clone();
                tokio::task::spawn_blocking(move || {
                    for id in &ids {
                        engine.dismiss(id);
                    }
                })
            };
            refresher.await.unwrap();
            dismisser.await.unwrap();

            let snapshot = h.engine.snapshot();
            assert!(snapshot.notifications.is_empty(), "{:?}", snapshot.notifications);
            assert_eq!(snapshot.unread_count, 0);
            assert_eq!(h.engine.services().delivery.previous_unread(), 0);
        });
    }
}
