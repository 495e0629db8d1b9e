//! Integration tests for the fetch → reconcile → deliver → publish cycle.

use std::sync::Arc;

use chrono::Duration;

use notifeed_entity::preference::DndPrefsPatch;
use notifeed_entity::{FeedFilter, GroupMode, NotificationType};
use notifeed_service::DeliveryOutcome;
use notifeed_service::export::{ExportFormat, export};

use crate::helpers::{FailingSource, ScriptedSource, TestApp, notification, t0};

#[tokio::test]
async fn test_dismissed_notification_is_filtered_and_order_is_descending() {
    let app = TestApp::new();
    app.engine.services().retention.mark_dismissed("event-3");
    app.source.set(vec![
        notification("event-3", NotificationType::Event, 3, "events"),
        notification("event-1", NotificationType::Event, 1, "events"),
        notification("event-4", NotificationType::Event, 4, "events"),
        notification("event-0", NotificationType::Event, 0, "events"),
        notification("event-2", NotificationType::Event, 2, "events"),
    ]);

    app.engine.refresh().await;
    let feed = app.engine.snapshot().notifications;

    let ids: Vec<&str> = feed.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["event-0", "event-1", "event-2", "event-4"]);
    assert!(feed.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
}

#[tokio::test]
async fn test_first_load_is_silent_and_growth_fires_once() {
    let app = TestApp::new();
    app.source.set(vec![
        notification("a", NotificationType::Event, 3, "events"),
        notification("b", NotificationType::Event, 4, "events"),
        notification("c", NotificationType::Event, 5, "events"),
    ]);

    assert_eq!(app.engine.refresh().await, DeliveryOutcome::FirstLoad);
    assert_eq!(app.audio.plays(), 0);
    assert!(app.notifier.shown().is_empty());

    app.source.set(vec![
        notification("d", NotificationType::Event, 1, "events"),
        notification("a", NotificationType::Event, 3, "events"),
        notification("b", NotificationType::Event, 4, "events"),
        notification("c", NotificationType::Event, 5, "events"),
    ]);
    assert_eq!(
        app.engine.refresh().await,
        DeliveryOutcome::Delivered { id: "d".into() }
    );
    assert_eq!(app.audio.plays(), 1);
    assert_eq!(app.notifier.shown().len(), 1);

    // Same feed again: no increase, no second alert.
    assert_eq!(app.engine.refresh().await, DeliveryOutcome::NoIncrease);
    assert_eq!(app.audio.plays(), 1);
    assert_eq!(app.notifier.shown().len(), 1);
}

#[tokio::test]
async fn test_quiet_hours_mute_but_urgent_alerts_pass() {
    let app = TestApp::new();
    // t0 is 12:00 local (manual clock), inside a 09:00-17:00 window.
    app.engine.services().dnd.update_prefs(&DndPrefsPatch {
        enabled: Some(true),
        schedule_enabled: Some(true),
        start_hour: Some(9),
        start_minute: Some(0),
        end_hour: Some(17),
        end_minute: Some(0),
        ..Default::default()
    });

    app.source.set(vec![notification("a", NotificationType::Event, 5, "events")]);
    app.engine.refresh().await;

    app.source.set(vec![
        notification("b", NotificationType::Event, 1, "events"),
        notification("a", NotificationType::Event, 5, "events"),
    ]);
    assert_eq!(
        app.engine.refresh().await,
        DeliveryOutcome::Muted { id: "b".into() }
    );
    assert_eq!(app.audio.plays(), 0);

    app.source.set(vec![
        notification("alert-1", NotificationType::Alert, 0, "alerts"),
        notification("b", NotificationType::Event, 1, "events"),
        notification("a", NotificationType::Event, 5, "events"),
    ]);
    assert_eq!(
        app.engine.refresh().await,
        DeliveryOutcome::Delivered {
            id: "alert-1".into()
        }
    );
    assert_eq!(app.audio.plays(), 1);

    // Outside the window everything is delivered again.
    app.clock.set(t0() + Duration::hours(8));
    app.source.set(vec![
        notification("c", NotificationType::Event, -1, "events"),
        notification("alert-1", NotificationType::Alert, 0, "alerts"),
        notification("b", NotificationType::Event, 1, "events"),
        notification("a", NotificationType::Event, 5, "events"),
    ]);
    assert_eq!(
        app.engine.refresh().await,
        DeliveryOutcome::Delivered { id: "c".into() }
    );
}

#[tokio::test]
async fn test_failing_source_contributes_nothing() {
    let app = TestApp::builder()
        .with_source(Arc::new(FailingSource))
        .build();
    app.source.set(vec![notification("a", NotificationType::Info, 1, "events")]);

    app.engine.refresh().await;
    assert_eq!(app.engine.snapshot().notifications.len(), 1);
}

#[tokio::test]
async fn test_equal_timestamps_keep_source_order() {
    let agents = ScriptedSource::new("agents");
    let app = TestApp::builder().with_source(agents.clone()).build();
    app.source.set(vec![notification("alert-1", NotificationType::Alert, 2, "alerts")]);
    agents.set(vec![notification("agent-1-running", NotificationType::Agent, 2, "agents")]);

    app.engine.refresh().await;
    let ids: Vec<String> = app
        .engine
        .snapshot()
        .notifications
        .into_iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(ids, vec!["alert-1".to_string(), "agent-1-running".to_string()]);
}

#[tokio::test]
async fn test_unread_count_and_dismissed_invariants() {
    let app = TestApp::new();
    let kinds = [
        NotificationType::Alert,
        NotificationType::Warning,
        NotificationType::Event,
        NotificationType::Info,
        NotificationType::Success,
        NotificationType::Agent,
        NotificationType::Activity,
    ];
    let feed: Vec<_> = (0..21)
        .map(|i| notification(&format!("n-{i}"), kinds[i % kinds.len()], i as i64, "events"))
        .collect();
    app.source.set(feed);
    app.engine.refresh().await;

    for i in (0..21).step_by(3) {
        app.engine.mark_read(&format!("n-{i}"));
    }
    for i in (0..21).step_by(4) {
        app.engine.dismiss(&format!("n-{i}"));
    }
    app.engine.refresh().await;

    let snapshot = app.engine.snapshot();
    let retention = &app.engine.services().retention;
    assert!(snapshot.notifications.iter().all(|n| !retention.is_dismissed(&n.id)));
    assert_eq!(
        snapshot.unread_count,
        snapshot.notifications.iter().filter(|n| !n.read).count()
    );
    let grouped_unread: usize = app
        .engine
        .snapshot()
        .groups
        .iter()
        .map(|g| g.unread_count)
        .sum();
    assert_eq!(grouped_unread, snapshot.unread_count);
}

#[tokio::test]
async fn test_dismiss_is_idempotent() {
    let app = TestApp::new();
    let retention = &app.engine.services().retention;
    retention.mark_dismissed("alert-7");
    let once = retention.dismissed_ids();
    retention.mark_dismissed("alert-7");
    assert_eq!(retention.dismissed_ids(), once);
    assert_eq!(once, vec!["alert-7".to_string()]);
}

#[tokio::test]
async fn test_view_preferences_drive_snapshot_and_export() {
    let app = TestApp::new();
    app.source.set(vec![
        notification("alert-1", NotificationType::Alert, 1, "alerts"),
        notification("agent-1-done", NotificationType::Agent, 2, "agents"),
        notification("activity-1", NotificationType::Activity, 3, "activity"),
    ]);
    app.engine.refresh().await;

    app.engine.set_filter(FeedFilter::Agents);
    app.engine.set_group_mode(GroupMode::Source);
    let snapshot = app.engine.snapshot();
    assert_eq!(snapshot.visible.len(), 2);
    assert_eq!(snapshot.groups.len(), 2);

    let csv = export(&snapshot.visible, ExportFormat::Csv).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.starts_with("id,type,title,message,timestamp,read,source"));
    assert!(!csv.contains("alert-1"));

    // Persisted for the next session.
    let restarted = app.restart();
    assert_eq!(restarted.engine.services().view.filter(), FeedFilter::Agents);
    assert_eq!(
        restarted.engine.services().view.group_mode(),
        GroupMode::Source
    );
}
