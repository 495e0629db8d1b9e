//! Integration tests for persisted retention across restarts.

use chrono::Duration;
use serde_json::json;

use notifeed_core::traits::KeyValueStore;
use notifeed_entity::NotificationType;
use notifeed_entity::preference::DndPrefsPatch;
use notifeed_entity::record::PersistenceRecord;
use notifeed_store::keys;

use crate::helpers::{TestApp, notification, t0};

fn record(ids: &[&str], days_ago: i64) -> serde_json::Value {
    json!({
        "ids": ids,
        "timestamp": (t0() - Duration::days(days_ago)).timestamp_millis(),
    })
}

#[tokio::test]
async fn test_stale_dismissed_record_is_discarded_on_load() {
    let app = TestApp::builder()
        .seed(keys::DISMISSED_IDS, record(&["alert-1"], 8))
        .seed(keys::READ_IDS, record(&["event-2"], 6))
        .build();

    let retention = &app.engine.services().retention;
    assert!(!retention.is_dismissed("alert-1"));
    assert!(retention.is_read("event-2"));
    assert_eq!(app.store.get(keys::DISMISSED_IDS).unwrap(), None);

    app.source.set(vec![
        notification("alert-1", NotificationType::Alert, 1, "alerts"),
        notification("event-2", NotificationType::Event, 2, "events"),
    ]);
    app.engine.refresh().await;
    let snapshot = app.engine.snapshot();
    assert_eq!(snapshot.notifications.len(), 2);
    assert_eq!(snapshot.unread_count, 1);
}

#[tokio::test]
async fn test_recent_dismissed_record_survives_restart() {
    let app = TestApp::builder()
        .seed(keys::DISMISSED_IDS, record(&["alert-1"], 6))
        .build();
    assert!(app.engine.services().retention.is_dismissed("alert-1"));

    app.engine.dismiss("event-9");
    let restarted = app.restart();
    let retention = &restarted.engine.services().retention;
    assert!(retention.is_dismissed("alert-1"));
    assert!(retention.is_dismissed("event-9"));

    let stored: PersistenceRecord = (restarted.store.as_ref() as &dyn KeyValueStore)
        .get_json(keys::DISMISSED_IDS)
        .unwrap()
        .unwrap();
    assert_eq!(stored.ids, vec!["alert-1".to_string(), "event-9".to_string()]);
    assert_eq!(stored.timestamp, t0().timestamp_millis());
}

#[tokio::test]
async fn test_malformed_records_fall_back_to_empty() {
    let app = TestApp::builder()
        .seed(keys::READ_IDS, json!("not a record"))
        .seed(keys::DISMISSED_IDS, json!({"ids": 42}))
        .build();

    app.source.set(vec![notification("a", NotificationType::Info, 1, "events")]);
    app.engine.refresh().await;
    assert_eq!(app.engine.snapshot().unread_count, 1);

    app.engine.mark_read("a");
    assert_eq!(app.engine.snapshot().unread_count, 0);
}

#[tokio::test]
async fn test_snooze_survives_restart_until_expiry() {
    let app = TestApp::new();
    app.source.set(vec![notification("a", NotificationType::Event, 1, "events")]);
    app.engine.refresh().await;
    app.engine.snooze("a", Duration::minutes(30)).unwrap();

    let restarted = app.restart();
    restarted
        .source
        .set(vec![notification("a", NotificationType::Event, 1, "events")]);
    restarted.engine.refresh().await;
    assert!(restarted.engine.snapshot().notifications.is_empty());

    restarted.clock.advance(Duration::minutes(31));
    restarted.engine.refresh().await;
    let feed = restarted.engine.snapshot().notifications;
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].snoozed_until, None);
}

#[tokio::test]
async fn test_reset_clears_persisted_state() {
    let app = TestApp::new();
    app.engine.dismiss("a");
    app.engine.mark_read("b");
    app.engine.snooze("c", Duration::hours(1)).unwrap();

    app.engine.reset();
    for key in keys::RETENTION_KEYS {
        assert_eq!(app.store.get(key).unwrap(), None, "{key} should be cleared");
    }
    let restarted = app.restart();
    assert!(restarted.engine.services().retention.dismissed_ids().is_empty());
}

#[tokio::test]
async fn test_refresh_picks_up_writes_from_another_handle() {
    let daemon = TestApp::new();
    daemon.source.set(vec![
        notification("a", NotificationType::Event, 1, "events"),
        notification("b", NotificationType::Event, 2, "events"),
    ]);
    daemon.engine.refresh().await;
    assert_eq!(daemon.engine.snapshot().notifications.len(), 2);

    // A second process on the same store, as the CLI runs next to the daemon.
    let cli = daemon.restart();
    cli.engine.services().retention.mark_dismissed("a");
    cli.engine.services().dnd.update_prefs(&DndPrefsPatch {
        enabled: Some(true),
        ..Default::default()
    });

    daemon.engine.refresh().await;
    let ids: Vec<String> = daemon
        .engine
        .snapshot()
        .notifications
        .into_iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(ids, vec!["b".to_string()]);
    assert!(daemon.engine.services().dnd.prefs().enabled);

    // The daemon's own writes keep the CLI's dismissal.
    daemon.engine.dismiss("b");
    let stored: PersistenceRecord = (daemon.store.as_ref() as &dyn KeyValueStore)
        .get_json(keys::DISMISSED_IDS)
        .unwrap()
        .unwrap();
    assert_eq!(stored.ids, vec!["a".to_string(), "b".to_string()]);
}
