//! Integration tests for the scheduled maintenance tasks.

use std::sync::Arc;

use chrono::Duration;

use notifeed_core::config::RetentionConfig;
use notifeed_entity::NotificationType;
use notifeed_store::keys;
use notifeed_worker::jobs::{RetentionCleanupTask, SnoozeSweepTask};
use notifeed_worker::{CronScheduler, ScheduledTask};

use crate::helpers::{TestApp, notification};

#[tokio::test]
async fn test_retention_task_ages_out_dismissals() {
    let app = TestApp::new();
    app.source.set(vec![
        notification("a", NotificationType::Event, 1, "events"),
        notification("b", NotificationType::Event, 2, "events"),
    ]);
    app.engine.refresh().await;
    app.engine.dismiss("a");

    let task = RetentionCleanupTask::new(Arc::clone(&app.engine));

    // The gate stays shut within the interval.
    let summary = task.run().await.unwrap();
    assert_eq!(summary["ran"], false);
    assert!(app.engine.services().retention.is_dismissed("a"));

    app.clock.advance(Duration::days(8));
    let summary = task.run().await.unwrap();
    assert_eq!(summary["task"], "retention_cleanup");
    assert_eq!(summary["ran"], true);
    assert_eq!(summary["pruned"], serde_json::json!([keys::DISMISSED_IDS]));

    let snapshot = app.engine.snapshot();
    let ids: Vec<&str> = snapshot.notifications.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn test_snooze_task_resurfaces_without_fetching() {
    let app = TestApp::new();
    app.source.set(vec![notification("a", NotificationType::Agent, 1, "agents")]);
    app.engine.refresh().await;
    app.engine.snooze("a", Duration::minutes(30)).unwrap();
    assert!(app.engine.snapshot().notifications.is_empty());

    let task = SnoozeSweepTask::new(Arc::clone(&app.engine));
    app.clock.advance(Duration::minutes(10));
    let summary = task.run().await.unwrap();
    assert_eq!(summary["resurfaced"], serde_json::json!([]));

    app.clock.advance(Duration::minutes(21));
    let summary = task.run().await.unwrap();
    assert_eq!(summary["task"], "snooze_sweep");
    assert_eq!(summary["resurfaced"], serde_json::json!(["a"]));
    assert_eq!(app.engine.snapshot().notifications.len(), 1);
    assert_eq!(app.source.fetches(), 1);
}

#[tokio::test]
async fn test_default_tasks_register_and_run() {
    let app = TestApp::new();
    let mut scheduler = CronScheduler::new().await.unwrap();
    scheduler
        .register_default_tasks(&RetentionConfig::default(), Arc::clone(&app.engine))
        .await
        .unwrap();
    assert_eq!(
        scheduler.task_names(),
        vec!["retention_cleanup".to_string(), "snooze_sweep".to_string()]
    );

    let results = scheduler.run_all().await;
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|(_, result)| result.is_ok()));
    scheduler.shutdown().await.unwrap();
}
