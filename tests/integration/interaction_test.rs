//! Integration tests wiring input state machines to the engine.

use std::sync::Arc;

use notifeed_core::config::InteractionConfig;
use notifeed_entity::{GroupMode, NotificationType};
use notifeed_interaction::{
    HapticFeedback, HapticPattern, Key, KeyAction, KeyContext, KeyEvent, KeyboardController,
    PullToRefresh, SwipeTracker,
};

use crate::helpers::{TestApp, notification};

/// Drives one swipe on `id` and applies its effects.
fn swipe(app: &TestApp, feedback: &HapticFeedback, id: &str, delta_x: f64) {
    let mut tracker = SwipeTracker::from_config(&InteractionConfig::default());
    tracker.start(400.0);
    for step in 1..=10 {
        feedback.trigger_opt(tracker.move_to(400.0 + delta_x * f64::from(step) / 10.0));
    }
    let release = tracker.release();
    feedback.trigger_opt(release.haptic);
    if release.dismissed {
        app.engine.dismiss(id);
    }
}

#[tokio::test]
async fn test_swipe_below_threshold_does_nothing() {
    let app = TestApp::new();
    let feedback = HapticFeedback::new(app.haptics.clone());
    app.source.set(vec![notification("a", NotificationType::Event, 1, "events")]);
    app.engine.refresh().await;

    swipe(&app, &feedback, "a", -60.0);
    assert_eq!(app.engine.snapshot().notifications.len(), 1);
    assert!(app.haptics.patterns().is_empty());
}

#[tokio::test]
async fn test_swipe_past_threshold_dismisses_once_with_success_pulse() {
    let app = TestApp::new();
    let feedback = HapticFeedback::new(app.haptics.clone());
    app.source.set(vec![notification("a", NotificationType::Event, 1, "events")]);
    app.engine.refresh().await;

    swipe(&app, &feedback, "a", -105.0);
    assert!(app.engine.snapshot().notifications.is_empty());
    assert_eq!(app.engine.services().retention.dismissed_ids(), vec!["a".to_string()]);

    let patterns = app.haptics.patterns();
    let success = HapticPattern::Success.durations().to_vec();
    assert_eq!(patterns.iter().filter(|p| **p == success).count(), 1);
    assert_eq!(
        patterns,
        vec![HapticPattern::Medium.durations().to_vec(), success]
    );
}

#[tokio::test]
async fn test_pull_to_refresh_fetches() {
    let app = TestApp::new();
    let feedback = HapticFeedback::new(app.haptics.clone());
    let mut pull = PullToRefresh::default();

    assert!(pull.start(0.0, 0.0));
    feedback.trigger_opt(pull.move_to(200.0));
    let release = pull.release();
    feedback.trigger_opt(release.haptic);
    assert!(release.refresh);

    app.engine.refresh().await;
    pull.complete();
    assert_eq!(app.source.fetches(), 1);
    assert_eq!(
        app.haptics.patterns(),
        vec![
            HapticPattern::Light.durations().to_vec(),
            HapticPattern::Success.durations().to_vec()
        ]
    );
}

#[tokio::test]
async fn test_keyboard_actions_map_onto_visible_feed() {
    let app = TestApp::new();
    app.source.set(vec![
        notification("a", NotificationType::Event, 1, "events"),
        notification("b", NotificationType::Event, 2, "events"),
        notification("c", NotificationType::Alert, 3, "alerts"),
    ]);
    app.engine.refresh().await;

    let mut keyboard = KeyboardController::new();
    let mut apply = |name: &str| {
        let snapshot = app.engine.snapshot();
        let ctx = KeyContext {
            panel_open: true,
            group_mode: snapshot.group_mode,
            len: if snapshot.group_mode.is_grouped() {
                snapshot.groups.len()
            } else {
                snapshot.visible.len()
            },
        };
        let action = keyboard.handle(&KeyEvent::new(Key::parse(name)), &ctx);
        match action {
            KeyAction::MarkRead(i) => {
                app.engine.mark_read(&snapshot.visible[i].id);
            }
            KeyAction::Dismiss(i) => {
                app.engine.dismiss(&snapshot.visible[i].id);
            }
            _ => {}
        }
        action
    };

    assert_eq!(apply("j"), KeyAction::Focus(0));
    assert_eq!(apply("Enter"), KeyAction::MarkRead(0));
    assert_eq!(apply("j"), KeyAction::Focus(1));
    assert_eq!(apply("x"), KeyAction::Dismiss(1));

    let snapshot = app.engine.snapshot();
    let ids: Vec<&str> = snapshot.notifications.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_eq!(snapshot.unread_count, 1);

    app.engine.set_group_mode(GroupMode::Type);
    assert_eq!(apply("j"), KeyAction::Focus(0));
    assert_eq!(apply(" "), KeyAction::ToggleAllGroups);
}

#[test]
fn test_feedback_is_silent_without_motor() {
    let feedback = HapticFeedback::new(Arc::new(notifeed_service::platform::null::NullHaptics));
    assert!(!feedback.trigger(HapticPattern::Heavy));
}
