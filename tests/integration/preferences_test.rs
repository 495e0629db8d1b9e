//! Integration tests for preference persistence and its effect on delivery.

use notifeed_entity::preference::{DesktopPrefsPatch, DndPrefsPatch, SoundPrefsPatch};
use notifeed_entity::{NotificationType, SoundType};
use notifeed_service::DeliveryOutcome;

use crate::helpers::{TestApp, notification};

#[tokio::test]
async fn test_preferences_round_trip_through_restart() {
    let app = TestApp::new();
    let services = app.engine.services();

    let sound = services.sound.update_prefs(&SoundPrefsPatch {
        enabled: Some(false),
        sound_type: Some(SoundType::Chime),
        volume: Some(0.8),
    });
    let desktop = services.desktop.update_prefs(&DesktopPrefsPatch {
        show_preview: Some(false),
        ..Default::default()
    });
    let dnd = services.dnd.update_prefs(&DndPrefsPatch {
        enabled: Some(true),
        schedule_enabled: Some(true),
        start_hour: Some(22),
        start_minute: Some(0),
        end_hour: Some(8),
        end_minute: Some(0),
        allow_urgent: Some(false),
    });

    let restarted = app.restart();
    let reloaded = restarted.engine.services();
    assert_eq!(reloaded.sound.prefs(), sound);
    assert_eq!(reloaded.desktop.prefs(), desktop);
    assert_eq!(reloaded.dnd.prefs(), dnd);
}

#[tokio::test]
async fn test_disabled_sound_still_shows_desktop_notice_without_preview() {
    let app = TestApp::new();
    let services = app.engine.services();
    services.sound.update_prefs(&SoundPrefsPatch {
        enabled: Some(false),
        ..Default::default()
    });
    services.desktop.update_prefs(&DesktopPrefsPatch {
        show_preview: Some(false),
        ..Default::default()
    });

    app.source.set(vec![notification("a", NotificationType::Event, 2, "events")]);
    app.engine.refresh().await;
    app.source.set(vec![
        notification("b", NotificationType::Event, 1, "events"),
        notification("a", NotificationType::Event, 2, "events"),
    ]);
    assert_eq!(
        app.engine.refresh().await,
        DeliveryOutcome::Delivered { id: "b".into() }
    );

    assert_eq!(app.audio.plays(), 0);
    let shown = app.notifier.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].title, "Title b");
    assert_eq!(shown[0].body, None);
    assert_eq!(shown[0].tag.as_deref(), Some("b"));
}

#[tokio::test]
async fn test_test_sound_ignores_enabled_switch() {
    let app = TestApp::new();
    let sound = &app.engine.services().sound;
    sound.update_prefs(&SoundPrefsPatch {
        enabled: Some(false),
        ..Default::default()
    });
    assert!(!sound.play_sound());
    assert!(sound.test_sound());
    assert_eq!(app.audio.plays(), 1);

    sound.update_prefs(&SoundPrefsPatch {
        sound_type: Some(SoundType::None),
        ..Default::default()
    });
    assert!(!sound.test_sound());
    assert_eq!(app.audio.plays(), 1);
}

#[tokio::test]
async fn test_overnight_quiet_hours_follow_the_clock() {
    use chrono::{TimeZone, Utc};

    let app = TestApp::new();
    let dnd = &app.engine.services().dnd;
    dnd.update_prefs(&DndPrefsPatch {
        enabled: Some(true),
        schedule_enabled: Some(true),
        start_hour: Some(22),
        start_minute: Some(0),
        end_hour: Some(8),
        end_minute: Some(0),
        ..Default::default()
    });

    for (hour, minute, quiet) in [(23, 0, true), (9, 0, false), (7, 59, true), (8, 0, false)] {
        app.clock
            .set(Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0).unwrap());
        assert_eq!(dnd.is_in_quiet_hours(), quiet, "{hour:02}:{minute:02}");
    }
}
