//! Shared test fixtures.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use notifeed_core::config::AppConfig;
use notifeed_core::result::AppResult;
use notifeed_core::traits::{ManualClock, NotificationPermission};
use notifeed_entity::preference::DesktopPrefsPatch;
use notifeed_entity::{Notification, NotificationType};
use notifeed_service::platform::Platform;
use notifeed_service::platform::mock::{RecordingAudio, RecordingHaptics, RecordingNotifier};
use notifeed_service::{Aggregator, NotificationSource, ServiceContext};
use notifeed_store::memory::MemoryStore;

use crate::engine::NotificationEngine;

/// A source whose feed the test replaces at will.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    items: Mutex<Vec<Notification>>,
    fetches: AtomicUsize,
}

impl ScriptedSource {
    pub fn set(&self, items: Vec<Notification>) {
        *self.items.lock().unwrap() = items;
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch(&self) -> AppResult<Vec<Notification>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.items.lock().unwrap().clone())
    }
}

pub struct Harness {
    pub engine: Arc<NotificationEngine>,
    pub source: Arc<ScriptedSource>,
    pub clock: Arc<ManualClock>,
    pub audio: Arc<RecordingAudio>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap()
}

/// An engine over one scripted source with desktop notices enabled and
/// granted.
pub fn harness() -> Harness {
    let source = Arc::new(ScriptedSource::default());
    let clock = Arc::new(ManualClock::new(start()));
    let audio = Arc::new(RecordingAudio::new());
    let notifier = Arc::new(RecordingNotifier::new(NotificationPermission::Granted));
    let platform = Platform {
        audio: audio.clone(),
        desktop: notifier.clone(),
        haptics: Arc::new(RecordingHaptics::new()),
    };
    let services = ServiceContext::new(
        &AppConfig::default(),
        Arc::new(MemoryStore::new()),
        clock.clone(),
        platform,
        Aggregator::new(vec![source.clone()]),
    );
    services.desktop.update_prefs(&DesktopPrefsPatch {
        enabled: Some(true),
        ..Default::default()
    });
    Harness {
        engine: NotificationEngine::new(services),
        source,
        clock,
        audio,
        notifier,
    }
}

pub fn item(id: &str, kind: NotificationType, minutes_ago: i64) -> Notification {
    Notification::new(
        id,
        kind,
        format!("title {id}"),
        format!("message {id}"),
        start() - Duration::minutes(minutes_ago),
        "scripted",
    )
}
