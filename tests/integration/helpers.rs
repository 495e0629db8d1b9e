//! Shared test helpers for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use notifeed_core::config::AppConfig;
use notifeed_core::error::AppError;
use notifeed_core::result::AppResult;
use notifeed_core::traits::{KeyValueStore, ManualClock, NotificationPermission};
use notifeed_entity::preference::DesktopPrefsPatch;
use notifeed_entity::{Notification, NotificationType};
use notifeed_realtime::NotificationEngine;
use notifeed_service::platform::Platform;
use notifeed_service::platform::mock::{RecordingAudio, RecordingHaptics, RecordingNotifier};
use notifeed_service::{Aggregator, NotificationSource, ServiceContext};
use notifeed_store::memory::MemoryStore;

/// Fixed reference instant (a Monday at noon UTC).
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap()
}

/// A notification `minutes` before [`t0`].
pub fn notification(id: &str, kind: NotificationType, minutes: i64, source: &str) -> Notification {
    Notification::new(
        id,
        kind,
        format!("Title {id}"),
        format!("Message {id}"),
        t0() - Duration::minutes(minutes),
        source,
    )
}

/// A source whose feed the test replaces at will.
#[derive(Debug)]
pub struct ScriptedSource {
    name: String,
    items: Mutex<Vec<Notification>>,
    fetches: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            items: Mutex::new(Vec::new()),
            fetches: AtomicUsize::new(0),
        })
    }

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
        &self.name
    }

    async fn fetch(&self) -> AppResult<Vec<Notification>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.items.lock().unwrap().clone())
    }
}

/// A source that always fails.
#[derive(Debug)]
pub struct FailingSource;

#[async_trait]
impl NotificationSource for FailingSource {
    fn name(&self) -> &str {
        "broken"
    }

    async fn fetch(&self) -> AppResult<Vec<Notification>> {
        Err(AppError::external_service("connection refused"))
    }
}

/// Test application context
pub struct TestApp {
    pub engine: Arc<NotificationEngine>,
    pub source: Arc<ScriptedSource>,
    pub store: Arc<MemoryStore>,
    pub clock: Arc<ManualClock>,
    pub audio: Arc<RecordingAudio>,
    pub notifier: Arc<RecordingNotifier>,
    pub haptics: Arc<RecordingHaptics>,
}

impl TestApp {
    /// An app over one scripted source, an empty store, and granted,
    /// enabled desktop notices.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> TestAppBuilder {
        TestAppBuilder {
            store: Arc::new(MemoryStore::new()),
            extra_sources: Vec::new(),
            config: AppConfig::default(),
        }
    }

    /// A second app sharing this app's store and clock, as after a restart.
    pub fn restart(&self) -> Self {
        TestAppBuilder {
            store: Arc::clone(&self.store),
            extra_sources: Vec::new(),
            config: AppConfig::default(),
        }
        .build_at(Arc::clone(&self.clock))
    }
}

pub struct TestAppBuilder {
    store: Arc<MemoryStore>,
    extra_sources: Vec<Arc<dyn NotificationSource>>,
    config: AppConfig,
}

impl TestAppBuilder {
    /// Seeds the store before any service loads it.
    pub fn seed(self, key: &str, value: serde_json::Value) -> Self {
        let store: Arc<dyn KeyValueStore> = self.store.clone();
        store.set_json(key, &value).unwrap();
        self
    }

    pub fn with_source(mut self, source: Arc<dyn NotificationSource>) -> Self {
        self.extra_sources.push(source);
        self
    }

    pub fn build(self) -> TestApp {
        self.build_at(Arc::new(ManualClock::new(t0())))
    }

    fn build_at(self, clock: Arc<ManualClock>) -> TestApp {
        let source = ScriptedSource::new("scripted");
        let audio = Arc::new(RecordingAudio::new());
        let notifier = Arc::new(RecordingNotifier::new(NotificationPermission::Granted));
        let haptics = Arc::new(RecordingHaptics::new());
        let platform = Platform {
            audio: audio.clone(),
            desktop: notifier.clone(),
            haptics: haptics.clone(),
        };

        let mut sources: Vec<Arc<dyn NotificationSource>> = vec![source.clone()];
        sources.extend(self.extra_sources);

        let services = ServiceContext::new(
            &self.config,
            self.store.clone(),
            clock.clone(),
            platform,
            Aggregator::new(sources),
        );
        services.desktop.update_prefs(&DesktopPrefsPatch {
            enabled: Some(true),
            ..Default::default()
        });

        TestApp {
            engine: NotificationEngine::new(services),
            source,
            store: self.store,
            clock,
            audio,
            notifier,
            haptics,
        }
    }
}
