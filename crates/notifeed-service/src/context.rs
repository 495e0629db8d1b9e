//! Wiring of every service over one store, clock, and platform.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use notifeed_core::config::AppConfig;
use notifeed_core::result::AppResult;
use notifeed_core::traits::{Clock, KeyValueStore, SystemClock};
use notifeed_store::StoreManager;

use crate::aggregator::Aggregator;
use crate::delivery::DeliveryEngine;
use crate::feed::FeedReconciler;
use crate::platform::Platform;
use crate::preferences::{AudioEngine, DesktopService, DndService, SoundService, ViewPreferences};
use crate::retention::RetentionManager;

/// Every service the notification engine consults, constructed once.
#[derive(Debug, Clone)]
pub struct ServiceContext {
    /// Persistent store shared by all services.
    pub store: Arc<dyn KeyValueStore>,
    /// Time source.
    pub clock: Arc<dyn Clock>,
    /// Platform capabilities.
    pub platform: Platform,
    /// Source fan-out.
    pub aggregator: Arc<Aggregator>,
    /// Dismissed/read/snoozed ids.
    pub retention: Arc<RetentionManager>,
    /// Retention applied to fetched feeds.
    pub reconciler: FeedReconciler,
    /// Sound preferences and playback.
    pub sound: Arc<SoundService>,
    /// Desktop notices.
    pub desktop: Arc<DesktopService>,
    /// Quiet hours.
    pub dnd: Arc<DndService>,
    /// Filter and grouping mode.
    pub view: Arc<ViewPreferences>,
    /// Per-cycle delivery decisions.
    pub delivery: Arc<DeliveryEngine>,
}

impl ServiceContext {
    /// Builds every service over the configured store, platform backends,
    /// and HTTP sources, using the system clock.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let store = StoreManager::new(&config.store)?;
        let platform = Platform::from_config(&config.delivery)?;
        let aggregator = Aggregator::from_config(&config.sources)?;
        info!(
            store = %config.store.provider,
            sources = ?aggregator.source_names(),
            "Service context configured"
        );
        Ok(Self::new(
            config,
            store.provider(),
            Arc::new(SystemClock),
            platform,
            aggregator,
        ))
    }

    /// Builds every service from configuration.
    pub fn new(
        config: &AppConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        platform: Platform,
        aggregator: Aggregator,
    ) -> Self {
        let retention = Arc::new(RetentionManager::new(
            store.clone(),
            clock.clone(),
            config.retention.clone(),
        ));
        let audio = AudioEngine::new(
            platform.audio.clone(),
            Duration::from_millis(config.delivery.audio_release_delay_ms),
        );
        let sound = Arc::new(SoundService::new(store.clone(), audio));
        let desktop = Arc::new(DesktopService::new(
            store.clone(),
            platform.desktop.clone(),
            Duration::from_millis(config.delivery.desktop_auto_close_ms),
            config.delivery.icon.clone(),
        ));
        let dnd = Arc::new(DndService::new(store.clone(), clock.clone()));
        let view = Arc::new(ViewPreferences::new(store.clone()));
        let delivery = Arc::new(DeliveryEngine::new(
            sound.clone(),
            desktop.clone(),
            dnd.clone(),
        ));

        Self {
            store,
            clock,
            platform,
            aggregator: Arc::new(aggregator),
            reconciler: FeedReconciler::new(retention.clone()),
            retention,
            sound,
            desktop,
            dnd,
            view,
            delivery,
        }
    }

    /// Re-reads every persisted set and preference, picking up writes made
    /// by other processes sharing the store.
    pub fn reload_persisted(&self) {
        self.retention.reload();
        self.sound.reload();
        self.desktop.reload();
        self.dnd.reload();
        self.view.reload();
        debug!("Reloaded persisted state");
    }
}
