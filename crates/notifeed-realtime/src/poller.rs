//! Panel and badge refresh timers.
//!
//! While the panel is open the feed refreshes immediately and then every
//! `poll_interval_seconds`. The badge refreshes every
//! `badge_poll_interval_seconds` regardless of the panel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use notifeed_core::config::FeedConfig;

use crate::engine::NotificationEngine;

/// Open/closed state of the notification panel.
#[derive(Debug, Clone)]
pub struct PanelState {
    tx: Arc<watch::Sender<bool>>,
}

impl PanelState {
    /// Creates the panel state.
    pub fn new(open: bool) -> Self {
        let (tx, _) = watch::channel(open);
        Self { tx: Arc::new(tx) }
    }

    /// Opens the panel. Returns whether it was closed.
    pub fn open(&self) -> bool {
        self.set(true)
    }

    /// Closes the panel. Returns whether it was open.
    pub fn close(&self) -> bool {
        self.set(false)
    }

    /// Flips the panel and returns the new state.
    pub fn toggle(&self) -> bool {
        let mut now_open = false;
        self.tx.send_modify(|open| {
            *open = !*open;
            now_open = *open;
        });
        now_open
    }

    pub fn is_open(&self) -> bool {
        *self.tx.borrow()
    }

    /// Observes open/close transitions.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    fn set(&self, value: bool) -> bool {
        self.tx.send_if_modified(|open| {
            if *open == value {
                false
            } else {
                *open = value;
                true
            }
        })
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Background refresh loops for one engine.
#[derive(Debug)]
pub struct FeedPoller {
    shutdown_tx: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl FeedPoller {
    /// Spawns the panel and badge loops on the current runtime.
    pub fn start(engine: Arc<NotificationEngine>, panel: &PanelState, config: &FeedConfig) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let poll_interval = Duration::from_secs(config.poll_interval_seconds.max(1));
        let badge_interval = Duration::from_secs(config.badge_poll_interval_seconds.max(1));

        info!(
            poll_secs = poll_interval.as_secs(),
            badge_secs = badge_interval.as_secs(),
            "Starting feed poller"
        );

        let handles = vec![
            tokio::spawn(panel_loop(
                Arc::clone(&engine),
                panel.subscribe(),
                poll_interval,
                shutdown_rx.clone(),
            )),
            tokio::spawn(badge_loop(engine, badge_interval, shutdown_rx)),
        ];

        Self {
            shutdown_tx,
            handles,
        }
    }

    /// Stops both loops and waits for them to finish.
    pub async fn shutdown(mut self) {
        self.shutdown_tx.send_replace(true);
        for handle in std::mem::take(&mut self.handles) {
            let _ = handle.await;
        }
        info!("Feed poller stopped");
    }
}

impl Drop for FeedPoller {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

async fn panel_loop(
    engine: Arc<NotificationEngine>,
    mut panel: watch::Receiver<bool>,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        while !*panel.borrow_and_update() {
            tokio::select! {
                changed = panel.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
                _ = shutdown.changed() => return,
            }
        }

        debug!("Panel opened, refreshing");
        engine.refresh().await;

        let mut ticker = tokio::time::interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    engine.refresh().await;
                }
                changed = panel.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    if !*panel.borrow_and_update() {
                        debug!("Panel closed, pausing refresh");
                        break;
                    }
                }
                _ = shutdown.changed() => return,
            }
        }
    }
}

async fn badge_loop(
    engine: Arc<NotificationEngine>,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                engine.refresh().await;
            }
            _ = shutdown.changed() => return,
        }
    }
}
