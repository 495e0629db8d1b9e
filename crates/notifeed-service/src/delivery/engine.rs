//! Decides, once per fetch cycle, whether a new notification alerts the user.

use std::sync::{Arc, Mutex, RwLock};

use serde::Serialize;
use tracing::{debug, info};

use notifeed_entity::Notification;

use crate::feed::unread_count;
use crate::preferences::{ClickCallback, DesktopService, DndService, ShowOptions, SoundService};

/// Called with a notification id when its desktop notice is clicked.
pub type ClickHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Result of one delivery evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    /// Unread went up from zero; treated as the initial load.
    FirstLoad,
    /// Unread did not go up.
    NoIncrease,
    /// Unread went up but no unread notification was found.
    NoCandidate,
    /// Do-not-disturb silenced the notification.
    Muted { id: String },
    /// Sound and desktop notice were attempted.
    Delivered { id: String },
}

/// Compares successive unread counts and fires sound and desktop alerts.
pub struct DeliveryEngine {
    sound: Arc<SoundService>,
    desktop: Arc<DesktopService>,
    dnd: Arc<DndService>,
    previous_unread: Mutex<usize>,
    on_click: RwLock<Option<ClickHandler>>,
}

impl std::fmt::Debug for DeliveryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryEngine")
            .field("previous_unread", &self.previous_unread())
            .finish_non_exhaustive()
    }
}

impl DeliveryEngine {
    /// Creates an engine with a previous unread count of zero.
    pub fn new(
        sound: Arc<SoundService>,
        desktop: Arc<DesktopService>,
        dnd: Arc<DndService>,
    ) -> Self {
        Self {
            sound,
            desktop,
            dnd,
            previous_unread: Mutex::new(0),
            on_click: RwLock::new(None),
        }
    }

    /// Installs the handler run when a delivered desktop notice is clicked.
    pub fn set_click_handler(&self, handler: ClickHandler) {
        *self.on_click.write().unwrap_or_else(|e| e.into_inner()) = Some(handler);
    }

    /// Unread count recorded by the last evaluation.
    pub fn previous_unread(&self) -> usize {
        *self.previous_unread.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Evaluates a reconciled feed and records its unread count.
    ///
    /// Delivery fires only when unread grew from a non-zero count.
    pub fn evaluate(&self, feed: &[Notification]) -> DeliveryOutcome {
        let unread = unread_count(feed);
        let previous = {
            let mut previous = self.previous_unread.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::replace(&mut *previous, unread)
        };

        if unread <= previous {
            return DeliveryOutcome::NoIncrease;
        }
        if previous == 0 {
            debug!(unread, "Suppressing delivery on first load");
            return DeliveryOutcome::FirstLoad;
        }

        let Some(newest) = newest_unread(feed) else {
            return DeliveryOutcome::NoCandidate;
        };

        if self.dnd.is_muted(newest.is_urgent()) {
            debug!(id = %newest.id, "Delivery muted by do-not-disturb");
            return DeliveryOutcome::Muted {
                id: newest.id.clone(),
            };
        }

        self.sound.play_sound();

        let on_click = self
            .on_click
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .map(|handler| {
                let id = newest.id.clone();
                Box::new(move || handler(&id)) as ClickCallback
            });
        self.desktop.show_notification(
            &newest.title,
            ShowOptions {
                body: Some(newest.message.clone()),
                tag: Some(newest.id.clone()),
                on_click,
            },
        );

        info!(id = %newest.id, previous, unread, "Delivered notification");
        DeliveryOutcome::Delivered {
            id: newest.id.clone(),
        }
    }

    /// Forgets the previous unread count so the next evaluation counts as a
    /// first load.
    pub fn reset(&self) {
        *self.previous_unread.lock().unwrap_or_else(|e| e.into_inner()) = 0;
    }
}

/// The most recent unread notification; the earliest in feed order wins ties.
fn newest_unread(feed: &[Notification]) -> Option<&Notification> {
    feed.iter()
        .filter(|n| !n.read)
        .reduce(|best, n| if n.timestamp > best.timestamp { n } else { best })
}
