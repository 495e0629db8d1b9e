//! Desktop notification preferences, permission, and display.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use dashmap::DashMap;
use tracing::{debug, info, warn};

use notifeed_core::traits::{
    DesktopNotice, DesktopNotifier, KeyValueStore, NoticeId, NotificationPermission,
};
use notifeed_entity::DesktopNotificationPrefs;
use notifeed_entity::preference::DesktopPrefsPatch;
use notifeed_store::keys;

use super::persisted::{load_or_default, persist};

/// Callback run when the user clicks a shown notice.
pub type ClickCallback = Box<dyn FnOnce() + Send + Sync>;

/// Optional parts of a desktop notice.
#[derive(Default)]
pub struct ShowOptions {
    /// Body text; dropped when previews are off.
    pub body: Option<String>,
    /// Replacement tag.
    pub tag: Option<String>,
    /// Click handler.
    pub on_click: Option<ClickCallback>,
}

impl std::fmt::Debug for ShowOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShowOptions")
            .field("body", &self.body)
            .field("tag", &self.tag)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

/// Shows desktop notices through a [`DesktopNotifier`], gated on platform
/// permission and the user's preference.
pub struct DesktopService {
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn DesktopNotifier>,
    prefs: RwLock<DesktopNotificationPrefs>,
    auto_close: Duration,
    icon: Option<String>,
    /// Pending click handlers by notice.
    callbacks: Arc<DashMap<NoticeId, ClickCallback>>,
}

impl std::fmt::Debug for DesktopService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesktopService")
            .field("notifier", &self.notifier)
            .field("prefs", &self.prefs())
            .field("auto_close", &self.auto_close)
            .field("pending_clicks", &self.callbacks.len())
            .finish()
    }
}

impl DesktopService {
    /// Creates the service, loading stored preferences.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn DesktopNotifier>,
        auto_close: Duration,
        icon: Option<String>,
    ) -> Self {
        let prefs = load_or_default(store.as_ref(), keys::DESKTOP_PREFS);
        Self {
            store,
            notifier,
            prefs: RwLock::new(prefs),
            auto_close,
            icon,
            callbacks: Arc::new(DashMap::new()),
        }
    }

    /// Current preferences.
    pub fn prefs(&self) -> DesktopNotificationPrefs {
        self.prefs.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Merges `patch` and persists the result.
    pub fn update_prefs(&self, patch: &DesktopPrefsPatch) -> DesktopNotificationPrefs {
        let updated = {
            let mut prefs = self.prefs.write().unwrap_or_else(|e| e.into_inner());
            prefs.apply(patch);
            persist(self.store.as_ref(), keys::DESKTOP_PREFS, &*prefs);
            prefs.clone()
        };
        info!(
            enabled = updated.enabled,
            show_preview = updated.show_preview,
            "Updated desktop notification preferences"
        );
        updated
    }

    /// Re-reads preferences from the store.
    pub fn reload(&self) -> DesktopNotificationPrefs {
        let mut prefs = self.prefs.write().unwrap_or_else(|e| e.into_inner());
        *prefs = load_or_default(self.store.as_ref(), keys::DESKTOP_PREFS);
        prefs.clone()
    }

    /// Whether the platform offers desktop notifications.
    pub fn supported(&self) -> bool {
        self.notifier.supported()
    }

    /// Current platform permission; `Denied` when unsupported.
    pub fn permission(&self) -> NotificationPermission {
        if !self.notifier.supported() {
            return NotificationPermission::Denied;
        }
        self.notifier.permission()
    }

    /// Asks the platform for permission, enabling notices on grant.
    pub async fn request_permission(&self) -> NotificationPermission {
        if !self.notifier.supported() {
            debug!("Desktop notifications unsupported");
            return NotificationPermission::Denied;
        }
        let permission = match self.notifier.request_permission().await {
            Ok(permission) => permission,
            Err(e) => {
                warn!(error = %e, "Permission request failed");
                return NotificationPermission::Denied;
            }
        };
        if permission == NotificationPermission::Granted {
            self.update_prefs(&DesktopPrefsPatch {
                enabled: Some(true),
                ..Default::default()
            });
        }
        info!(?permission, "Desktop notification permission resolved");
        permission
    }

    /// Shows a notice. No-op unless supported, permitted, and enabled.
    ///
    /// The notice closes itself after the configured delay.
    pub fn show_notification(&self, title: &str, options: ShowOptions) -> Option<NoticeId> {
        let prefs = self.prefs();
        if !prefs.enabled || self.permission() != NotificationPermission::Granted {
            debug!("Desktop notifications not permitted or disabled");
            return None;
        }

        let notice = DesktopNotice {
            title: title.to_string(),
            body: options.body.filter(|_| prefs.show_preview),
            icon: self.icon.clone(),
            tag: options.tag,
        };

        let id = match self.notifier.show(&notice) {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Failed to show desktop notification");
                return None;
            }
        };

        if let Some(callback) = options.on_click {
            self.callbacks.insert(id, callback);
        }
        self.schedule_auto_close(id);
        Some(id)
    }

    /// Handles a click: closes the notice, focuses the host, and runs the
    /// click handler. Returns whether a handler ran.
    pub fn handle_click(&self, id: NoticeId) -> bool {
        if let Err(e) = self.notifier.close(id) {
            warn!(%id, error = %e, "Failed to close clicked notice");
        }
        if let Err(e) = self.notifier.focus_host() {
            warn!(error = %e, "Failed to focus host window");
        }
        match self.callbacks.remove(&id) {
            Some((_, callback)) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Number of shown notices still waiting for a click or auto-close.
    pub fn pending_clicks(&self) -> usize {
        self.callbacks.len()
    }

    fn schedule_auto_close(&self, id: NoticeId) {
        let notifier = Arc::clone(&self.notifier);
        let callbacks = Arc::clone(&self.callbacks);
        let delay = self.auto_close;

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!(%id, "No runtime, notice will not auto-close");
            return;
        };
        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            callbacks.remove(&id);
            if let Err(e) = notifier.close(id) {
                warn!(%id, error = %e, "Failed to auto-close notice");
            }
        });
    }
}
