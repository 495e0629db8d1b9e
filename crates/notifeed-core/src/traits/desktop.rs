//! Desktop notification capability.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::result::AppResult;

/// Tri-state platform permission for desktop notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPermission {
    /// The user has not been asked yet.
    Default,
    /// The user allowed notifications.
    Granted,
    /// The user refused notifications.
    Denied,
}

/// Identifier of a shown desktop notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeId(pub Uuid);

impl NoticeId {
    /// A fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NoticeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NoticeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content of a desktop notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopNotice {
    /// Notice title.
    pub title: String,
    /// Optional body text.
    pub body: Option<String>,
    /// Optional icon path or URL.
    pub icon: Option<String>,
    /// Replacement tag; a notice with the same tag replaces the previous one.
    pub tag: Option<String>,
}

/// A platform desktop notification service.
#[async_trait]
pub trait DesktopNotifier: Send + Sync + std::fmt::Debug + 'static {
    /// Whether the platform can show desktop notifications at all.
    fn supported(&self) -> bool;

    /// Current permission state.
    fn permission(&self) -> NotificationPermission;

    /// Ask the user for permission.
    async fn request_permission(&self) -> AppResult<NotificationPermission>;

    /// Display a notice.
    fn show(&self, notice: &DesktopNotice) -> AppResult<NoticeId>;

    /// Close a previously shown notice. Closing an unknown notice is not an error.
    fn close(&self, id: NoticeId) -> AppResult<()>;

    /// Bring the host window to the foreground.
    fn focus_host(&self) -> AppResult<()>;
}
