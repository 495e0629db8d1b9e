//! The notification source seam.

use async_trait::async_trait;

use notifeed_core::result::AppResult;
use notifeed_entity::Notification;

/// One independent feed of notifications.
///
/// A failing source contributes nothing to the merged feed; the
/// aggregator logs the error and carries on.
#[async_trait]
pub trait NotificationSource: Send + Sync + std::fmt::Debug {
    /// Short source name, used in logs.
    fn name(&self) -> &str;

    /// Fetches and normalizes the source's current records.
    async fn fetch(&self) -> AppResult<Vec<Notification>>;
}
