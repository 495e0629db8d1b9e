//! Concurrent fan-out over every source, merged into one sorted feed.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use notifeed_core::config::SourcesConfig;
use notifeed_core::result::AppResult;
use notifeed_entity::Notification;

use super::http::sources_from_config;
use super::source::NotificationSource;

/// Merges independent notification sources.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    /// Sources in tie-break order.
    sources: Vec<Arc<dyn NotificationSource>>,
}

impl Aggregator {
    /// Creates an aggregator over `sources`, which are listed in tie-break
    /// order.
    pub fn new(sources: Vec<Arc<dyn NotificationSource>>) -> Self {
        Self { sources }
    }

    /// Creates an aggregator over the configured HTTP sources.
    pub fn from_config(config: &SourcesConfig) -> AppResult<Self> {
        Ok(Self::new(sources_from_config(config)?))
    }

    /// Names of the registered sources.
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    /// Fetches every source concurrently and returns the merged feed,
    /// newest first.
    ///
    /// A failing source contributes nothing. Equal timestamps keep source
    /// order, then in-source order.
    pub async fn fetch_all(&self) -> Vec<Notification> {
        let results = join_all(self.sources.iter().map(|source| source.fetch())).await;

        let mut merged = Vec::new();
        for (source, result) in self.sources.iter().zip(results) {
            match result {
                Ok(notifications) => {
                    debug!(source = source.name(), count = notifications.len(), "Source fetched");
                    merged.extend(notifications);
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Source fetch failed, skipping");
                }
            }
        }

        merged.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        merged
    }
}
