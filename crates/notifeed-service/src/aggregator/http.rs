//! HTTP-backed sources for the dashboard's JSON endpoints.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use notifeed_core::config::SourcesConfig;
use notifeed_core::error::{AppError, ErrorKind};
use notifeed_core::result::AppResult;
use notifeed_entity::Notification;
use notifeed_entity::source::{ActivityResponse, AgentsResponse, AlertsResponse, EventsResponse};

use super::normalize::{
    self, normalize_activity, normalize_agent, normalize_alert, normalize_event,
};
use super::source::NotificationSource;

/// Shared HTTP client for every source endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client rooted at `config.base_url`.
    ///
    /// Requests have no timeout unless `request_timeout_seconds` is set.
    pub fn new(config: &SourcesConfig) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GETs `path` (with query string) and decodes the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Fetching source");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| external(&url, "request failed", e))?
            .error_for_status()
            .map_err(|e| external(&url, "bad status", e))?;

        response
            .json::<T>()
            .await
            .map_err(|e| external(&url, "invalid body", e))
    }
}

fn external(url: &str, what: &str, e: reqwest::Error) -> AppError {
    AppError::with_source(ErrorKind::ExternalService, format!("{url}: {what}"), e)
}

/// `GET /api/health/alerts-history`.
#[derive(Debug, Clone)]
pub struct AlertsSource {
    client: Arc<ApiClient>,
    limit: u32,
    days: u32,
}

impl AlertsSource {
    /// Creates the source.
    pub fn new(client: Arc<ApiClient>, limit: u32, days: u32) -> Self {
        Self { client, limit, days }
    }
}

#[async_trait]
impl NotificationSource for AlertsSource {
    fn name(&self) -> &str {
        normalize::ALERTS
    }

    async fn fetch(&self) -> AppResult<Vec<Notification>> {
        let path = format!(
            "/api/health/alerts-history?limit={}&days={}",
            self.limit, self.days
        );
        let body: AlertsResponse = self.client.get_json(&path).await?;
        Ok(body.alerts.iter().filter_map(normalize_alert).collect())
    }
}

/// `GET /api/events`.
#[derive(Debug, Clone)]
pub struct EventsSource {
    client: Arc<ApiClient>,
    limit: u32,
}

impl EventsSource {
    /// Creates the source.
    pub fn new(client: Arc<ApiClient>, limit: u32) -> Self {
        Self { client, limit }
    }
}

#[async_trait]
impl NotificationSource for EventsSource {
    fn name(&self) -> &str {
        normalize::EVENTS
    }

    async fn fetch(&self) -> AppResult<Vec<Notification>> {
        let path = format!("/api/events?limit={}", self.limit);
        let body: EventsResponse = self.client.get_json(&path).await?;
        Ok(body.events.iter().filter_map(normalize_event).collect())
    }
}

/// `GET /api/agents`.
#[derive(Debug, Clone)]
pub struct AgentsSource {
    client: Arc<ApiClient>,
}

impl AgentsSource {
    /// Creates the source.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationSource for AgentsSource {
    fn name(&self) -> &str {
        normalize::AGENTS
    }

    async fn fetch(&self) -> AppResult<Vec<Notification>> {
        let body: AgentsResponse = self.client.get_json("/api/agents").await?;
        Ok(body.agents.iter().filter_map(normalize_agent).collect())
    }
}

/// `GET /api/activity`.
#[derive(Debug, Clone)]
pub struct ActivitySource {
    client: Arc<ApiClient>,
    limit: u32,
}

impl ActivitySource {
    /// Creates the source.
    pub fn new(client: Arc<ApiClient>, limit: u32) -> Self {
        Self { client, limit }
    }
}

#[async_trait]
impl NotificationSource for ActivitySource {
    fn name(&self) -> &str {
        normalize::ACTIVITY
    }

    async fn fetch(&self) -> AppResult<Vec<Notification>> {
        let path = format!("/api/activity?limit={}", self.limit);
        let body: ActivityResponse = self.client.get_json(&path).await?;
        Ok(body.activities.iter().filter_map(normalize_activity).collect())
    }
}

/// Builds the enabled sources from configuration, in tie-break order.
pub fn sources_from_config(
    config: &SourcesConfig,
) -> AppResult<Vec<Arc<dyn NotificationSource>>> {
    for name in &config.enabled {
        if !normalize::SOURCE_ORDER.contains(&name.as_str()) {
            return Err(AppError::configuration(format!(
                "Unknown notification source: '{name}'. Supported: {}",
                normalize::SOURCE_ORDER.join(", ")
            )));
        }
    }

    let client = Arc::new(ApiClient::new(config)?);
    let mut sources: Vec<Arc<dyn NotificationSource>> = Vec::new();
    for name in normalize::SOURCE_ORDER {
        if !config.enabled.iter().any(|enabled| enabled == name) {
            continue;
        }
        let source: Arc<dyn NotificationSource> = match name {
            normalize::ALERTS => Arc::new(AlertsSource::new(
                client.clone(),
                config.alerts_limit,
                config.alerts_days,
            )),
            normalize::EVENTS => Arc::new(EventsSource::new(client.clone(), config.events_limit)),
            normalize::AGENTS => Arc::new(AgentsSource::new(client.clone())),
            _ => Arc::new(ActivitySource::new(client.clone(), config.activity_limit)),
        };
        sources.push(source);
    }
    Ok(sources)
}
