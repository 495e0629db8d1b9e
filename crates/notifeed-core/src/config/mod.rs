//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a serde default so that a missing
//! file still yields a complete configuration.

pub mod delivery;
pub mod feed;
pub mod interaction;
pub mod logging;
pub mod retention;
pub mod sources;
pub mod store;

use serde::{Deserialize, Serialize};

pub use self::delivery::DeliveryConfig;
pub use self::feed::FeedConfig;
pub use self::interaction::InteractionConfig;
pub use self::logging::LoggingConfig;
pub use self::retention::RetentionConfig;
pub use self::sources::SourcesConfig;
pub use self::store::StoreConfig;

use crate::error::AppError;

/// Environment variable prefix for overrides (`NOTIFEED__FEED__POLL_INTERVAL_SECONDS=10`).
const ENV_PREFIX: &str = "NOTIFEED";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend notification source endpoints.
    #[serde(default)]
    pub sources: SourcesConfig,
    /// Feed polling and badge settings.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Dismissed/read record retention.
    #[serde(default)]
    pub retention: RetentionConfig,
    /// Persistent key-value store backend.
    #[serde(default)]
    pub store: StoreConfig,
    /// Sound and desktop delivery settings.
    #[serde(default)]
    pub delivery: DeliveryConfig,
    /// Gesture thresholds.
    #[serde(default)]
    pub interaction: InteractionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// Merges the given file with an optional environment overlay
    /// (`config/{NOTIFEED_ENV}.toml`) and environment variables prefixed
    /// with `NOTIFEED__`. Missing files are not an error.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let env = std::env::var("NOTIFEED_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
