//! Concrete capability backends.
//!
//! - **log**: writes every side effect to the tracing log
//! - **notify-send**: desktop notices through the freedesktop `notify-send` tool
//! - **none**: reports the capability as unsupported
//! - **mock**: in-memory recorders for tests

pub mod log;
pub mod mock;
pub mod notify_send;
pub mod null;

use std::sync::Arc;

use tracing::info;

use notifeed_core::config::DeliveryConfig;
use notifeed_core::error::AppError;
use notifeed_core::result::AppResult;
use notifeed_core::traits::{AudioOutput, DesktopNotifier, Haptics};

/// The set of platform capabilities the engine drives.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Audio device.
    pub audio: Arc<dyn AudioOutput>,
    /// Desktop notification service.
    pub desktop: Arc<dyn DesktopNotifier>,
    /// Vibration motor.
    pub haptics: Arc<dyn Haptics>,
}

impl Platform {
    /// Selects backends by name from configuration.
    pub fn from_config(config: &DeliveryConfig) -> AppResult<Self> {
        let audio: Arc<dyn AudioOutput> = match config.audio_backend.as_str() {
            "log" => Arc::new(log::LogAudioOutput),
            "none" => Arc::new(null::NullAudioOutput),
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown audio backend: '{other}'. Supported: log, none"
                )));
            }
        };

        let desktop: Arc<dyn DesktopNotifier> = match config.desktop_backend.as_str() {
            "log" => Arc::new(log::LogDesktopNotifier::new()),
            "notify-send" => Arc::new(notify_send::NotifySendNotifier::detect(
                config.desktop_auto_close_ms,
            )),
            "none" => Arc::new(null::NullDesktopNotifier),
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown desktop backend: '{other}'. Supported: log, notify-send, none"
                )));
            }
        };

        info!(
            audio = %config.audio_backend,
            desktop = %config.desktop_backend,
            "Platform backends selected"
        );

        Ok(Self {
            audio,
            desktop,
            haptics: Arc::new(log::LogHaptics),
        })
    }
}
