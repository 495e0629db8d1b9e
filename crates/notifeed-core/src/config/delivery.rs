//! Sound and desktop delivery configuration.

use serde::{Deserialize, Serialize};

/// Delivery side-effect settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Desktop notices close themselves after this many milliseconds.
    #[serde(default = "default_auto_close")]
    pub desktop_auto_close_ms: u64,
    /// The audio output is released this long after the last sound ends.
    #[serde(default = "default_audio_release")]
    pub audio_release_delay_ms: u64,
    /// Desktop backend: `"log"`, `"notify-send"`, or `"none"`.
    #[serde(default = "default_backend")]
    pub desktop_backend: String,
    /// Audio backend: `"log"` or `"none"`.
    #[serde(default = "default_backend")]
    pub audio_backend: String,
    /// Icon passed to desktop notices.
    #[serde(default)]
    pub icon: Option<String>,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            desktop_auto_close_ms: default_auto_close(),
            audio_release_delay_ms: default_audio_release(),
            desktop_backend: default_backend(),
            audio_backend: default_backend(),
            icon: None,
        }
    }
}

fn default_auto_close() -> u64 {
    5000
}

fn default_audio_release() -> u64 {
    500
}

fn default_backend() -> String {
    "log".to_string()
}
