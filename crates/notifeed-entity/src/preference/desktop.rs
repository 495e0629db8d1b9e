//! Desktop notification preferences.

use serde::{Deserialize, Serialize};

/// Desktop notification preferences.
///
/// Disabled by default; granting the platform permission enables them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesktopNotificationPrefs {
    /// Whether desktop notices are shown.
    pub enabled: bool,
    /// Whether the notice includes the message body.
    pub show_preview: bool,
}

impl Default for DesktopNotificationPrefs {
    fn default() -> Self {
        Self {
            enabled: false,
            show_preview: true,
        }
    }
}

/// A partial update to [`DesktopNotificationPrefs`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesktopPrefsPatch {
    /// New `enabled` value.
    pub enabled: Option<bool>,
    /// New `show_preview` value.
    pub show_preview: Option<bool>,
}

impl DesktopNotificationPrefs {
    /// Merge a patch over these preferences.
    pub fn apply(&mut self, patch: &DesktopPrefsPatch) {
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(show_preview) = patch.show_preview {
            self.show_preview = show_preview;
        }
    }
}
