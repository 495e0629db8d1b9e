//! Named vibration patterns.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use notifeed_core::traits::Haptics;

/// A named on/off vibration pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HapticPattern {
    Light,
    Medium,
    Heavy,
    Success,
    Warning,
    Error,
}

impl HapticPattern {
    /// Alternating vibrate/pause durations in milliseconds.
    pub fn durations(&self) -> &'static [u64] {
        match self {
            Self::Light => &[10],
            Self::Medium => &[20],
            Self::Heavy => &[30],
            Self::Success => &[10, 50, 10],
            Self::Warning => &[30, 50, 30],
            Self::Error => &[50, 100, 50],
        }
    }
}

/// Plays [`HapticPattern`]s on a vibration motor.
///
/// Unsupported devices and vibration failures are silent.
#[derive(Debug, Clone)]
pub struct HapticFeedback {
    haptics: Arc<dyn Haptics>,
}

impl HapticFeedback {
    pub fn new(haptics: Arc<dyn Haptics>) -> Self {
        Self { haptics }
    }

    pub fn supported(&self) -> bool {
        self.haptics.supported()
    }

    /// Vibrates with `pattern`. Returns whether the device accepted it.
    pub fn trigger(&self, pattern: HapticPattern) -> bool {
        if !self.haptics.supported() {
            debug!(?pattern, "Haptics unsupported");
            return false;
        }
        match self.haptics.vibrate(pattern.durations()) {
            Ok(()) => true,
            Err(e) => {
                warn!(?pattern, error = %e, "Vibration failed");
                false
            }
        }
    }

    /// Plays the pattern if there is one.
    pub fn trigger_opt(&self, pattern: Option<HapticPattern>) -> bool {
        pattern.is_some_and(|p| self.trigger(p))
    }
}
