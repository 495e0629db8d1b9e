//! Vibration capability.

use crate::result::AppResult;

/// A device vibration motor.
pub trait Haptics: Send + Sync + std::fmt::Debug + 'static {
    /// Whether the device can vibrate.
    fn supported(&self) -> bool;

    /// Vibrate using an on/off pattern in milliseconds.
    fn vibrate(&self, pattern: &[u64]) -> AppResult<()>;
}
