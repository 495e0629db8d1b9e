//! Backends for platforms without the capability.

use async_trait::async_trait;

use notifeed_core::error::AppError;
use notifeed_core::result::AppResult;
use notifeed_core::traits::{
    AudioOutput, DesktopNotice, DesktopNotifier, Haptics, NoticeId, NotificationPermission,
    Waveform,
};

/// No audio device.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudioOutput;

impl AudioOutput for NullAudioOutput {
    fn supported(&self) -> bool {
        false
    }

    fn open(&self) -> AppResult<()> {
        Err(AppError::unsupported("No audio output"))
    }

    fn play(&self, _waveform: &Waveform) -> AppResult<()> {
        Err(AppError::unsupported("No audio output"))
    }

    fn close(&self) -> AppResult<()> {
        Ok(())
    }
}

/// No desktop notification service.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDesktopNotifier;

#[async_trait]
impl DesktopNotifier for NullDesktopNotifier {
    fn supported(&self) -> bool {
        false
    }

    fn permission(&self) -> NotificationPermission {
        NotificationPermission::Denied
    }

    async fn request_permission(&self) -> AppResult<NotificationPermission> {
        Ok(NotificationPermission::Denied)
    }

    fn show(&self, _notice: &DesktopNotice) -> AppResult<NoticeId> {
        Err(AppError::unsupported("No desktop notification service"))
    }

    fn close(&self, _id: NoticeId) -> AppResult<()> {
        Ok(())
    }

    fn focus_host(&self) -> AppResult<()> {
        Ok(())
    }
}

/// No vibration motor.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHaptics;

impl Haptics for NullHaptics {
    fn supported(&self) -> bool {
        false
    }

    fn vibrate(&self, _pattern: &[u64]) -> AppResult<()> {
        Err(AppError::unsupported("No vibration motor"))
    }
}
