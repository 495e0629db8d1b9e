//! Backends that only log.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use notifeed_core::result::AppResult;
use notifeed_core::traits::{
    AudioOutput, DesktopNotice, DesktopNotifier, Haptics, NoticeId, NotificationPermission,
    Waveform,
};

/// Logs playback instead of producing sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudioOutput;

impl AudioOutput for LogAudioOutput {
    fn supported(&self) -> bool {
        true
    }

    fn open(&self) -> AppResult<()> {
        info!("Audio output opened");
        Ok(())
    }

    fn play(&self, waveform: &Waveform) -> AppResult<()> {
        info!(
            duration_ms = waveform.duration().as_millis() as u64,
            peak = waveform.peak(),
            "Playing sound"
        );
        Ok(())
    }

    fn close(&self) -> AppResult<()> {
        info!("Audio output closed");
        Ok(())
    }
}

/// Logs desktop notices. Permission is granted on request.
#[derive(Debug)]
pub struct LogDesktopNotifier {
    permission: Mutex<NotificationPermission>,
}

impl LogDesktopNotifier {
    /// Creates a notifier that has not been granted permission yet.
    pub fn new() -> Self {
        Self {
            permission: Mutex::new(NotificationPermission::Default),
        }
    }
}

impl Default for LogDesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DesktopNotifier for LogDesktopNotifier {
    fn supported(&self) -> bool {
        true
    }

    fn permission(&self) -> NotificationPermission {
        *self.permission.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn request_permission(&self) -> AppResult<NotificationPermission> {
        let mut permission = self.permission.lock().unwrap_or_else(|e| e.into_inner());
        *permission = NotificationPermission::Granted;
        Ok(*permission)
    }

    fn show(&self, notice: &DesktopNotice) -> AppResult<NoticeId> {
        let id = NoticeId::new();
        info!(
            %id,
            title = %notice.title,
            body = notice.body.as_deref().unwrap_or(""),
            tag = notice.tag.as_deref().unwrap_or(""),
            "Desktop notification"
        );
        Ok(id)
    }

    fn close(&self, id: NoticeId) -> AppResult<()> {
        info!(%id, "Desktop notification closed");
        Ok(())
    }

    fn focus_host(&self) -> AppResult<()> {
        info!("Focusing host window");
        Ok(())
    }
}

/// Logs vibration patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHaptics;

impl Haptics for LogHaptics {
    fn supported(&self) -> bool {
        true
    }

    fn vibrate(&self, pattern: &[u64]) -> AppResult<()> {
        info!(?pattern, "Vibrate");
        Ok(())
    }
}
