//! Recording capability fakes for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use notifeed_core::error::AppError;
use notifeed_core::result::AppResult;
use notifeed_core::traits::{
    AudioOutput, DesktopNotice, DesktopNotifier, Haptics, NoticeId, NotificationPermission,
    Waveform,
};

/// Counts audio device calls.
#[derive(Debug)]
pub struct RecordingAudio {
    supported: bool,
    fail: AtomicBool,
    opens: AtomicUsize,
    plays: AtomicUsize,
    closes: AtomicUsize,
}

impl RecordingAudio {
    /// A working device.
    pub fn new() -> Self {
        Self::with_support(true)
    }

    /// A platform without audio.
    pub fn unsupported() -> Self {
        Self::with_support(false)
    }

    fn with_support(supported: bool) -> Self {
        Self {
            supported,
            fail: AtomicBool::new(false),
            opens: AtomicUsize::new(0),
            plays: AtomicUsize::new(0),
            closes: AtomicUsize::new(0),
        }
    }

    /// Makes subsequent `play` calls fail.
    pub fn fail_playback(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl Default for RecordingAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioOutput for RecordingAudio {
    fn supported(&self) -> bool {
        self.supported
    }

    fn open(&self) -> AppResult<()> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn play(&self, _waveform: &Waveform) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::platform("playback failed"));
        }
        self.plays.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn close(&self) -> AppResult<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Records shown and closed desktop notices.
#[derive(Debug)]
pub struct RecordingNotifier {
    permission: Mutex<NotificationPermission>,
    grant_on_request: AtomicBool,
    shown: Mutex<Vec<(NoticeId, DesktopNotice)>>,
    closed: Mutex<Vec<NoticeId>>,
    focus: AtomicUsize,
}

impl RecordingNotifier {
    /// A notifier with the given starting permission.
    pub fn new(permission: NotificationPermission) -> Self {
        Self {
            permission: Mutex::new(permission),
            grant_on_request: AtomicBool::new(false),
            shown: Mutex::new(Vec::new()),
            closed: Mutex::new(Vec::new()),
            focus: AtomicUsize::new(0),
        }
    }

    /// Whether a permission request is granted (otherwise denied).
    pub fn grant_on_request(&self, grant: bool) {
        self.grant_on_request.store(grant, Ordering::SeqCst);
    }

    /// Shown notices, oldest first.
    pub fn shown(&self) -> Vec<DesktopNotice> {
        self.shown
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, notice)| notice.clone())
            .collect()
    }

    /// Id of the most recently shown notice.
    pub fn last_id(&self) -> Option<NoticeId> {
        self.shown
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .map(|(id, _)| *id)
    }

    /// Closed notice ids, in order.
    pub fn closed(&self) -> Vec<NoticeId> {
        self.closed.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of host focus requests.
    pub fn focus_count(&self) -> usize {
        self.focus.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DesktopNotifier for RecordingNotifier {
    fn supported(&self) -> bool {
        true
    }

    fn permission(&self) -> NotificationPermission {
        *self.permission.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn request_permission(&self) -> AppResult<NotificationPermission> {
        let resolved = if self.grant_on_request.load(Ordering::SeqCst) {
            NotificationPermission::Granted
        } else {
            NotificationPermission::Denied
        };
        *self.permission.lock().unwrap_or_else(|e| e.into_inner()) = resolved;
        Ok(resolved)
    }

    fn show(&self, notice: &DesktopNotice) -> AppResult<NoticeId> {
        let id = NoticeId::new();
        self.shown
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, notice.clone()));
        Ok(id)
    }

    fn close(&self, id: NoticeId) -> AppResult<()> {
        self.closed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(id);
        Ok(())
    }

    fn focus_host(&self) -> AppResult<()> {
        self.focus.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Records vibration patterns.
#[derive(Debug, Default)]
pub struct RecordingHaptics {
    patterns: Mutex<Vec<Vec<u64>>>,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every pattern vibrated, in order.
    pub fn patterns(&self) -> Vec<Vec<u64>> {
        self.patterns.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Haptics for RecordingHaptics {
    fn supported(&self) -> bool {
        true
    }

    fn vibrate(&self, pattern: &[u64]) -> AppResult<()> {
        self.patterns
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(pattern.to_vec());
        Ok(())
    }
}
