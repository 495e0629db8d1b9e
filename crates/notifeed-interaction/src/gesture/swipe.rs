//! Swipe-left to dismiss.

use notifeed_core::config::InteractionConfig;

use crate::haptics::HapticPattern;

/// Result of lifting the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeRelease {
    /// The item should be dismissed.
    pub dismissed: bool,
    pub haptic: Option<HapticPattern>,
}

impl SwipeRelease {
    const IDLE: Self = Self {
        dismissed: false,
        haptic: None,
    };
}

/// Tracks one horizontal swipe on a notification.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f64,
    start_x: Option<f64>,
    delta_x: f64,
    crossed: bool,
}

impl SwipeTracker {
    /// A tracker dismissing past `threshold` pixels of leftward travel.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.abs(),
            start_x: None,
            delta_x: 0.0,
            crossed: false,
        }
    }

    pub fn from_config(config: &InteractionConfig) -> Self {
        Self::new(config.swipe_threshold)
    }

    pub fn is_active(&self) -> bool {
        self.start_x.is_some()
    }

    /// Horizontal travel since `start`; negative is leftward.
    pub fn delta_x(&self) -> f64 {
        self.delta_x
    }

    /// Rendered offset. Items only follow leftward travel.
    pub fn offset(&self) -> f64 {
        self.delta_x.min(0.0)
    }

    /// Begins a gesture at `x`.
    pub fn start(&mut self, x: f64) {
        self.start_x = Some(x);
        self.delta_x = 0.0;
        self.crossed = false;
    }

    /// Updates the pointer position. Returns a pulse the first time the
    /// dismiss threshold is crossed during this gesture.
    pub fn move_to(&mut self, x: f64) -> Option<HapticPattern> {
        let start = self.start_x?;
        self.delta_x = x - start;
        if self.past_threshold() && !self.crossed {
            self.crossed = true;
            return Some(HapticPattern::Medium);
        }
        None
    }

    /// Ends the gesture.
    pub fn release(&mut self) -> SwipeRelease {
        if self.start_x.take().is_none() {
            return SwipeRelease::IDLE;
        }
        let dismissed = self.past_threshold();
        self.delta_x = 0.0;
        self.crossed = false;
        if dismissed {
            SwipeRelease {
                dismissed: true,
                haptic: Some(HapticPattern::Success),
            }
        } else {
            SwipeRelease::IDLE
        }
    }

    /// Abandons the gesture without dismissing.
    pub fn cancel(&mut self) {
        self.start_x = None;
        self.delta_x = 0.0;
        self.crossed = false;
    }

    fn past_threshold(&self) -> bool {
        self.delta_x < -self.threshold
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::from_config(&InteractionConfig::default())
    }
}
