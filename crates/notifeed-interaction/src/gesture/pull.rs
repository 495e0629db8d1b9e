//! Pull-down to refresh.

use notifeed_core::config::InteractionConfig;

use crate::haptics::HapticPattern;

/// Result of lifting the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRelease {
    /// The caller should refresh and then call [`PullToRefresh::complete`].
    pub refresh: bool,
    pub haptic: Option<HapticPattern>,
}

/// Tracks a vertical pull at the top of the scroll container.
#[derive(Debug, Clone)]
pub struct PullToRefresh {
    threshold: f64,
    max_pull: f64,
    resistance: f64,
    start_y: Option<f64>,
    distance: f64,
    crossed: bool,
    refreshing: bool,
}

impl PullToRefresh {
    pub fn new(threshold: f64, max_pull: f64, resistance: f64) -> Self {
        Self {
            threshold,
            max_pull,
            resistance,
            start_y: None,
            distance: 0.0,
            crossed: false,
            refreshing: false,
        }
    }

    pub fn from_config(config: &InteractionConfig) -> Self {
        Self::new(
            config.pull_threshold,
            config.pull_max,
            config.pull_resistance,
        )
    }

    /// Rendered pull distance after resistance and the cap.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn is_pulling(&self) -> bool {
        self.start_y.is_some()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Begins a pull at `y`. Ignored unless the container is scrolled to
    /// the top or a refresh is still running.
    pub fn start(&mut self, y: f64, scroll_top: f64) -> bool {
        if scroll_top > 0.0 || self.refreshing {
            return false;
        }
        self.start_y = Some(y);
        self.distance = 0.0;
        self.crossed = false;
        true
    }

    /// Updates the pointer position. Returns a pulse the first time the
    /// refresh threshold is reached during this pull.
    pub fn move_to(&mut self, y: f64) -> Option<HapticPattern> {
        let start = self.start_y?;
        self.distance = ((y - start) * self.resistance).clamp(0.0, self.max_pull);
        if self.distance >= self.threshold && !self.crossed {
            self.crossed = true;
            return Some(HapticPattern::Light);
        }
        None
    }

    /// Ends the pull.
    pub fn release(&mut self) -> PullRelease {
        let was_pulling = self.start_y.take().is_some();
        let refresh = was_pulling && self.distance >= self.threshold;
        self.distance = 0.0;
        self.crossed = false;
        if refresh {
            self.refreshing = true;
        }
        PullRelease {
            refresh,
            haptic: refresh.then_some(HapticPattern::Success),
        }
    }

    /// Marks the triggered refresh as finished.
    pub fn complete(&mut self) {
        self.refreshing = false;
    }
}

impl Default for PullToRefresh {
    fn default() -> Self {
        Self::from_config(&InteractionConfig::default())
    }
}
