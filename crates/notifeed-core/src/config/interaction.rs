//! Gesture threshold configuration.

use serde::{Deserialize, Serialize};

/// Swipe and pull gesture tuning, in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Leftward travel past which a swipe dismisses.
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f64,
    /// Pull distance past which a release refreshes.
    #[serde(default = "default_pull_threshold")]
    pub pull_threshold: f64,
    /// Maximum rendered pull distance.
    #[serde(default = "default_pull_max")]
    pub pull_max: f64,
    /// Factor applied to the raw vertical delta.
    #[serde(default = "default_pull_resistance")]
    pub pull_resistance: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: default_swipe_threshold(),
            pull_threshold: default_pull_threshold(),
            pull_max: default_pull_max(),
            pull_resistance: default_pull_resistance(),
        }
    }
}

fn default_swipe_threshold() -> f64 {
    100.0
}

fn default_pull_threshold() -> f64 {
    80.0
}

fn default_pull_max() -> f64 {
    120.0
}

fn default_pull_resistance() -> f64 {
    0.5
}
