//! Do-not-disturb preferences.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Do-not-disturb preferences with an optional quiet-hours schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DndPreferences {
    /// Master switch.
    pub enabled: bool,
    /// When false, DND mutes everything while enabled.
    pub schedule_enabled: bool,
    /// Quiet hours start hour (0-23).
    pub start_hour: u32,
    /// Quiet hours start minute (0-59).
    pub start_minute: u32,
    /// Quiet hours end hour (0-23), exclusive.
    pub end_hour: u32,
    /// Quiet hours end minute (0-59), exclusive.
    pub end_minute: u32,
    /// Whether urgent notifications break through.
    pub allow_urgent: bool,
}

impl Default for DndPreferences {
    fn default() -> Self {
        Self {
            enabled: false,
            schedule_enabled: false,
            start_hour: 22,
            start_minute: 0,
            end_hour: 8,
            end_minute: 0,
            allow_urgent: true,
        }
    }
}

impl DndPreferences {
    /// Quiet-hours start as minutes since midnight.
    pub fn start_minutes(&self) -> u32 {
        self.start_hour * 60 + self.start_minute
    }

    /// Quiet-hours end as minutes since midnight.
    pub fn end_minutes(&self) -> u32 {
        self.end_hour * 60 + self.end_minute
    }

    /// Whether `time` falls inside `[start, end)`, wrapping past midnight
    /// when `start > end`. An empty window (`start == end`) is never quiet.
    pub fn window_contains(&self, time: NaiveTime) -> bool {
        let now = time.hour() * 60 + time.minute();
        let start = self.start_minutes();
        let end = self.end_minutes();

        if start > end {
            now >= start || now < end
        } else {
            start <= now && now < end
        }
    }

    /// Merge a patch over these preferences.
    pub fn apply(&mut self, patch: &DndPrefsPatch) {
        if let Some(v) = patch.enabled {
            self.enabled = v;
        }
        if let Some(v) = patch.schedule_enabled {
            self.schedule_enabled = v;
        }
        if let Some(v) = patch.start_hour {
            self.start_hour = v.min(23);
        }
        if let Some(v) = patch.start_minute {
            self.start_minute = v.min(59);
        }
        if let Some(v) = patch.end_hour {
            self.end_hour = v.min(23);
        }
        if let Some(v) = patch.end_minute {
            self.end_minute = v.min(59);
        }
        if let Some(v) = patch.allow_urgent {
            self.allow_urgent = v;
        }
    }
}

/// A partial update to [`DndPreferences`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DndPrefsPatch {
    /// New master switch.
    pub enabled: Option<bool>,
    /// New schedule switch.
    pub schedule_enabled: Option<bool>,
    /// New start hour.
    pub start_hour: Option<u32>,
    /// New start minute.
    pub start_minute: Option<u32>,
    /// New end hour.
    pub end_hour: Option<u32>,
    /// New end minute.
    pub end_minute: Option<u32>,
    /// New urgent bypass.
    pub allow_urgent: Option<bool>,
}
