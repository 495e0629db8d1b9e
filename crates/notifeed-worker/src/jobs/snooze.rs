//! Snooze sweep task.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use notifeed_core::result::AppResult;
use notifeed_realtime::NotificationEngine;

use crate::task::ScheduledTask;

/// Resurfaces notifications whose snooze has expired.
#[derive(Debug)]
pub struct SnoozeSweepTask {
    engine: Arc<NotificationEngine>,
}

impl SnoozeSweepTask {
    pub fn new(engine: Arc<NotificationEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl ScheduledTask for SnoozeSweepTask {
    fn name(&self) -> &str {
        "snooze_sweep"
    }

    async fn run(&self) -> AppResult<Value> {
        let resurfaced = self.engine.resweep_snoozes();
        debug!(count = resurfaced.len(), "Snooze sweep finished");
        Ok(serde_json::json!({
            "task": self.name(),
            "resurfaced": resurfaced,
        }))
    }
}
