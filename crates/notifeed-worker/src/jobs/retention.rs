//! Retention cleanup task.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use notifeed_core::result::AppResult;
use notifeed_realtime::NotificationEngine;

use crate::task::ScheduledTask;

/// Discards expired dismissed/read/snoozed records so long-running
/// processes age them out without a restart.
#[derive(Debug)]
pub struct RetentionCleanupTask {
    engine: Arc<NotificationEngine>,
}

impl RetentionCleanupTask {
    pub fn new(engine: Arc<NotificationEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl ScheduledTask for RetentionCleanupTask {
    fn name(&self) -> &str {
        "retention_cleanup"
    }

    async fn run(&self) -> AppResult<Value> {
        let report = self.engine.run_retention_cleanup();
        if report.ran {
            info!(pruned = ?report.pruned, "Retention cleanup finished");
        }
        Ok(serde_json::json!({
            "task": self.name(),
            "ran": report.ran,
            "pruned": report.pruned,
        }))
    }
}
