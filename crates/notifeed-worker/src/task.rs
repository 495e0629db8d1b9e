//! Scheduled task contract.

use async_trait::async_trait;
use serde_json::Value;

use notifeed_core::result::AppResult;

/// A unit of periodic work.
#[async_trait]
pub trait ScheduledTask: Send + Sync + std::fmt::Debug {
    /// Stable task name used in logs.
    fn name(&self) -> &str;

    /// Runs the task once and returns a JSON summary.
    async fn run(&self) -> AppResult<Value>;
}
