//! Cron scheduler for periodic tasks.

use std::sync::Arc;

use serde_json::Value;
use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing::{debug, error, info};

use notifeed_core::config::RetentionConfig;
use notifeed_core::error::AppError;
use notifeed_core::result::AppResult;
use notifeed_realtime::NotificationEngine;

use crate::jobs::{RetentionCleanupTask, SnoozeSweepTask};
use crate::task::ScheduledTask;

/// Cron-based scheduler for [`ScheduledTask`]s.
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Registered tasks with their schedules
    tasks: Vec<(String, Arc<dyn ScheduledTask>)>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler")
            .field("tasks", &self.task_names())
            .finish_non_exhaustive()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new() -> AppResult<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            tasks: Vec::new(),
        })
    }

    /// Register the retention cleanup and snooze sweep tasks
    pub async fn register_default_tasks(
        &mut self,
        config: &RetentionConfig,
        engine: Arc<NotificationEngine>,
    ) -> AppResult<()> {
        self.register(
            &config.cleanup_cron,
            Arc::new(RetentionCleanupTask::new(Arc::clone(&engine))),
        )
        .await?;
        self.register(&config.snooze_sweep_cron, Arc::new(SnoozeSweepTask::new(engine)))
            .await?;

        info!("All scheduled tasks registered");
        Ok(())
    }

    /// Run `task` on the six-field cron `schedule` (seconds first).
    pub async fn register(
        &mut self,
        schedule: &str,
        task: Arc<dyn ScheduledTask>,
    ) -> AppResult<()> {
        let name = task.name().to_string();
        let runner = Arc::clone(&task);
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let task = Arc::clone(&runner);
            Box::pin(async move {
                run_logged(task.as_ref()).await;
            })
        })
        .map_err(|e| {
            AppError::configuration(format!("Invalid schedule '{schedule}' for {name}: {e}"))
        })?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add {name} schedule: {e}")))?;

        info!(task = %name, %schedule, "Registered scheduled task");
        self.tasks.push((schedule.to_string(), task));
        Ok(())
    }

    /// Names of registered tasks, in registration order.
    pub fn task_names(&self) -> Vec<String> {
        self.tasks
            .iter()
            .map(|(_, task)| task.name().to_string())
            .collect()
    }

    /// Runs every registered task once, outside its schedule.
    pub async fn run_all(&self) -> Vec<(String, AppResult<Value>)> {
        let mut results = Vec::with_capacity(self.tasks.len());
        for (_, task) in &self.tasks {
            results.push((task.name().to_string(), task.run().await));
        }
        results
    }

    /// Start the scheduler
    pub async fn start(&self) -> AppResult<()> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> AppResult<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        info!("Cron scheduler shut down");
        Ok(())
    }
}

async fn run_logged(task: &dyn ScheduledTask) {
    debug!(task = task.name(), "Running scheduled task");
    match task.run().await {
        Ok(summary) => debug!(task = task.name(), %summary, "Scheduled task finished"),
        Err(e) => error!(task = task.name(), error = %e, "Scheduled task failed"),
    }
}
