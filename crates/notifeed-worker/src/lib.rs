//! Scheduled background tasks for Notifeed.
//!
//! This crate provides:
//! - The [`ScheduledTask`] trait every periodic task implements
//! - Retention cleanup and snooze sweep tasks
//! - A cron scheduler that runs registered tasks on their schedules

pub mod jobs;
pub mod scheduler;
pub mod task;

pub use scheduler::CronScheduler;
pub use task::ScheduledTask;
