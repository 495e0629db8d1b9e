//! Retention-bounded persistence of dismissed, read, and snoozed ids.

pub mod manager;
pub mod snooze;

pub use manager::{CleanupReport, RetentionManager};
