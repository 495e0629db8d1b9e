//! Built-in scheduled tasks.

pub mod retention;
pub mod snooze;

pub use retention::RetentionCleanupTask;
pub use snooze::SnoozeSweepTask;
