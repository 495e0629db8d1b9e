//! Names of every persisted key.
//!
//! Centralising key names prevents typos and makes it easy to find every
//! key the application uses. The values match the keys the dashboard has
//! always written, so existing stores keep working.

// ── Retention records ──────────────────────────────────────

/// Dismissed notification ids (`PersistenceRecord`).
pub const DISMISSED_IDS: &str = "notification-dismissed-ids";

/// Read notification ids (`PersistenceRecord`).
pub const READ_IDS: &str = "notification-read-ids";

/// Snoozed notification ids (`SnoozeRecord`).
pub const SNOOZED: &str = "notification-snoozed";

/// Epoch milliseconds of the last retention cleanup.
pub const LAST_CLEANUP: &str = "notification-last-cleanup";

// ── Preferences ────────────────────────────────────────────

/// Sound preferences.
pub const SOUND_PREFS: &str = "notification-sound-prefs";

/// Desktop notification preferences.
pub const DESKTOP_PREFS: &str = "desktop-notification-prefs";

/// Do-not-disturb preferences.
pub const DND_PREFS: &str = "notification-dnd-prefs";

// ── View state ─────────────────────────────────────────────

/// Active feed filter.
pub const FILTER: &str = "notification-filter";

/// Active grouping mode.
pub const GROUP_MODE: &str = "notification-group-mode";

/// Every retention key, in cleanup order.
pub const RETENTION_KEYS: [&str; 3] = [DISMISSED_IDS, READ_IDS, SNOOZED];
