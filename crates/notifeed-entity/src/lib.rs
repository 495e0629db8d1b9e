//! # notifeed-entity
//!
//! Domain entity models for Notifeed: the unified [`Notification`] shape,
//! the persisted preference and retention records, the view settings, and
//! the raw records returned by each backend source. All entities derive
//! `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod notification;
pub mod preference;
pub mod record;
pub mod source;
pub mod view;

pub use notification::{
    ActionStyle, Notification, NotificationAction, NotificationPriority, NotificationType,
};
pub use preference::{DesktopNotificationPrefs, DndPreferences, SoundPreferences, SoundType};
pub use record::{PersistenceRecord, SnoozeRecord};
pub use view::{FeedFilter, GroupMode};
