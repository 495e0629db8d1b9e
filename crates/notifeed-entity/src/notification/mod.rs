//! Notification domain entities.

pub mod action;
pub mod kind;
pub mod model;
pub mod priority;

pub use action::{ActionStyle, NotificationAction};
pub use kind::{NotificationType, TypeStyle};
pub use model::Notification;
pub use priority::NotificationPriority;
