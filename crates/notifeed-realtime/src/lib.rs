//! # notifeed-realtime
//!
//! The reactive half of Notifeed. [`FeedStore`] publishes derived feed
//! snapshots to observers, [`NotificationEngine`] runs fetch/reconcile/
//! deliver cycles and local user actions, [`FeedPoller`] drives the panel
//! and badge refresh timers, and [`TitleSync`] mirrors the unread count
//! into the host title.

pub mod badge;
pub mod engine;
pub mod poller;
pub mod store;

#[cfg(test)]
mod testing;

pub use badge::{SharedTitle, TitleSync, TitleTarget, badge_label};
pub use engine::{MAX_SNOOZE_DAYS, NotificationEngine};
pub use poller::{FeedPoller, PanelState};
pub use store::{FeedEvent, FeedSnapshot, FeedStore};
