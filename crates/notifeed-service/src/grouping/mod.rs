//! Filtering, grouping, and group expand/collapse state.

pub mod expansion;
pub mod filter;
pub mod group;

pub use expansion::ExpansionState;
pub use filter::apply_filter;
pub use group::{NotificationGroup, group};
