//! Pointer gesture state machines.
//!
//! Both trackers follow the same contract: `start` with the initial
//! coordinate, `move_to` for every pointer move, then `release`. Each step
//! returns the haptic pattern (if any) the caller should play.

pub mod pull;
pub mod swipe;

pub use pull::{PullRelease, PullToRefresh};
pub use swipe::{SwipeRelease, SwipeTracker};
