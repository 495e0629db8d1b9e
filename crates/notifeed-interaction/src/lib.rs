//! # notifeed-interaction
//!
//! Input state machines over the notification feed. Each one consumes
//! abstract events (key presses, pointer positions) and returns the effect
//! the caller should apply, so none of them touch the feed directly.

pub mod gesture;
pub mod haptics;
pub mod keyboard;
pub mod keys;
pub mod navigation;

pub use gesture::{PullRelease, PullToRefresh, SwipeRelease, SwipeTracker};
pub use haptics::{HapticFeedback, HapticPattern};
pub use keyboard::{KeyAction, KeyContext, KeyboardController};
pub use keys::{FocusTarget, Key, KeyEvent};
pub use navigation::{FlatNavigator, GroupedNavigator};
