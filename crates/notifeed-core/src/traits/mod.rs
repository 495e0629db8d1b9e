//! Capability traits defined in `notifeed-core` and implemented by other crates.
//!
//! Every platform-facing concern (persistence, wall clock, audio, desktop
//! notifications, vibration) sits behind one of these traits so the engine's
//! decision logic can run against in-memory fakes.

pub mod audio;
pub mod clock;
pub mod desktop;
pub mod haptics;
pub mod store;

pub use audio::{AudioOutput, Waveform};
pub use clock::{Clock, ManualClock, SystemClock};
pub use desktop::{DesktopNotice, DesktopNotifier, NoticeId, NotificationPermission};
pub use haptics::Haptics;
pub use store::KeyValueStore;
