//! User preference services: sound, desktop notifications, do-not-disturb,
//! and feed view settings.
//!
//! Each service loads its record at construction (merged over defaults),
//! applies partial updates, and re-persists the full record.

pub mod audio;
pub mod desktop;
pub mod dnd;
mod persisted;
pub mod sound;
pub mod view;
pub mod waveform;

pub use audio::AudioEngine;
pub use desktop::{ClickCallback, DesktopService, ShowOptions};
pub use dnd::DndService;
pub use sound::SoundService;
pub use view::ViewPreferences;
