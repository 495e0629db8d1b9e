//! Persisted user preference records.
//!
//! Every record deserializes with container-level defaults, so a stored
//! object that is missing fields is merged over the compiled-in defaults
//! and never comes back partially populated.

pub mod desktop;
pub mod dnd;
pub mod sound;

pub use desktop::{DesktopNotificationPrefs, DesktopPrefsPatch};
pub use dnd::{DndPreferences, DndPrefsPatch};
pub use sound::{SoundPreferences, SoundPrefsPatch, SoundType};
