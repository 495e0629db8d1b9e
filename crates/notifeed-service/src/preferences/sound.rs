//! Sound alert preferences and playback.

use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use notifeed_core::traits::KeyValueStore;
use notifeed_entity::preference::SoundPrefsPatch;
use notifeed_entity::{SoundPreferences, SoundType};
use notifeed_store::keys;

use super::audio::AudioEngine;
use super::persisted::{load_or_default, persist};
use super::waveform::synthesize;

/// Persists [`SoundPreferences`] and plays the configured alert tone.
#[derive(Debug)]
pub struct SoundService {
    store: Arc<dyn KeyValueStore>,
    audio: AudioEngine,
    prefs: RwLock<SoundPreferences>,
}

impl SoundService {
    /// Creates the service, loading stored preferences.
    pub fn new(store: Arc<dyn KeyValueStore>, audio: AudioEngine) -> Self {
        let prefs = load_or_default(store.as_ref(), keys::SOUND_PREFS);
        Self {
            store,
            audio,
            prefs: RwLock::new(prefs),
        }
    }

    /// Current preferences.
    pub fn prefs(&self) -> SoundPreferences {
        self.prefs.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Merges `patch` into the preferences and persists the result.
    pub fn update_prefs(&self, patch: &SoundPrefsPatch) -> SoundPreferences {
        let updated = {
            let mut prefs = self.prefs.write().unwrap_or_else(|e| e.into_inner());
            prefs.apply(patch);
            persist(self.store.as_ref(), keys::SOUND_PREFS, &*prefs);
            prefs.clone()
        };
        info!(
            enabled = updated.enabled,
            sound = updated.sound_type.as_str(),
            volume = updated.volume,
            "Updated sound preferences"
        );
        updated
    }

    /// Re-reads preferences from the store.
    pub fn reload(&self) -> SoundPreferences {
        let mut prefs = self.prefs.write().unwrap_or_else(|e| e.into_inner());
        *prefs = load_or_default(self.store.as_ref(), keys::SOUND_PREFS);
        prefs.clone()
    }

    /// Plays the configured tone if sound is enabled. Returns whether a
    /// sound started.
    pub fn play_sound(&self) -> bool {
        let prefs = self.prefs();
        if !prefs.enabled {
            debug!("Sound disabled, skipping");
            return false;
        }
        self.play(prefs.sound_type, prefs.volume)
    }

    /// Plays the configured tone regardless of `enabled`, for previewing.
    pub fn test_sound(&self) -> bool {
        let prefs = self.prefs();
        self.play(prefs.sound_type, prefs.volume)
    }

    fn play(&self, sound: SoundType, volume: f32) -> bool {
        match synthesize(sound, volume) {
            Some(waveform) => self.audio.play(&waveform),
            None => false,
        }
    }
}
