//! Sound alert preferences.

use serde::{Deserialize, Serialize};

/// Which synthesized sound plays for a new notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundType {
    /// Silent.
    None,
    /// A single short soft tone.
    #[default]
    Subtle,
    /// Two rising tones.
    Chime,
    /// Three sharp pulses.
    Alert,
}

impl SoundType {
    /// Parse from string, falling back to the default.
    pub fn from_str_value(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(Self::None),
            "subtle" => Some(Self::Subtle),
            "chime" => Some(Self::Chime),
            "alert" => Some(Self::Alert),
            _ => None,
        }
    }

    /// Return the sound type as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Subtle => "subtle",
            Self::Chime => "chime",
            Self::Alert => "alert",
        }
    }
}

/// Sound preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SoundPreferences {
    /// Whether sounds play on new notifications.
    pub enabled: bool,
    /// Which sound plays.
    #[serde(rename = "type")]
    pub sound_type: SoundType,
    /// Playback volume in `[0, 1]`.
    pub volume: f32,
}

impl Default for SoundPreferences {
    fn default() -> Self {
        Self {
            enabled: true,
            sound_type: SoundType::Subtle,
            volume: 0.5,
        }
    }
}

/// A partial update to [`SoundPreferences`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundPrefsPatch {
    /// New `enabled` value.
    pub enabled: Option<bool>,
    /// New sound type.
    #[serde(rename = "type")]
    pub sound_type: Option<SoundType>,
    /// New volume; clamped to `[0, 1]`. Non-finite values are ignored.
    pub volume: Option<f32>,
}

impl SoundPreferences {
    /// Merge a patch over these preferences.
    pub fn apply(&mut self, patch: &SoundPrefsPatch) {
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(sound_type) = patch.sound_type {
            self.sound_type = sound_type;
        }
        if let Some(volume) = patch.volume.filter(|v| v.is_finite()) {
            self.volume = volume.clamp(0.0, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let prefs: SoundPreferences = serde_json::from_str(r#"{"type":"chime"}"#).unwrap();
        assert!(prefs.enabled);
        assert_eq!(prefs.sound_type, SoundType::Chime);
        assert_eq!(prefs.volume, 0.5);
    }

    #[test]
    fn test_patch_clamps_volume() {
        let mut prefs = SoundPreferences::default();
        prefs.apply(&SoundPrefsPatch {
            volume: Some(1.7),
            ..Default::default()
        });
        assert_eq!(prefs.volume, 1.0);
        assert_eq!(prefs.sound_type, SoundType::Subtle);
    }

    #[test]
    fn test_patch_ignores_non_finite_volume() {
        let mut prefs = SoundPreferences::default();
        for volume in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            prefs.apply(&SoundPrefsPatch {
                volume: Some(volume),
                ..Default::default()
            });
            assert_eq!(prefs.volume, 0.5);
        }
        prefs.apply(&SoundPrefsPatch {
            volume: Some(-0.3),
            ..Default::default()
        });
        assert_eq!(prefs.volume, 0.0);
    }
}
