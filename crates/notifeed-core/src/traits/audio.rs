//! Audio output capability.

use crate::result::AppResult;

/// A mono PCM buffer ready for playback.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Samples per second.
    pub sample_rate: u32,
    /// Samples in `[-1.0, 1.0]`.
    pub samples: Vec<f32>,
}

impl Waveform {
    /// Playback length.
    pub fn duration(&self) -> std::time::Duration {
        if self.sample_rate == 0 {
            return std::time::Duration::ZERO;
        }
        std::time::Duration::from_nanos(
            self.samples.len() as u64 * 1_000_000_000 / self.sample_rate as u64,
        )
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0_f32, |acc, s| acc.max(s.abs()))
    }
}

/// An audio device that can play synthesized waveforms.
///
/// The device is opened lazily by the caller on first use and closed once
/// playback has finished, mirroring an audio context whose creation must
/// wait for user interaction.
pub trait AudioOutput: Send + Sync + std::fmt::Debug + 'static {
    /// Whether the platform has an audio device at all.
    fn supported(&self) -> bool;

    /// Acquire the device.
    fn open(&self) -> AppResult<()>;

    /// Queue a waveform for playback. The device must be open.
    fn play(&self, waveform: &Waveform) -> AppResult<()>;

    /// Release the device.
    fn close(&self) -> AppResult<()>;
}
