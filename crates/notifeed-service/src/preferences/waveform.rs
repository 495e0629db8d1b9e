//! Alert tone synthesis.
//!
//! Each sound type is a short sequence of oscillator tones with a gain
//! envelope: a 10 ms linear attack to `0.3 × volume`, then an exponential
//! release toward silence at the end of the tone.

use notifeed_core::traits::Waveform;
use notifeed_entity::SoundType;

/// Output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44_100;

/// Gain at full volume.
const PEAK_GAIN: f32 = 0.3;

/// Attack ramp length in seconds.
const ATTACK_SECS: f32 = 0.010;

/// Gain the release decays to by the end of a tone.
const RELEASE_FLOOR: f32 = 0.001;

/// Oscillator shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Oscillator {
    Sine,
    Triangle,
}

impl Oscillator {
    fn sample(&self, frequency: f32, t: f32) -> f32 {
        match self {
            Self::Sine => (std::f32::consts::TAU * frequency * t).sin(),
            Self::Triangle => {
                let phase = (frequency * t).fract();
                1.0 - 4.0 * (phase - 0.5).abs()
            }
        }
    }
}

/// One tone within a sound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency in Hz.
    pub frequency: f32,
    /// Oscillator shape.
    pub oscillator: Oscillator,
    /// Offset from the start of the sound, in milliseconds.
    pub start_ms: u32,
    /// Tone length in milliseconds.
    pub duration_ms: u32,
}

impl Tone {
    const fn new(frequency: f32, oscillator: Oscillator, start_ms: u32, duration_ms: u32) -> Self {
        Self {
            frequency,
            oscillator,
            start_ms,
            duration_ms,
        }
    }

    fn end_ms(&self) -> u32 {
        self.start_ms + self.duration_ms
    }

    fn gain_at(&self, t: f32, peak: f32) -> f32 {
        let duration = self.duration_ms as f32 / 1000.0;
        if t < 0.0 || t >= duration || peak <= 0.0 {
            return 0.0;
        }
        if t < ATTACK_SECS {
            return peak * t / ATTACK_SECS;
        }
        let release = (duration - ATTACK_SECS).max(f32::EPSILON);
        let progress = (t - ATTACK_SECS) / release;
        let floor_ratio = (RELEASE_FLOOR / peak).min(1.0);
        peak * floor_ratio.powf(progress)
    }
}

/// The tone sequence for a sound type. `None` has no tones.
pub fn tones(sound: SoundType) -> Vec<Tone> {
    match sound {
        SoundType::None => Vec::new(),
        SoundType::Subtle => vec![Tone::new(800.0, Oscillator::Sine, 0, 150)],
        SoundType::Chime => vec![
            Tone::new(830.0, Oscillator::Sine, 0, 300),
            Tone::new(1046.0, Oscillator::Sine, 100, 300),
        ],
        SoundType::Alert => vec![
            Tone::new(880.0, Oscillator::Triangle, 0, 100),
            Tone::new(880.0, Oscillator::Triangle, 150, 100),
            Tone::new(880.0, Oscillator::Triangle, 300, 100),
        ],
    }
}

/// Renders `sound` at `volume` (clamped to `[0, 1]`).
///
/// Returns `None` for [`SoundType::None`].
pub fn synthesize(sound: SoundType, volume: f32) -> Option<Waveform> {
    let tones = tones(sound);
    let total_ms = tones.iter().map(Tone::end_ms).max()?;
    let peak = PEAK_GAIN * volume.clamp(0.0, 1.0);

    let len = (SAMPLE_RATE as u64 * total_ms as u64 / 1000) as usize;
    let mut samples = vec![0.0_f32; len];

    for tone in &tones {
        let offset = tone.start_ms as f32 / 1000.0;
        let first = (SAMPLE_RATE as u64 * tone.start_ms as u64 / 1000) as usize;
        let last = ((SAMPLE_RATE as u64 * tone.end_ms() as u64 / 1000) as usize).min(len);
        for (i, sample) in samples.iter_mut().enumerate().take(last).skip(first) {
            let t = i as f32 / SAMPLE_RATE as f32;
            let local = t - offset;
            *sample += tone.oscillator.sample(tone.frequency, local) * tone.gain_at(local, peak);
        }
    }

    for sample in &mut samples {
        *sample = sample.clamp(-1.0, 1.0);
    }

    Some(Waveform {
        sample_rate: SAMPLE_RATE,
        samples,
    })
}
