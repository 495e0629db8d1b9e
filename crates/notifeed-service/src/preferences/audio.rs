//! Lazily opened audio device with delayed release.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, warn};

use notifeed_core::traits::{AudioOutput, Waveform};

#[derive(Debug, Default)]
struct DeviceState {
    open: bool,
    /// Bumped on every play; a pending release only fires if it still matches.
    generation: u64,
}

/// Plays waveforms on an [`AudioOutput`], opening it on first use and
/// closing it `release_delay` after the most recent sound finishes.
#[derive(Debug, Clone)]
pub struct AudioEngine {
    output: Arc<dyn AudioOutput>,
    release_delay: Duration,
    state: Arc<Mutex<DeviceState>>,
}

impl AudioEngine {
    /// Creates an engine over `output`.
    pub fn new(output: Arc<dyn AudioOutput>, release_delay: Duration) -> Self {
        Self {
            output,
            release_delay,
            state: Arc::new(Mutex::new(DeviceState::default())),
        }
    }

    /// Whether the device is currently held open.
    pub fn is_open(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).open
    }

    /// Plays `waveform`. Returns whether playback started.
    ///
    /// Failures are logged and swallowed.
    pub fn play(&self, waveform: &Waveform) -> bool {
        if !self.output.supported() {
            debug!("Audio output unsupported, skipping sound");
            return false;
        }

        let generation = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            if !state.open {
                if let Err(e) = self.output.open() {
                    warn!(error = %e, "Failed to open audio output");
                    return false;
                }
                state.open = true;
            }
            if let Err(e) = self.output.play(waveform) {
                warn!(error = %e, "Failed to play sound");
                return false;
            }
            state.generation += 1;
            state.generation
        };

        self.schedule_release(generation, waveform.duration() + self.release_delay);
        true
    }

    fn schedule_release(&self, generation: u64, after: Duration) {
        let output = Arc::clone(&self.output);
        let state = Arc::clone(&self.state);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(after).await;
                    release(&output, &state, generation);
                });
            }
            Err(_) => {
                // No runtime to time the release on.
                release(&output, &state, generation);
            }
        }
    }
}

fn release(output: &Arc<dyn AudioOutput>, state: &Mutex<DeviceState>, generation: u64) {
    let mut state = state.lock().unwrap_or_else(|e| e.into_inner());
    if state.generation != generation || !state.open {
        return;
    }
    if let Err(e) = output.close() {
        warn!(error = %e, "Failed to close audio output");
    }
    state.open = false;
    debug!("Released audio output");
}
