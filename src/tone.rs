//! Tone playback with rodio.
//!
//! A tone is a sine wave at a fixed frequency for a fixed duration on the
//! default output device. There is no amplitude control: loudness is
//! whatever the system mixer is set to.

use std::thread;
use std::time::{Duration, Instant};

use rodio::source::SineWave;
use rodio::{OutputStreamBuilder, Sink, Source};
use thiserror::Error;
use tracing::{debug, info};

/// Frequency and duration of a single tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneSpec {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

impl ToneSpec {
    pub fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.duration_ms))
    }
}

#[derive(Error, Debug)]
pub enum ToneError {
    #[error("Audio device not available: {0}")]
    DeviceUnavailable(String),

    #[error("Playback failed: {0}")]
    Playback(String),
}

/// Host primitive that plays a tone. Takes frequency and duration only.
pub trait ToneOutput {
    fn play_tone(&mut self, spec: &ToneSpec) -> Result<(), ToneError>;
}

/// Plays tones on the default output device.
///
/// The stream is opened per call and dropped afterwards, so nothing
/// carries over between tones.
#[derive(Debug, Default)]
pub struct RodioToneOutput;

impl ToneOutput for RodioToneOutput {
    fn play_tone(&mut self, spec: &ToneSpec) -> Result<(), ToneError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| ToneError::DeviceUnavailable(e.to_string()))?;
        stream.log_on_drop(false);

        // rodio 0.21: Sink::connect_new takes &Mixer
        let sink = Sink::connect_new(stream.mixer());
        let source = SineWave::new(spec.frequency_hz as f32).take_duration(spec.duration());
        sink.append(source);
        sink.sleep_until_end();

        debug!("Tone finished ({} Hz)", spec.frequency_hz);
        Ok(())
    }
}

/// Emits tones and blocks the caller for the whole tone duration.
pub struct ToneEmitter<O: ToneOutput> {
    output: O,
}

impl<O: ToneOutput> ToneEmitter<O> {
    pub fn new(output: O) -> Self {
        Self { output }
    }

    /// Play `spec` and return once its duration has elapsed.
    ///
    /// Backends that hand the samples off and return early are padded
    /// with a sleep. On error nothing is padded.
    pub fn emit(&mut self, spec: &ToneSpec) -> Result<(), ToneError> {
        info!(
            "Playing {} Hz tone for {} ms",
            spec.frequency_hz, spec.duration_ms
        );
        let started = Instant::now();

        self.output.play_tone(spec)?;

        let remaining = spec.duration().saturating_sub(started.elapsed());
        if !remaining.is_zero() {
            debug!("Output returned early, waiting {remaining:?}");
            thread::sleep(remaining);
        }
        Ok(())
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}
