//! One cue run: tone first, then the spoken note.

use tracing::{info, warn};

use crate::speech::{AnnounceOutcome, Announcement, SpeechAnnouncer, SpeechRuntime};
use crate::tone::{ToneEmitter, ToneOutput, ToneSpec};

/// Result of a single run. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// `None` when the tone was skipped.
    pub tone_ok: Option<bool>,
    /// `None` when speech was skipped.
    pub speech: Option<AnnounceOutcome>,
}

/// Play the tone, then speak the announcement. Either side may be absent.
pub fn run_sequence<O, R>(
    tone: Option<(&mut ToneEmitter<O>, &ToneSpec)>,
    speech: Option<(&mut SpeechAnnouncer<R>, &Announcement)>,
) -> RunReport
where
    O: ToneOutput,
    R: SpeechRuntime,
{
    let tone_ok = tone.map(|(emitter, spec)| {
        info!("Generating {:.0}kHz tone...", f64::from(spec.frequency_hz) / 1000.0);
        match emitter.emit(spec) {
            Ok(()) => true,
            Err(e) => {
                warn!("Tone not played: {e}");
                false
            }
        }
    });

    let speech = speech.map(|(announcer, announcement)| {
        info!("Speaking medical note...");
        announcer.announce(announcement)
    });

    RunReport { tone_ok, speech }
}
