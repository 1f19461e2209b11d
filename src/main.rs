//! medical-note-cue: plays a tone, then reads a medical note aloud.

use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use medical_note_cue::config::Config;
use medical_note_cue::run_sequence;
use medical_note_cue::speech::espeak::EspeakRuntime;
use medical_note_cue::speech::SpeechAnnouncer;
use medical_note_cue::tone::{RodioToneOutput, ToneEmitter};

#[derive(Parser, Debug)]
#[command(name = "medical-note-cue", about = "Audio cue tone and spoken medical note")]
struct Args {
    /// Path to config.yaml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of times to run the tone + speech sequence
    #[arg(short, long, default_value_t = 1)]
    repeat: u32,

    /// Skip the tone
    #[arg(long)]
    no_tone: bool,

    /// Skip the spoken note
    #[arg(long)]
    no_speech: bool,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    // Usage errors are printed but still exit 0, like every other failure.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return;
        }
    };

    // RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("medical-note-cue starting");

    let config = Config::load(args.config.as_deref());
    debug!("Config: {:?}", config);

    let play_tone = config.tone.enabled && !args.no_tone;
    let speak = config.speech.enabled && !args.no_speech;

    let spec = config.tone.spec();
    let announcement = config.announcement.announcement();

    for run in 1..=args.repeat {
        if args.repeat > 1 {
            info!("Run {run}/{}", args.repeat);
        }

        // Fresh backends each run, nothing is reused across runs.
        let mut emitter = ToneEmitter::new(RodioToneOutput);
        let mut announcer =
            SpeechAnnouncer::new(EspeakRuntime::new(&config.speech), config.speech.flags());

        let report = run_sequence(
            play_tone.then_some((&mut emitter, &spec)),
            speak.then_some((&mut announcer, &announcement)),
        );
        debug!("Run {run} finished: {report:?}");
    }

    // Failures are logged above; the exit code is always 0.
}
