use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use medical_note_cue::config::Config;
use medical_note_cue::run_sequence;
use medical_note_cue::speech::{
    AnnounceOutcome, Announcement, SpeakFlags, SpeechAnnouncer, SpeechError, SpeechRuntime,
    SpeechVoice,
};
use medical_note_cue::tone::{ToneEmitter, ToneError, ToneOutput, ToneSpec};

const NOTE: &str = "The patient has been complaining of chest pain for the past week. ECG shows irregular rhythm. Prescribed low dose beta-blocker. Recommended follow-up in 5 days.";

#[derive(Default)]
struct Backend {
    tones: Vec<ToneSpec>,
    spoken: Vec<String>,
    sessions_opened: usize,
    sessions_closed: usize,
    voices_released: usize,
}

type Shared = Arc<Mutex<Backend>>;

struct FakeTone(Shared);

impl ToneOutput for FakeTone {
    fn play_tone(&mut self, spec: &ToneSpec) -> Result<(), ToneError> {
        self.0.lock().unwrap().tones.push(*spec);
        Ok(())
    }
}

struct FakeRuntime(Shared);

struct FakeVoice(Shared);

impl SpeechVoice for FakeVoice {
    fn speak(&mut self, text: &str, _flags: SpeakFlags) -> Result<(), SpeechError> {
        self.0.lock().unwrap().spoken.push(text.to_string());
        Ok(())
    }
}

impl Drop for FakeVoice {
    fn drop(&mut self) {
        self.0.lock().unwrap().voices_released += 1;
    }
}

impl SpeechRuntime for FakeRuntime {
    type Voice = FakeVoice;

    fn initialize(&mut self) -> Result<(), SpeechError> {
        self.0.lock().unwrap().sessions_opened += 1;
        Ok(())
    }

    fn create_voice(&mut self) -> Result<FakeVoice, SpeechError> {
        Ok(FakeVoice(self.0.clone()))
    }

    fn uninitialize(&mut self) {
        self.0.lock().unwrap().sessions_closed += 1;
    }
}

fn run_once(shared: &Shared, spec: &ToneSpec, announcement: &Announcement) {
    let mut emitter = ToneEmitter::new(FakeTone(shared.clone()));
    let mut announcer = SpeechAnnouncer::new(FakeRuntime(shared.clone()), SpeakFlags::default());

    let report = run_sequence(
        Some((&mut emitter, spec)),
        Some((&mut announcer, announcement)),
    );
    assert_eq!(report.tone_ok, Some(true));
    assert_eq!(report.speech, Some(AnnounceOutcome::Spoken));
}

#[test]
fn default_config_plays_one_tone_then_speaks_the_note() {
    let config = Config::default();
    let shared = Shared::default();

    let started = Instant::now();
    run_once(&shared, &config.tone.spec(), &config.announcement.announcement());
    assert!(started.elapsed() >= Duration::from_millis(3000));

    let backend = shared.lock().unwrap();
    assert_eq!(backend.tones, vec![ToneSpec::new(18000, 3000)]);
    assert_eq!(backend.spoken, vec![NOTE.to_string()]);
    assert_eq!(backend.sessions_opened, 1);
    assert_eq!(backend.sessions_closed, 1);
    assert_eq!(backend.voices_released, 1);
}

#[test]
fn two_runs_are_independent() {
    let shared = Shared::default();
    let spec = ToneSpec::new(18000, 50);
    let announcement = Announcement::new(NOTE);

    run_once(&shared, &spec, &announcement);
    run_once(&shared, &spec, &announcement);

    let backend = shared.lock().unwrap();
    assert_eq!(backend.tones, vec![spec, spec]);
    assert_eq!(backend.spoken.len(), 2);
    assert_eq!(backend.sessions_opened, 2);
    assert_eq!(backend.sessions_closed, 2);
    assert_eq!(backend.voices_released, 2);
}

#[test]
fn skipped_components_are_not_touched() {
    let shared = Shared::default();
    let mut announcer = SpeechAnnouncer::new(FakeRuntime(shared.clone()), SpeakFlags::default());
    let announcement = Announcement::new(NOTE);

    let report = run_sequence(
        None::<(&mut ToneEmitter<FakeTone>, &ToneSpec)>,
        Some((&mut announcer, &announcement)),
    );

    assert_eq!(report.tone_ok, None);
    assert_eq!(report.speech, Some(AnnounceOutcome::Spoken));
    assert!(shared.lock().unwrap().tones.is_empty());
}
