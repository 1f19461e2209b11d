//! Speech announcements through a host speech engine.
//!
//! Using the engine takes two acquisitions: the engine runtime, then a
//! voice. Both are held by guards so that whatever was acquired is
//! released exactly once, whichever way `announce` returns.
//!
//! - `espeak`: espeak-ng subprocess backend

pub mod espeak;

use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Text handed to the speech engine. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    text: String,
}

impl Announcement {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// How the engine should interpret the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpeakFlags {
    /// Parse the text as SSML/XML markup instead of plain prose.
    pub markup: bool,
}

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Failed to initialize speech runtime: {0}")]
    RuntimeInit(String),

    #[error("Failed to create voice: {0}")]
    VoiceCreation(String),

    #[error("Speak failed: {0}")]
    Speak(String),
}

/// A voice handle. Dropping it releases the voice.
pub trait SpeechVoice {
    /// Speak `text` and block until playback finishes.
    fn speak(&mut self, text: &str, flags: SpeakFlags) -> Result<(), SpeechError>;
}

/// The host speech runtime.
pub trait SpeechRuntime {
    type Voice: SpeechVoice;

    fn initialize(&mut self) -> Result<(), SpeechError>;

    /// Only called between a successful `initialize` and `uninitialize`.
    fn create_voice(&mut self) -> Result<Self::Voice, SpeechError>;

    /// Only called after a successful `initialize`.
    fn uninitialize(&mut self);
}

/// An initialized runtime. Uninitializes on drop.
struct RuntimeSession<'a, R: SpeechRuntime> {
    runtime: &'a mut R,
}

impl<'a, R: SpeechRuntime> RuntimeSession<'a, R> {
    fn open(runtime: &'a mut R) -> Result<Self, SpeechError> {
        runtime.initialize()?;
        debug!("Speech runtime initialized");
        Ok(Self { runtime })
    }

    fn create_voice(&mut self) -> Result<R::Voice, SpeechError> {
        self.runtime.create_voice()
    }
}

impl<R: SpeechRuntime> Drop for RuntimeSession<'_, R> {
    fn drop(&mut self) {
        self.runtime.uninitialize();
        debug!("Speech runtime uninitialized");
    }
}

/// What happened during one announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnounceOutcome {
    Spoken,
    RuntimeUnavailable,
    VoiceUnavailable,
    SpeakFailed,
}

/// Reads announcements aloud through a [`SpeechRuntime`].
pub struct SpeechAnnouncer<R: SpeechRuntime> {
    runtime: R,
    flags: SpeakFlags,
}

impl<R: SpeechRuntime> SpeechAnnouncer<R> {
    pub fn new(runtime: R, flags: SpeakFlags) -> Self {
        Self { runtime, flags }
    }

    /// Speak `announcement`, blocking until the engine is done.
    ///
    /// Failures are logged here and reported through the outcome; they
    /// never panic and never propagate.
    pub fn announce(&mut self, announcement: &Announcement) -> AnnounceOutcome {
        let mut session = match RuntimeSession::open(&mut self.runtime) {
            Ok(session) => session,
            Err(e) => {
                error!("{e}");
                return AnnounceOutcome::RuntimeUnavailable;
            }
        };

        // Declared after the session, so it is released first.
        let mut voice = match session.create_voice() {
            Ok(voice) => voice,
            Err(e) => {
                error!("{e}");
                return AnnounceOutcome::VoiceUnavailable;
            }
        };

        info!("Speaking {} characters", announcement.text().chars().count());
        match voice.speak(announcement.text(), self.flags) {
            Ok(()) => AnnounceOutcome::Spoken,
            Err(e) => {
                warn!("{e}");
                AnnounceOutcome::SpeakFailed
            }
        }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }
}
