//! espeak-ng backend.
//!
//! Drives the espeak-ng command line: `--version` to check the engine is
//! installed, `--voices` to resolve the configured voice, then one
//! synchronous process per utterance. Works with classic `espeak` too.

use std::process::{Command, Stdio};

use tracing::debug;

use super::{SpeakFlags, SpeechError, SpeechRuntime, SpeechVoice};
use crate::config::SpeechConfig;

pub struct EspeakRuntime {
    program: String,
    voice: Option<String>,
    rate: u32,
}

impl EspeakRuntime {
    pub fn new(config: &SpeechConfig) -> Self {
        let voice = Some(config.voice.trim())
            .filter(|v| !v.is_empty())
            .map(String::from);

        Self {
            program: config.program.clone(),
            voice,
            rate: config.rate,
        }
    }

    fn list_voices(&self) -> Result<String, String> {
        let output = Command::new(&self.program)
            .arg("--voices")
            .stderr(Stdio::null())
            .output()
            .map_err(|e| format!("Failed to run {} --voices: {e}", self.program))?;

        if !output.status.success() {
            return Err(format!("{} --voices exited with {}", self.program, output.status));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl SpeechRuntime for EspeakRuntime {
    type Voice = EspeakVoice;

    fn initialize(&mut self) -> Result<(), SpeechError> {
        let output = Command::new(&self.program)
            .arg("--version")
            .stderr(Stdio::null())
            .output()
            .map_err(|e| SpeechError::RuntimeInit(format!("{}: {e}", self.program)))?;

        if !output.status.success() {
            return Err(SpeechError::RuntimeInit(format!(
                "{} --version exited with {}",
                self.program, output.status
            )));
        }

        debug!(
            "Speech engine: {}",
            String::from_utf8_lossy(&output.stdout).trim()
        );
        Ok(())
    }

    fn create_voice(&mut self) -> Result<EspeakVoice, SpeechError> {
        if let Some(voice) = &self.voice {
            let listing = self.list_voices().map_err(SpeechError::VoiceCreation)?;
            if !voice_listed(&listing, voice) {
                return Err(SpeechError::VoiceCreation(format!(
                    "voice '{voice}' is not installed"
                )));
            }
        }

        debug!(
            "Voice ready: {}",
            self.voice.as_deref().unwrap_or("engine default")
        );
        Ok(EspeakVoice {
            program: self.program.clone(),
            voice: self.voice.clone(),
            rate: self.rate,
        })
    }

    fn uninitialize(&mut self) {
        // espeak-ng keeps no resident state between invocations.
    }
}

pub struct EspeakVoice {
    program: String,
    voice: Option<String>,
    rate: u32,
}

impl SpeechVoice for EspeakVoice {
    fn speak(&mut self, text: &str, flags: SpeakFlags) -> Result<(), SpeechError> {
        let args = speak_args(self.voice.as_deref(), self.rate, flags, text);
        let status = Command::new(&self.program)
            .args(&args)
            .stdout(Stdio::null())
            .status()
            .map_err(|e| SpeechError::Speak(format!("Failed to spawn {}: {e}", self.program)))?;

        if !status.success() {
            return Err(SpeechError::Speak(format!(
                "{} exited with {status}",
                self.program
            )));
        }
        Ok(())
    }
}

impl Drop for EspeakVoice {
    fn drop(&mut self) {
        debug!("Voice released");
    }
}

/// Command-line arguments for one utterance.
fn speak_args(voice: Option<&str>, rate: u32, flags: SpeakFlags, text: &str) -> Vec<String> {
    let mut args = Vec::with_capacity(7);
    if let Some(voice) = voice {
        args.push("-v".to_string());
        args.push(voice.to_string());
    }
    args.push("-s".to_string());
    args.push(rate.to_string());
    if flags.markup {
        args.push("-m".to_string());
    }
    args.push("--".to_string());
    args.push(text.to_string());
    args
}

/// Whether `voice` appears in `--voices` output, by language, name, file or
/// one of the other languages a voice covers. A `+variant` suffix is ignored.
fn voice_listed(listing: &str, voice: &str) -> bool {
    let base = voice.split('+').next().unwrap_or(voice).trim();
    if base.is_empty() {
        return false;
    }

    listing.lines().skip(1).any(|line| {
        let cols: Vec<&str> = line.split_whitespace().collect();
        // Pty Language Age/Gender VoiceName File [Other Languages]
        let named = [1, 3, 4].iter().filter_map(|&i| cols.get(i)).copied();
        // Other languages look like "(en 2)" or "(en-us 2)(en-gb 5)"
        let others = cols
            .iter()
            .skip(5)
            .flat_map(|col| col.split(['(', ')']))
            .filter(|tok| !tok.is_empty() && !tok.bytes().all(|b| b.is_ascii_digit()));

        named.chain(others).any(|col| col.eq_ignore_ascii_case(base))
    })
}
