//! Configuration management for medical-note-cue.
//!
//! Loads config from YAML files in standard locations. Every field has a
//! default, so a missing or partial file still yields a usable config.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::speech::{Announcement, SpeakFlags};
use crate::tone::ToneSpec;

pub const DEFAULT_NOTE: &str = "The patient has been complaining of chest pain for the past week. \
ECG shows irregular rhythm. Prescribed low dose beta-blocker. Recommended follow-up in 5 days.";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToneConfig {
    pub enabled: bool,
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency_hz: 18000,
            duration_ms: 3000,
        }
    }
}

impl ToneConfig {
    pub fn spec(&self) -> ToneSpec {
        ToneSpec::new(self.frequency_hz, self.duration_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub enabled: bool,
    pub program: String,
    /// Empty means the engine's default voice.
    pub voice: String,
    /// Words per minute.
    pub rate: u32,
    pub markup: bool,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "espeak-ng".into(),
            voice: String::new(),
            rate: 175,
            markup: false,
        }
    }
}

impl SpeechConfig {
    pub fn flags(&self) -> SpeakFlags {
        SpeakFlags {
            markup: self.markup,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnnouncementConfig {
    pub text: String,
}

impl Default for AnnouncementConfig {
    fn default() -> Self {
        Self {
            text: DEFAULT_NOTE.into(),
        }
    }
}

impl AnnouncementConfig {
    pub fn announcement(&self) -> Announcement {
        Announcement::new(self.text.clone())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tone: ToneConfig,
    pub speech: SpeechConfig,
    pub announcement: AnnouncementConfig,
}

impl Config {
    /// Load configuration from YAML file.
    ///
    /// Searches standard locations if no path is provided:
    /// 1. ./config.yaml
    /// 2. ~/.config/medical-note-cue/config.yaml
    /// 3. /etc/medical-note-cue/config.yaml
    pub fn load(path: Option<&Path>) -> Self {
        let resolved = path.map(PathBuf::from).or_else(|| {
            let candidates = [
                std::env::current_dir().ok().map(|d| d.join("config.yaml")),
                dirs::home_dir().map(|h| h.join(".config/medical-note-cue/config.yaml")),
                Some(PathBuf::from("/etc/medical-note-cue/config.yaml")),
            ];
            candidates.into_iter().flatten().find(|p| p.exists())
        });

        let Some(config_path) = resolved else {
            info!("No config file found, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match Self::from_yaml(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", config_path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}, using defaults", config_path.display());
                Self::default()
            }
        }
    }

    pub fn from_yaml(contents: &str) -> Result<Self, serde_yml::Error> {
        serde_yml::from_str(contents)
    }
}
