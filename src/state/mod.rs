//! Application state
//!
//! `AppState` is what outlives a session: the configuration, the speech
//! thread and the command line overrides. Sessions take a snapshot of the
//! settings from it when they start.

pub mod config;

use crate::round::QuizSettings;
use crate::speech::backends::silent::SilentSynth;
use crate::speech::{create_synth, Speaker, SpeechCommand, SpeechService, Synth};
use crate::words::DirectorySource;
use crate::Result;
use config::Config;
use log::{info, warn};
use std::path::PathBuf;

/// Settings given on the command line for this run only
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Force quick mode regardless of the config file
    pub quick_mode: bool,
    /// Read word lists from here instead of the configured directory
    pub word_dir: Option<PathBuf>,
}

pub struct AppState {
    /// Configuration loaded from ~/.spellquiz.cfg
    pub config: Config,

    /// Speech thread shared by the menus and the round engine
    pub speech: SpeechService,

    overrides: Overrides,
}

impl AppState {
    pub fn new(config: Config, speech: SpeechService, overrides: Overrides) -> Self {
        let state = Self {
            config,
            speech,
            overrides,
        };
        state.apply_speech_settings();
        state
    }

    /// Start the speech thread, falling back to text only
    ///
    /// With `silent` set no backend is tried at all.
    pub fn start_speech(config: &Config, silent: bool) -> Result<SpeechService> {
        let wait_limit = config.speech_wait_limit();

        if !silent {
            match SpeechService::spawn(create_synth, wait_limit) {
                Ok(service) => return Ok(service),
                Err(e) => {
                    warn!("Speech unavailable, continuing with text only: {}", e);
                }
            }
        } else {
            info!("Speech disabled on the command line");
        }

        SpeechService::spawn(
            || Ok(Box::new(SilentSynth::new()) as Box<dyn Synth>),
            wait_limit,
        )
    }

    /// Push the configured rate, volume and voice to the speech thread
    pub fn apply_speech_settings(&self) {
        if let Some(rate) = self.config.rate() {
            self.speech.configure(SpeechCommand::SetRate(rate));
            info!("Speech rate set to {}", rate);
        }
        if let Some(volume) = self.config.volume() {
            self.speech.configure(SpeechCommand::SetVolume(volume));
            info!("Speech volume set to {}", volume);
        }
        if let Some(voice_idx) = self.config.voice_idx() {
            self.speech.configure(SpeechCommand::SetVoiceIdx(voice_idx));
            info!("Speech voice index set to {}", voice_idx);
        }
    }

    /// Save configuration to disk
    pub fn save_config(&self) -> Result<()> {
        self.config.save()
    }

    /// Settings for a session starting now
    pub fn quiz_settings(&self) -> QuizSettings {
        let mut settings = self.config.quiz_settings();
        if self.overrides.quick_mode {
            settings.quick_mode = true;
        }
        settings
    }

    /// Where word lists are read from
    pub fn word_source(&self) -> DirectorySource {
        let dir = self
            .overrides
            .word_dir
            .clone()
            .unwrap_or_else(|| self.config.word_dir());
        DirectorySource::new(dir)
    }

    /// Speak menu feedback without waiting for it
    pub fn say(&self, text: &str) {
        drop(self.speech.speak_async(text));
    }
}
