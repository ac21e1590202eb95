//! Speech synthesizer abstraction
//!
//! Provides a unified interface for text-to-speech across platforms.
//! Every backend speaks synchronously: `speak` returns once the utterance has
//! finished playing, which is what lets the quiz hold input back until the
//! word has been heard.

use crate::platform::Platform;
use crate::{QuizError, Result};
use log::info;

/// Commands sent to a speech backend
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechCommand {
    /// Set speech rate (0-100)
    SetRate(u8),
    /// Set speech volume (0-100)
    SetVolume(u8),
    /// Set voice index (backend-specific)
    SetVoiceIdx(usize),
}

/// Speech synthesizer trait
///
/// All backends implement this to provide text-to-speech.
pub trait Synth {
    /// Send a raw command to the backend
    fn send(&mut self, cmd: SpeechCommand) -> Result<()> {
        match cmd {
            SpeechCommand::SetRate(rate) => self.set_rate(rate),
            SpeechCommand::SetVolume(vol) => self.set_volume(vol),
            SpeechCommand::SetVoiceIdx(idx) => self.set_voice_idx(idx),
        }
    }

    /// Set speech rate (0-100, where 50 is normal)
    fn set_rate(&mut self, rate: u8) -> Result<()>;

    /// Set speech volume (0-100)
    fn set_volume(&mut self, volume: u8) -> Result<()>;

    /// Set voice by index (platform-specific)
    fn set_voice_idx(&mut self, idx: usize) -> Result<()>;

    /// Speak text and block until playback finishes
    fn speak(&mut self, text: &str) -> Result<()>;
}

/// A backend `create_synth` knows how to start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// The `tts` crate (Speech Dispatcher on Linux)
    Native,
    /// espeak-ng over PulseAudio
    PulseAudio,
}

impl Backend {
    fn name(self) -> &'static str {
        match self {
            Backend::Native => "tts (Speech Dispatcher / native)",
            Backend::PulseAudio => "PulseAudio + espeak-ng",
        }
    }

    fn start(self) -> Result<Box<dyn Synth>> {
        use super::backends::native::NativeSynth;
        use super::backends::pulseaudio::PulseAudioSynth;

        let synth: Box<dyn Synth> = match self {
            Backend::Native => Box::new(NativeSynth::new()?),
            Backend::PulseAudio => Box::new(PulseAudioSynth::new()?),
        };
        Ok(synth)
    }
}

/// Backends to try, in order
///
/// **WSL:** PulseAudio + espeak-ng first, then the `tts` crate.
///
/// **Native Linux:** Speech Dispatcher through the `tts` crate first, then
/// PulseAudio + espeak-ng.
///
/// **macOS / Windows:** the `tts` crate's native bindings.
pub fn backend_order(platform: Platform) -> &'static [Backend] {
    match platform {
        Platform::Wsl => &[Backend::PulseAudio, Backend::Native],
        Platform::Linux => &[Backend::Native, Backend::PulseAudio],
        Platform::Other => &[Backend::Native],
    }
}

/// Create a platform-appropriate speech synthesizer
///
/// Returns the first backend that starts, or an error listing every failure.
pub fn create_synth() -> Result<Box<dyn Synth>> {
    let platform = Platform::detect();
    info!("Detected platform: {:?}", platform);

    let mut failures = Vec::new();
    for &backend in backend_order(platform) {
        info!("Trying {} backend...", backend.name());
        match backend.start() {
            Ok(synth) => {
                info!("Initialized {} backend", backend.name());
                return Ok(synth);
            }
            Err(e) => {
                info!("{} backend unavailable: {}", backend.name(), e);
                failures.push(format!("{}: {}", backend.name(), e));
            }
        }
    }

    Err(QuizError::Speech(format!(
        "No speech backend available on {:?}. Tried:\n{}\n\
         Install speech-dispatcher or espeak-ng, or run with --silent.",
        platform,
        failures.join("\n")
    )))
}
