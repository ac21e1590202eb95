//! PulseAudio backend using espeak-ng
//!
//! Designed for WSL with WSLG support, where PulseAudio is available through
//! /mnt/wslg/PulseServer, and used as the fallback on native Linux when
//! Speech Dispatcher is missing.
//!
//! Dependencies:
//! - espeak-ng (install with: sudo apt install espeak-ng)
//! - PulseAudio client libraries (usually pre-installed with WSLG)

use crate::platform::is_wsl;
use crate::speech::Synth;
use crate::{QuizError, Result};
use log::{debug, error, info, warn};
use std::process::{Command, Stdio};

/// PulseAudio backend using espeak-ng
///
/// Each utterance runs one espeak-ng process to completion, so `speak`
/// returns exactly when the audio has finished.
pub struct PulseAudioSynth {
    /// Cached rate setting (0-100)
    rate: u8,

    /// Cached volume setting (0-100)
    volume: u8,

    /// Voice name for espeak-ng
    voice: String,

    /// Path to espeak-ng
    espeak_path: String,
}

impl PulseAudioSynth {
    /// Auto-detect the WSLG PulseAudio server and set PULSE_SERVER if needed
    fn setup_pulseaudio() -> Result<()> {
        const WSLG_PULSE_PATH: &str = "/mnt/wslg/PulseServer";

        if std::env::var("PULSE_SERVER").is_ok() {
            debug!("PULSE_SERVER already set via environment");
            return Ok(());
        }

        if std::path::Path::new(WSLG_PULSE_PATH).exists() {
            info!("Auto-detected WSLG PulseAudio server at {}", WSLG_PULSE_PATH);
            std::env::set_var("PULSE_SERVER", WSLG_PULSE_PATH);
            return Ok(());
        }

        if is_wsl() {
            warn!("WSLG PulseAudio server not found at {}", WSLG_PULSE_PATH);
            warn!("Make sure WSLg is installed and running, or set PULSE_SERVER");
            return Err(QuizError::Speech(
                "PulseAudio server not found. Install WSLg or set PULSE_SERVER.".to_string(),
            ));
        }

        // Native Linux: let espeak-ng use the default socket
        debug!("Running on native Linux - PulseAudio will use default configuration");
        Ok(())
    }

    /// Create a new PulseAudio synthesizer
    pub fn new() -> Result<Self> {
        debug!("Creating PulseAudio backend");

        Self::setup_pulseaudio()?;

        let espeak_path = Self::find_espeak()?;
        debug!("Found espeak-ng at: {}", espeak_path);

        Ok(Self {
            rate: 50,
            volume: 80,
            voice: "en".to_string(),
            espeak_path,
        })
    }

    /// Find espeak-ng executable
    fn find_espeak() -> Result<String> {
        for path in ["espeak-ng", "/usr/bin/espeak-ng"] {
            if let Ok(status) = Command::new(path)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
            {
                if status.success() {
                    return Ok(path.to_string());
                }
            }
        }

        Err(QuizError::Speech(
            "espeak-ng not found. Install with: sudo apt install espeak-ng".to_string(),
        ))
    }

    /// Convert rate (0-100) to espeak speed (80-450 wpm)
    fn rate_to_espeak_speed(rate: u8) -> u16 {
        80 + ((rate.min(100) as u16) * 370 / 100)
    }

    /// Convert volume (0-100) to espeak amplitude (0-200)
    fn volume_to_espeak_amplitude(volume: u8) -> u8 {
        ((volume.min(100) as u16 * 200) / 100) as u8
    }

    /// Get voice name by index
    fn get_voice_by_idx(idx: usize) -> &'static str {
        const VOICES: &[&str] = &[
            "en",    // 0: Default English
            "en-us", // 1: US English
            "en-gb", // 2: British English
            "en-sc", // 3: Scottish English
        ];

        VOICES.get(idx).copied().unwrap_or("en")
    }
}

impl Synth for PulseAudioSynth {
    fn set_rate(&mut self, rate: u8) -> Result<()> {
        debug!("Setting rate to {}", rate);
        self.rate = rate;
        Ok(())
    }

    fn set_volume(&mut self, volume: u8) -> Result<()> {
        debug!("Setting volume to {}", volume);
        self.volume = volume;
        Ok(())
    }

    fn set_voice_idx(&mut self, idx: usize) -> Result<()> {
        let voice = Self::get_voice_by_idx(idx);
        debug!("Setting voice to {} (index {})", voice, idx);
        self.voice = voice.to_string();
        Ok(())
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        debug!("Speaking: {}", text);

        let status = Command::new(&self.espeak_path)
            .arg("-v")
            .arg(&self.voice)
            .arg("-s")
            .arg(Self::rate_to_espeak_speed(self.rate).to_string())
            .arg("-a")
            .arg(Self::volume_to_espeak_amplitude(self.volume).to_string())
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| {
                error!("Failed to run espeak-ng: {}", e);
                QuizError::Speech(format!("Failed to start espeak-ng: {}", e))
            })?;

        if !status.success() {
            return Err(QuizError::Speech(format!("espeak-ng exited with {}", status)));
        }
        Ok(())
    }
}
