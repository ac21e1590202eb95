//! Native Rust TTS backend using the tts crate
//!
//! The `tts` crate provides a unified interface to:
//! - Speech Dispatcher on Linux
//! - AVFoundation on macOS
//! - WinRT / SAPI on Windows
//!
//! The crate queues utterances asynchronously, so `speak` polls
//! `is_speaking` until the utterance has drained.

use crate::speech::Synth;
use crate::{QuizError, Result};
use log::{debug, error, warn};
use std::thread;
use std::time::{Duration, Instant};
use tts::Tts as TtsCrate;

/// How often `is_speaking` is polled while waiting for an utterance
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Time allowed for the engine to report that it has started speaking
const START_GRACE: Duration = Duration::from_millis(400);

/// Native TTS backend using the tts crate
pub struct NativeSynth {
    /// The tts crate's TTS instance
    tts: TtsCrate,

    /// Cached rate setting (0-100)
    rate: Option<u8>,

    /// Cached volume setting (0-100)
    volume: Option<u8>,

    /// Cached voice index
    voice_idx: Option<usize>,
}

impl NativeSynth {
    /// Create a new native TTS synthesizer
    pub fn new() -> Result<Self> {
        debug!("Creating native TTS backend");

        let tts = TtsCrate::default()
            .map_err(|e| QuizError::Speech(format!("Failed to initialize TTS: {}", e)))?;

        debug!("Native TTS backend created successfully");

        Ok(Self {
            tts,
            rate: None,
            volume: None,
            voice_idx: None,
        })
    }

    /// Map a 0-100 rate onto the engine's own rate range
    fn convert_rate(&self, rate: u8) -> f32 {
        scale_rate(rate, self.tts.min_rate(), self.tts.max_rate())
    }

    /// Convert volume (0-100) to tts crate volume (0.0-1.0)
    fn convert_volume(&self, volume: u8) -> f32 {
        volume as f32 / 100.0
    }

    /// Block until the engine stops speaking or the utterance limit passes
    fn wait_until_done(&self, text: &str) {
        if !self.tts.supported_features().is_speaking {
            debug!("is_speaking not supported, returning without waiting");
            return;
        }

        let limit = utterance_limit(text);
        let started = Instant::now();
        let mut heard = false;

        loop {
            thread::sleep(POLL_INTERVAL);
            let elapsed = started.elapsed();

            match self.tts.is_speaking() {
                Ok(true) => heard = true,
                Ok(false) if heard || elapsed >= START_GRACE => break,
                Ok(false) => {}
                Err(e) => {
                    warn!("Failed to query speaking state: {}", e);
                    break;
                }
            }

            if elapsed >= limit {
                warn!("Utterance exceeded {:?}, no longer waiting", limit);
                break;
            }
        }
    }
}

/// Linear map from 0-100 onto `[min, max]`
fn scale_rate(rate: u8, min: f32, max: f32) -> f32 {
    let rate = rate.min(100) as f32 / 100.0;
    min + (max - min) * rate
}

/// Upper bound on how long a single utterance may take to play
fn utterance_limit(text: &str) -> Duration {
    let chars = text.chars().count() as u64;
    Duration::from_millis((2_000 + chars * 150).min(30_000))
}

impl Synth for NativeSynth {
    fn set_rate(&mut self, rate: u8) -> Result<()> {
        debug!("Setting rate to {}", rate);
        self.rate = Some(rate);

        if !self.tts.supported_features().rate {
            warn!("Rate control not supported on this platform");
            return Ok(());
        }

        let converted_rate = self.convert_rate(rate);
        self.tts
            .set_rate(converted_rate)
            .map_err(|e| QuizError::Speech(format!("Failed to set rate: {}", e)))?;

        Ok(())
    }

    fn set_volume(&mut self, volume: u8) -> Result<()> {
        debug!("Setting volume to {}", volume);
        self.volume = Some(volume);

        if !self.tts.supported_features().volume {
            warn!("Volume control not supported on this platform");
            return Ok(());
        }

        let converted_volume = self.convert_volume(volume);
        self.tts
            .set_volume(converted_volume)
            .map_err(|e| QuizError::Speech(format!("Failed to set volume: {}", e)))?;

        Ok(())
    }

    fn set_voice_idx(&mut self, idx: usize) -> Result<()> {
        debug!("Setting voice index to {}", idx);
        self.voice_idx = Some(idx);

        let voices = self
            .tts
            .voices()
            .map_err(|e| QuizError::Speech(format!("Failed to get voices: {}", e)))?;

        if let Some(voice) = voices.get(idx) {
            debug!("Selecting voice: {:?}", voice);
            self.tts
                .set_voice(voice)
                .map_err(|e| QuizError::Speech(format!("Failed to set voice: {}", e)))?;
        } else {
            warn!(
                "Voice index {} out of range (have {} voices)",
                idx,
                voices.len()
            );
        }

        Ok(())
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        debug!("Speaking: {}", text);
        self.tts.speak(text, false).map_err(|e| {
            error!("Failed to speak: {}", e);
            QuizError::Speech(format!("Speak failed: {}", e))
        })?;

        self.wait_until_done(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_synth() {
        // May fail without speech-dispatcher or in CI without audio
        match NativeSynth::new() {
            Ok(_) => println!("Native TTS backend initialized successfully"),
            Err(e) => println!("TTS initialization failed (may be expected in CI): {}", e),
        }
    }

    #[test]
    fn test_rate_scaling() {
        assert_eq!(scale_rate(0, 0.5, 2.0), 0.5);
        assert_eq!(scale_rate(50, 0.0, 100.0), 50.0);
        assert_eq!(scale_rate(100, 0.5, 2.0), 2.0);
        assert_eq!(scale_rate(200, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_volume_conversion() {
        if let Ok(synth) = NativeSynth::new() {
            assert_eq!(synth.convert_volume(0), 0.0);
            assert_eq!(synth.convert_volume(50), 0.5);
            assert_eq!(synth.convert_volume(100), 1.0);
        }
    }

    #[test]
    fn test_utterance_limit_is_capped() {
        assert_eq!(utterance_limit(""), Duration::from_millis(2_000));
        assert_eq!(utterance_limit("abcd"), Duration::from_millis(2_600));
        assert_eq!(utterance_limit(&"x".repeat(1_000)), Duration::from_secs(30));
    }
}
