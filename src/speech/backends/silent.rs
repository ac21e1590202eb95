//! Text-only backend
//!
//! Used when no speech backend can be initialized or when the user asks for
//! `--silent`. The quiz keeps working; words are simply not heard.

use crate::speech::Synth;
use crate::Result;
use log::debug;

/// Backend that accepts every command and produces no audio
#[derive(Debug, Default)]
pub struct SilentSynth;

impl SilentSynth {
    pub fn new() -> Self {
        Self
    }
}

impl Synth for SilentSynth {
    fn set_rate(&mut self, _rate: u8) -> Result<()> {
        Ok(())
    }

    fn set_volume(&mut self, _volume: u8) -> Result<()> {
        Ok(())
    }

    fn set_voice_idx(&mut self, _idx: usize) -> Result<()> {
        Ok(())
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        debug!("Silent backend skipping: {}", text);
        Ok(())
    }
}
