//! Speech synthesis system

pub mod backends;
pub mod service;
pub mod synth;

pub use service::{Speaker, SpeechHandle, SpeechService};
pub use synth::{create_synth, SpeechCommand, Synth};
