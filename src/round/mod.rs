//! The round engine
//!
//! One round is: pick a word, speak it, read the answer, judge it, pause. The
//! engine tracks which words have been guessed and signals when the pool is
//! exhausted.

pub mod engine;
pub mod pacing;
pub mod selection;
pub mod settings;

pub use engine::RoundEngine;
pub use pacing::{smart_delay, smart_delay_seconds, typing_speed, Pacer, SleepPacer};
pub use selection::{choose_carrier, pick_next};
pub use settings::{NormalPacing, QuizSettings};

use std::collections::BTreeSet;
use std::time::Duration;

/// Indices of pool entries answered correctly this session
///
/// Only ever grows; a new session starts with a new set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessedSet {
    indices: BTreeSet<usize>,
}

impl GuessedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the index was not already present
    pub fn insert(&mut self, index: usize) -> bool {
        self.indices.insert(index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Where the engine is within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingPick,
    Speaking,
    AwaitingAnswer,
    Evaluating,
    SessionComplete,
}

/// Transient per-round data
#[derive(Debug, Clone, Default)]
pub struct RoundState {
    /// Pool index of the word in play
    pub current: Option<usize>,
    /// Speak the current word again instead of picking a new one
    pub repeat_requested: bool,
    pub quick_mode: bool,
}

/// What happened in one call to `RoundEngine::play_round`
#[derive(Debug, Clone, PartialEq)]
pub enum RoundReport {
    /// The player asked to hear the word again
    Repeat,
    Correct {
        word: String,
        /// Words per minute; only measured outside quick mode
        typing_speed: Option<f64>,
        elapsed: Duration,
    },
    Incorrect {
        word: String,
        answer: String,
    },
    /// Every word has been guessed
    Complete,
    /// The player left the session or input ran out
    Aborted,
}

impl RoundReport {
    /// Does this report end the session?
    pub fn ends_session(&self) -> bool {
        matches!(self, RoundReport::Complete | RoundReport::Aborted)
    }
}
