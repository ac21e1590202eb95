//! Per-session quiz settings
//!
//! A snapshot of the `[quiz]` configuration taken when a session starts. The
//! engine never sees later changes made in the settings menu.

use std::time::Duration;

/// Carrier phrases used when no list is configured
pub const DEFAULT_CARRIERS: &[&str] = &[
    "Can you spell",
    "The next word is",
    "Alright, spell",
    "Your word is",
    "Spell",
];

/// Phrase spoken when every word has been guessed
pub const DEFAULT_COMPLETION_PHRASE: &str = "Great job!";

/// How normal (non-quick) mode waits after each answer
#[derive(Debug, Clone, PartialEq)]
pub enum NormalPacing {
    /// Fixed pauses per outcome
    Fixed { correct: Duration, incorrect: Duration },
    /// Length-dependent pause for every answer
    Smart,
}

impl Default for NormalPacing {
    fn default() -> Self {
        NormalPacing::Fixed {
            correct: Duration::from_millis(500),
            incorrect: Duration::from_millis(1500),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizSettings {
    /// Bare words, no spoken feedback, reading pause after a miss
    pub quick_mode: bool,
    pub pacing: NormalPacing,
    pub carriers: Vec<String>,
    pub completion_phrase: String,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            quick_mode: false,
            pacing: NormalPacing::default(),
            carriers: DEFAULT_CARRIERS.iter().map(|c| c.to_string()).collect(),
            completion_phrase: DEFAULT_COMPLETION_PHRASE.to_string(),
        }
    }
}
