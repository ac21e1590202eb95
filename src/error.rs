//! Error types for spellquiz

use std::io;
use thiserror::Error;

/// Main error type for spellquiz
#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("No word list found for difficulty '{0}'")]
    WordListNotFound(String),

    #[error("Word list for difficulty '{0}' has no usable entries")]
    EmptyPool(String),

    #[error("Word list error: {0}")]
    WordList(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for spellquiz operations
pub type Result<T> = std::result::Result<T, QuizError>;

impl From<String> for QuizError {
    fn from(s: String) -> Self {
        QuizError::Other(s)
    }
}

impl From<&str> for QuizError {
    fn from(s: &str) -> Self {
        QuizError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(e: serde_json::Error) -> Self {
        QuizError::WordList(format!("JSON error: {}", e))
    }
}
