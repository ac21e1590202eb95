//! spellquiz - a console spelling quiz
//!
//! Speaks a word aloud, reads the typed answer, and tracks progress through
//! a word pool until every word has been spelled correctly.

pub mod error;
pub mod input;
pub mod menu;
pub mod platform;
pub mod round;
pub mod session;
pub mod speech;
pub mod state;
pub mod terminal;
pub mod words;

pub use error::{QuizError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "spellquiz";
