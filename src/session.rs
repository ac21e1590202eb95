//! Session driver
//!
//! Loads the pool for a difficulty and plays rounds until the engine reports
//! completion, the player leaves, or Ctrl+C is pressed between rounds.

use crate::round::{RoundEngine, RoundReport};
use crate::terminal::clear_screen;
use crate::words::{WordPool, WordSource};
use crate::Result;
use log::{info, warn};
use std::io::Write;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Every word was spelled correctly
    Completed,
    /// The player left early
    Aborted,
}

/// Load the pool for `difficulty`, or explain why the session cannot start
///
/// Returns `None` after printing the reason; nothing is retried.
pub fn load_pool(
    source: &dyn WordSource,
    difficulty: &str,
    out: &mut dyn Write,
) -> Result<Option<WordPool>> {
    match source.load(difficulty) {
        Ok(pool) => Ok(Some(pool)),
        Err(e) => {
            warn!("Refusing to start session: {}", e);
            writeln!(out, "> {}", e)?;
            writeln!(out, "> Returning to the menu.")?;
            Ok(None)
        }
    }
}

/// Play rounds until the session ends
///
/// `interrupted` is checked before every round; there is no way to stop a
/// round once it has started.
pub fn play_session<F>(
    engine: &mut RoundEngine<'_>,
    clear_between_rounds: bool,
    mut interrupted: F,
) -> Result<SessionEnd>
where
    F: FnMut() -> bool,
{
    loop {
        if interrupted() {
            info!("Session interrupted");
            return Ok(SessionEnd::Aborted);
        }

        if clear_between_rounds {
            clear_screen(engine.output())?;
        }

        let report = engine.play_round()?;
        if report.ends_session() {
            return Ok(match report {
                RoundReport::Complete => SessionEnd::Completed,
                _ => SessionEnd::Aborted,
            });
        }
    }
}
