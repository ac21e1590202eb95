//! Line input from the terminal

use crate::Result;
use log::debug;
use nix::sys::termios::{tcflush, FlushArg};
use std::io::{self, BufRead, IsTerminal, Stdin};
use std::os::fd::AsFd;

/// Source of typed lines
pub trait InputChannel {
    /// Discard anything typed before the caller started listening
    fn flush_pending(&mut self) -> Result<()>;

    /// Block for one line, without its line ending
    ///
    /// Returns `None` once input is exhausted.
    fn read_line(&mut self) -> Result<Option<String>>;
}

/// Reads lines from stdin
pub struct StdinChannel {
    stdin: Stdin,
}

impl StdinChannel {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl Default for StdinChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl InputChannel for StdinChannel {
    fn flush_pending(&mut self) -> Result<()> {
        // Pipes and files have nothing typed ahead to throw away
        if !self.stdin.is_terminal() {
            return Ok(());
        }

        tcflush(self.stdin.as_fd(), FlushArg::TCIFLUSH)
            .map_err(|e| io::Error::from_raw_os_error(e as i32))?;
        debug!("Flushed pending terminal input");
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let n = self.stdin.lock().read_line(&mut line)?;
        if n == 0 {
            debug!("End of input");
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
