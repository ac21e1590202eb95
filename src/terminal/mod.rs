//! Terminal helpers: screen clearing and Ctrl+C handling
//!
//! The first SIGINT asks the running session to return to the menu once the
//! current round is over. A second SIGINT before that happens exits at once.

use crate::Result;
use log::debug;
use nix::libc;
use nix::sys::signal::{self, SigHandler, Signal};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// Set by the SIGINT handler, cleared by `take_interrupt`
static INTERRUPT_PENDING: AtomicBool = AtomicBool::new(false);

/// SIGINT handler - flags the session, or exits on a repeated press
extern "C" fn handle_sigint(_: libc::c_int) {
    if INTERRUPT_PENDING.swap(true, Ordering::SeqCst) {
        // Only async-signal-safe calls are allowed here
        unsafe { libc::_exit(130) };
    }
}

/// Install the SIGINT handler
pub fn install_interrupt_handler() -> Result<()> {
    unsafe {
        signal::signal(Signal::SIGINT, SigHandler::Handler(handle_sigint)).map_err(|e| {
            io::Error::new(
                io::ErrorKind::Other,
                format!("Failed to set SIGINT handler: {}", e),
            )
        })?;
    }
    debug!("SIGINT handler installed");
    Ok(())
}

/// Consume a pending interrupt, returning whether there was one
pub fn take_interrupt() -> bool {
    INTERRUPT_PENDING.swap(false, Ordering::SeqCst)
}

/// Flag an interrupt as the SIGINT handler would
#[cfg(test)]
pub(crate) fn raise_interrupt() {
    INTERRUPT_PENDING.store(true, Ordering::SeqCst);
}

/// Clear the screen and home the cursor
pub fn clear_screen(out: &mut dyn Write) -> Result<()> {
    write!(out, "\x1B[2J\x1B[1;1H")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_screen_sequence() {
        let mut buf = Vec::new();
        clear_screen(&mut buf).unwrap();
        assert_eq!(buf, b"\x1B[2J\x1B[1;1H");
    }
}
