//! Round pacing and typing speed

use log::debug;
use std::thread;
use std::time::Duration;

/// Reading pause for a word of `word_length` characters, in seconds
///
/// Sub-linear in the length: `len / (4.5 + len / 10)`.
pub fn smart_delay_seconds(word_length: usize) -> f64 {
    let len = word_length as f64;
    len / (4.5 + len / 10.0)
}

/// `smart_delay_seconds` for a word, as a `Duration`
pub fn smart_delay(word: &str) -> Duration {
    Duration::from_secs_f64(smart_delay_seconds(word.chars().count()))
}

/// Words per minute, counting five characters as one word
///
/// Returns 0 when no time has elapsed.
pub fn typing_speed(chars_typed: usize, elapsed: Duration) -> f64 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes > 0.0 {
        (chars_typed as f64 / 5.0) / minutes
    } else {
        0.0
    }
}

/// Something that can wait between rounds
pub trait Pacer {
    fn pause(&mut self, duration: Duration);
}

/// Sleeps the current thread
#[derive(Debug, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&mut self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        debug!("Pausing for {:?}", duration);
        thread::sleep(duration);
    }
}
