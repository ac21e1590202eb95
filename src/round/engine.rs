//! Round state machine
//!
//! ```text
//! AwaitingPick -> Speaking -> AwaitingAnswer -> Evaluating -> AwaitingPick
//!      |                                                        (repeat or scored)
//!      +-> SessionComplete (every word guessed)
//! ```
//!
//! The prompt is spoken synchronously and pending keystrokes are flushed
//! before the answer timer starts, so input typed while the word was still
//! playing never counts. Spoken feedback ("Correct!") is queued without
//! waiting.

use super::pacing::{smart_delay, typing_speed, Pacer, SleepPacer};
use super::selection::{choose_carrier, pick_next};
use super::settings::{NormalPacing, QuizSettings};
use super::{GuessedSet, Phase, RoundReport, RoundState};
use crate::input::{Answer, InputChannel};
use crate::speech::Speaker;
use crate::words::{WordEntry, WordPool};
use crate::Result;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Drives the rounds of one session
pub struct RoundEngine<'a> {
    pool: WordPool,
    guessed: GuessedSet,
    state: RoundState,
    phase: Phase,
    settings: QuizSettings,
    speaker: &'a dyn Speaker,
    input: &'a mut dyn InputChannel,
    pacer: Box<dyn Pacer + 'a>,
    out: Box<dyn Write + 'a>,
    rng: StdRng,
}

impl<'a> RoundEngine<'a> {
    /// Start a session over `pool`
    ///
    /// Pauses sleep the thread, output goes to stdout and the random source
    /// is seeded from the OS; see the `with_*` methods to replace them.
    pub fn new(
        pool: WordPool,
        settings: QuizSettings,
        speaker: &'a dyn Speaker,
        input: &'a mut dyn InputChannel,
    ) -> Self {
        info!(
            "Starting '{}' session with {} words (quick mode: {})",
            pool.difficulty(),
            pool.len(),
            settings.quick_mode
        );

        Self {
            pool,
            guessed: GuessedSet::new(),
            state: RoundState {
                current: None,
                repeat_requested: false,
                quick_mode: settings.quick_mode,
            },
            phase: Phase::AwaitingPick,
            settings,
            speaker,
            input,
            pacer: Box::new(SleepPacer),
            out: Box::new(io::stdout()),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_pacer(mut self, pacer: impl Pacer + 'a) -> Self {
        self.pacer = Box::new(pacer);
        self
    }

    pub fn with_output(mut self, out: impl Write + 'a) -> Self {
        self.out = Box::new(out);
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Where round output is written
    pub fn output(&mut self) -> &mut (dyn Write + 'a) {
        &mut *self.out
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn guessed(&self) -> &GuessedSet {
        &self.guessed
    }

    pub fn pool(&self) -> &WordPool {
        &self.pool
    }

    /// The word currently in play, if one has been picked
    pub fn current_entry(&self) -> Option<&WordEntry> {
        self.state.current.and_then(|index| self.pool.get(index))
    }

    pub fn repeat_requested(&self) -> bool {
        self.state.repeat_requested
    }

    pub fn is_complete(&self) -> bool {
        self.guessed.len() == self.pool.len()
    }

    /// Play one round
    pub fn play_round(&mut self) -> Result<RoundReport> {
        if self.phase == Phase::SessionComplete {
            return Ok(RoundReport::Complete);
        }

        self.phase = Phase::AwaitingPick;
        if self.is_complete() {
            return self.complete_session();
        }

        let (index, replay) = match (self.state.repeat_requested, self.state.current) {
            (true, Some(index)) => (index, true),
            _ => {
                let index = pick_next(&self.pool, &self.guessed, &mut self.rng);
                self.state.current = Some(index);
                (index, false)
            }
        };
        self.state.repeat_requested = false;

        self.phase = Phase::Speaking;
        let phrase = self.prompt_phrase(index, replay);
        if let Err(e) = self.speaker.speak(&phrase) {
            warn!("Prompt was not spoken, continuing as if it was: {}", e);
        }

        self.phase = Phase::AwaitingAnswer;
        if let Err(e) = self.input.flush_pending() {
            debug!("Could not flush pending input: {}", e);
        }
        write!(self.out, "> ")?;
        self.out.flush()?;

        let started = Instant::now();
        let line = self.input.read_line()?;
        let elapsed = started.elapsed();

        let Some(line) = line else {
            info!("Input closed, leaving session");
            return Ok(RoundReport::Aborted);
        };

        self.phase = Phase::Evaluating;
        match Answer::parse(&line) {
            Answer::Repeat => {
                debug!("Repeat requested");
                self.state.repeat_requested = true;
                Ok(RoundReport::Repeat)
            }
            Answer::Menu => {
                info!("Player left the session");
                Ok(RoundReport::Aborted)
            }
            Answer::Attempt(answer) => self.score(index, answer, elapsed),
        }
    }

    /// Build the text spoken for the word at `index`
    fn prompt_phrase(&mut self, index: usize, replay: bool) -> String {
        let word = self.pool.entries()[index].canonical();
        if self.state.quick_mode || replay {
            return word.to_string();
        }

        match choose_carrier(&self.settings.carriers, &mut self.rng) {
            Some(carrier) => format!("{}, {}", carrier, word),
            None => word.to_string(),
        }
    }

    fn score(&mut self, index: usize, answer: String, elapsed: Duration) -> Result<RoundReport> {
        let entry = &self.pool.entries()[index];
        let word = entry.canonical().to_string();
        let correct = entry.matches(&answer);
        let total = self.pool.len();

        if correct {
            self.guessed.insert(index);
            let progress = self.guessed.len();

            if self.state.quick_mode {
                writeln!(self.out, "> Correct! {}/{}", progress, total)?;
                return Ok(RoundReport::Correct {
                    word,
                    typing_speed: None,
                    elapsed,
                });
            }

            let wpm = typing_speed(answer.chars().count(), elapsed);
            writeln!(self.out, "> Correct, the answer was {}! {}/{}", word, progress, total)?;
            writeln!(self.out, "> Your typing speed: {:.2} WPM", wpm)?;
            drop(self.speaker.speak_async("Correct!"));
            self.post_round_pause(&word, true);

            Ok(RoundReport::Correct {
                word,
                typing_speed: Some(wpm),
                elapsed,
            })
        } else {
            writeln!(
                self.out,
                "> Incorrect, the answer was: {} {}/{}",
                word,
                self.guessed.len(),
                total
            )?;

            if self.state.quick_mode {
                // No spoken feedback, so leave time to read the answer
                self.pacer.pause(smart_delay(&word));
            } else {
                drop(self.speaker.speak_async("Incorrect!"));
                self.post_round_pause(&word, false);
            }

            Ok(RoundReport::Incorrect { word, answer })
        }
    }

    fn post_round_pause(&mut self, word: &str, correct: bool) {
        let delay = match &self.settings.pacing {
            NormalPacing::Fixed { correct: d, .. } if correct => *d,
            NormalPacing::Fixed { incorrect: d, .. } => *d,
            NormalPacing::Smart => smart_delay(word),
        };
        self.pacer.pause(delay);
    }

    fn complete_session(&mut self) -> Result<RoundReport> {
        self.phase = Phase::SessionComplete;
        info!("All {} words guessed", self.pool.len());
        writeln!(self.out, "> You guessed all of the words correctly!")?;
        if let Err(e) = self.speaker.speak(&self.settings.completion_phrase) {
            warn!("Completion phrase was not spoken: {}", e);
        }
        Ok(RoundReport::Complete)
    }
}
