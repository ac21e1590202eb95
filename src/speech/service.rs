//! Speech worker thread
//!
//! The synthesizer is confined to one OS thread and driven through an `mpsc`
//! channel. Each utterance carries a one-shot reply channel; the caller either
//! waits on it (the word prompt) or drops it (spoken feedback). Requests are
//! served in order, so feedback still playing when the next prompt is queued
//! finishes before the prompt starts instead of overlapping it.
//!
//! Every wait is bounded by the service's wait limit. A synth error, a timeout
//! or a dead worker all surface as `QuizError::Speech`, which callers log and
//! otherwise treat as "spoken".

use crate::speech::{SpeechCommand, Synth};
use crate::{QuizError, Result};
use log::{debug, info, warn};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Anything that can say text out loud
pub trait Speaker {
    /// Speak and block until playback completes (or the wait limit expires)
    fn speak(&self, text: &str) -> Result<()> {
        self.speak_async(text).join()
    }

    /// Queue an utterance and return immediately
    fn speak_async(&self, text: &str) -> SpeechHandle;
}

/// Completion handle for a queued utterance
///
/// Dropping the handle leaves the utterance playing.
#[must_use = "drop the handle explicitly for fire-and-forget speech"]
pub struct SpeechHandle {
    state: HandleState,
}

enum HandleState {
    Pending {
        done: mpsc::Receiver<Result<()>>,
        wait_limit: Duration,
    },
    Ready(Result<()>),
}

impl SpeechHandle {
    /// A handle whose outcome is already known
    pub fn ready(result: Result<()>) -> Self {
        Self {
            state: HandleState::Ready(result),
        }
    }

    fn pending(done: mpsc::Receiver<Result<()>>, wait_limit: Duration) -> Self {
        Self {
            state: HandleState::Pending { done, wait_limit },
        }
    }

    /// Block until the utterance has finished playing
    pub fn join(self) -> Result<()> {
        match self.state {
            HandleState::Ready(result) => result,
            HandleState::Pending { done, wait_limit } => match done.recv_timeout(wait_limit) {
                Ok(result) => result,
                Err(RecvTimeoutError::Timeout) => Err(QuizError::Speech(format!(
                    "utterance did not finish within {:?}",
                    wait_limit
                ))),
                Err(RecvTimeoutError::Disconnected) => {
                    Err(QuizError::Speech("speech worker stopped".to_string()))
                }
            },
        }
    }
}

/// A request sent to the speech thread
enum SpeechRequest {
    /// Speak text, reporting completion on `done`
    Speak {
        text: String,
        done: mpsc::Sender<Result<()>>,
    },

    /// Apply a backend setting (rate, volume, voice)
    Command(SpeechCommand),

    /// Stop the thread
    Shutdown,
}

/// Handle to the dedicated speech thread
pub struct SpeechService {
    cmd_tx: mpsc::Sender<SpeechRequest>,
    thread: Option<thread::JoinHandle<()>>,
    wait_limit: Duration,
}

impl SpeechService {
    /// Spawn the speech thread and build the synthesizer on it
    ///
    /// Initialization errors from `factory` are returned to the caller.
    pub fn spawn<F>(factory: F, wait_limit: Duration) -> Result<Self>
    where
        F: FnOnce() -> Result<Box<dyn Synth>> + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel::<SpeechRequest>();
        let (init_tx, init_rx) = mpsc::channel::<Result<()>>();

        let thread = thread::Builder::new()
            .name("spellquiz-speech".into())
            .spawn(move || Self::run(factory, cmd_rx, init_tx))
            .map_err(|e| QuizError::Speech(format!("failed to spawn speech thread: {}", e)))?;

        init_rx
            .recv()
            .map_err(|_| QuizError::Speech("speech thread died during startup".to_string()))??;

        info!("Speech thread started");
        Ok(Self {
            cmd_tx,
            thread: Some(thread),
            wait_limit,
        })
    }

    /// Forward a setting to the backend (fire-and-forget)
    pub fn configure(&self, cmd: SpeechCommand) {
        debug!("Queueing speech command {:?}", cmd);
        if self.cmd_tx.send(SpeechRequest::Command(cmd)).is_err() {
            warn!("Speech thread is gone, command dropped");
        }
    }

    /// Longest time any caller will wait for a single utterance
    pub fn wait_limit(&self) -> Duration {
        self.wait_limit
    }

    /// Body of the speech thread; owns the synthesizer for its whole life
    fn run<F>(
        factory: F,
        cmd_rx: mpsc::Receiver<SpeechRequest>,
        init_tx: mpsc::Sender<Result<()>>,
    ) where
        F: FnOnce() -> Result<Box<dyn Synth>>,
    {
        let mut synth = match factory() {
            Ok(synth) => {
                let _ = init_tx.send(Ok(()));
                synth
            }
            Err(e) => {
                let _ = init_tx.send(Err(e));
                return;
            }
        };

        while let Ok(request) = cmd_rx.recv() {
            match request {
                SpeechRequest::Speak { text, done } => {
                    let result = synth.speak(&text);
                    if let Err(e) = &result {
                        warn!("Speech failed for {:?}: {}", text, e);
                    }
                    // Receiver is gone for fire-and-forget utterances
                    let _ = done.send(result);
                }
                SpeechRequest::Command(cmd) => {
                    if let Err(e) = synth.send(cmd) {
                        warn!("Speech command failed: {}", e);
                    }
                }
                SpeechRequest::Shutdown => break,
            }
        }

        debug!("Speech thread exiting");
    }
}

impl Speaker for SpeechService {
    fn speak_async(&self, text: &str) -> SpeechHandle {
        let (done_tx, done_rx) = mpsc::channel();
        let request = SpeechRequest::Speak {
            text: text.to_string(),
            done: done_tx,
        };

        if self.cmd_tx.send(request).is_err() {
            return SpeechHandle::ready(Err(QuizError::Speech(
                "speech worker stopped".to_string(),
            )));
        }
        SpeechHandle::pending(done_rx, self.wait_limit)
    }
}

impl Drop for SpeechService {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(SpeechRequest::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
        debug!("Speech thread joined");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::backends::silent::SilentSynth;

    #[test]
    fn test_ready_handle_returns_result() {
        assert!(SpeechHandle::ready(Ok(())).join().is_ok());
        assert!(SpeechHandle::ready(Err(QuizError::Speech("x".into())))
            .join()
            .is_err());
    }

    #[test]
    fn test_silent_service_speaks() {
        let service = SpeechService::spawn(
            || Ok(Box::new(SilentSynth::new()) as Box<dyn Synth>),
            Duration::from_secs(1),
        )
        .unwrap();

        assert!(service.speak("hello").is_ok());
        assert!(service.speak_async("again").join().is_ok());
    }

    #[test]
    fn test_factory_error_is_returned() {
        let result = SpeechService::spawn(
            || Err(QuizError::Speech("no audio".into())),
            Duration::from_secs(1),
        );
        assert!(matches!(result, Err(QuizError::Speech(_))));
    }
}
