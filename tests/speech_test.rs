//! Integration tests for speech synthesis
//!
//! The platform backend may be missing in CI or headless environments, so
//! those tests only check that failures are reported rather than panicking.
//! The speech thread itself is tested with recording and failing backends.

use spellquiz::speech::synth::create_synth;
use spellquiz::speech::{Speaker, SpeechCommand, SpeechService, Synth};
use spellquiz::{QuizError, Result};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_create_native_synth() {
    match create_synth() {
        Ok(synth) => {
            println!("✓ Successfully created TTS backend");
            drop(synth);
        }
        Err(e) => {
            println!("⚠ TTS creation failed (may be expected): {}", e);
        }
    }
}

#[test]
fn test_speech_configuration() {
    if let Ok(mut synth) = create_synth() {
        for rate in [0, 50, 100] {
            assert!(synth.set_rate(rate).is_ok(), "Should set rate to {}", rate);
        }
        for volume in [0, 50, 100] {
            assert!(synth.set_volume(volume).is_ok(), "Should set volume to {}", volume);
        }

        // Voice selection may not work on all platforms
        let voice_result = synth.set_voice_idx(0);
        println!("Voice index setting result: {:?}", voice_result);
    } else {
        println!("⚠ Skipping configuration tests (TTS not available)");
    }
}

/// Records what it is asked to do, optionally taking time to "speak"
struct RecordingSynth {
    log: Arc<Mutex<Vec<String>>>,
    speak_time: Duration,
}

impl Synth for RecordingSynth {
    fn set_rate(&mut self, rate: u8) -> Result<()> {
        self.log.lock().unwrap().push(format!("rate {}", rate));
        Ok(())
    }

    fn set_volume(&mut self, volume: u8) -> Result<()> {
        self.log.lock().unwrap().push(format!("volume {}", volume));
        Ok(())
    }

    fn set_voice_idx(&mut self, idx: usize) -> Result<()> {
        self.log.lock().unwrap().push(format!("voice {}", idx));
        Ok(())
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        thread::sleep(self.speak_time);
        self.log.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

struct BrokenSynth;

impl Synth for BrokenSynth {
    fn set_rate(&mut self, _rate: u8) -> Result<()> {
        Err(QuizError::Speech("no device".into()))
    }

    fn set_volume(&mut self, _volume: u8) -> Result<()> {
        Err(QuizError::Speech("no device".into()))
    }

    fn set_voice_idx(&mut self, _idx: usize) -> Result<()> {
        Err(QuizError::Speech("no device".into()))
    }

    fn speak(&mut self, _text: &str) -> Result<()> {
        Err(QuizError::Speech("no device".into()))
    }
}

fn recording_service(
    speak_time: Duration,
    wait_limit: Duration,
) -> (SpeechService, Arc<Mutex<Vec<String>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let thread_log = Arc::clone(&log);
    let service = SpeechService::spawn(
        move || {
            Ok(Box::new(RecordingSynth {
                log: thread_log,
                speak_time,
            }) as Box<dyn Synth>)
        },
        wait_limit,
    )
    .unwrap();
    (service, log)
}

#[test]
fn test_requests_are_served_in_order() {
    let (service, log) = recording_service(Duration::from_millis(20), Duration::from_secs(5));

    drop(service.speak_async("Correct!"));
    service.configure(SpeechCommand::SetRate(30));
    assert!(service.speak("Spell, rhythm").is_ok());

    assert_eq!(*log.lock().unwrap(), vec!["Correct!", "rate 30", "Spell, rhythm"]);
}

#[test]
fn test_wait_is_bounded() {
    let (service, _log) = recording_service(Duration::from_millis(500), Duration::from_millis(50));

    let started = Instant::now();
    let result = service.speak("a very long sentence");
    assert!(matches!(result, Err(QuizError::Speech(_))));
    assert!(started.elapsed() < Duration::from_millis(450));
}

#[test]
fn test_backend_errors_are_returned_not_fatal() {
    let service =
        SpeechService::spawn(|| Ok(Box::new(BrokenSynth) as Box<dyn Synth>), Duration::from_secs(1))
            .unwrap();

    service.configure(SpeechCommand::SetVolume(10));
    assert!(matches!(service.speak("hello"), Err(QuizError::Speech(_))));
    // The thread survives a failure
    assert!(service.speak("again").is_err());
    assert_eq!(service.wait_limit(), Duration::from_secs(1));
}
