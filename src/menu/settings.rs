//! Settings menu
//!
//! Modal menu reached with `s` from the main menu. Each command changes one
//! setting, saves the config file and confirms by speech:
//! - q: toggle quick mode
//! - p: toggle smart pacing
//! - r <0-100>: set speech rate
//! - v <0-100>: set volume
//! - V <n>: set voice index
//! - c <seconds>: pause after a correct answer
//! - i <seconds>: pause after an incorrect answer
//! - Enter: back to the main menu

use crate::input::InputChannel;
use crate::speech::SpeechCommand;
use crate::state::config::{Config, MAX_DELAY_SECS};
use crate::state::AppState;
use crate::terminal;
use crate::Result;
use log::debug;
use std::io::{self, Write};

/// A parsed settings-menu line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsCommand {
    ToggleQuickMode,
    ToggleSmartPacing,
    Rate(String),
    Volume(String),
    Voice(String),
    CorrectDelay(String),
    IncorrectDelay(String),
    Back,
    Unknown,
}

impl SettingsCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (key, arg) = match line.split_once(char::is_whitespace) {
            Some((key, arg)) => (key, arg.trim().to_string()),
            None => (line, String::new()),
        };

        // Case matters: `v` is volume, `V` is voice
        match key {
            "" => SettingsCommand::Back,
            "q" => SettingsCommand::ToggleQuickMode,
            "p" => SettingsCommand::ToggleSmartPacing,
            "r" => SettingsCommand::Rate(arg),
            "v" => SettingsCommand::Volume(arg),
            "V" => SettingsCommand::Voice(arg),
            "c" => SettingsCommand::CorrectDelay(arg),
            "i" => SettingsCommand::IncorrectDelay(arg),
            _ => SettingsCommand::Unknown,
        }
    }
}

/// Result of applying a command to the config
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    /// Spoken and printed confirmation
    pub feedback: String,
    /// Whether the config changed and must be saved
    pub changed: bool,
    /// Setting to forward to the speech thread
    pub speech: Option<SpeechCommand>,
}

impl Applied {
    fn changed(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            changed: true,
            speech: None,
        }
    }

    fn invalid() -> Self {
        Self {
            feedback: "invalid".to_string(),
            changed: false,
            speech: None,
        }
    }
}

pub struct SettingsMenu;

impl SettingsMenu {
    /// Run the menu until a blank line or end of input
    pub fn run(app: &mut AppState, input: &mut dyn InputChannel) -> Result<()> {
        let mut stdout = io::stdout();
        let mut last_feedback: Option<String> = None;

        loop {
            terminal::clear_screen(&mut stdout)?;
            Self::render(&mut stdout, &app.config, last_feedback.as_deref())?;

            let Some(line) = super::read_menu_line(input)? else {
                debug!("Settings: leaving on end of input or Ctrl+C");
                return Ok(());
            };

            let command = SettingsCommand::parse(&line);
            if command == SettingsCommand::Back {
                debug!("Settings: exit");
                return Ok(());
            }

            let applied = Self::apply(&command, &mut app.config);
            if applied.changed {
                app.save_config()?;
            }
            if let Some(cmd) = applied.speech.clone() {
                app.speech.configure(cmd);
            }
            app.say(&applied.feedback);
            last_feedback = Some(applied.feedback);
        }
    }

    /// Apply one command to the config
    pub fn apply(command: &SettingsCommand, config: &mut Config) -> Applied {
        match command {
            SettingsCommand::ToggleQuickMode => {
                debug!("Settings: toggle quick mode");
                let new_value = !config.quick_mode();
                config.set("quiz", "quick_mode", &new_value.to_string());
                Applied::changed(if new_value { "quick mode on" } else { "quick mode off" })
            }

            SettingsCommand::ToggleSmartPacing => {
                debug!("Settings: toggle smart pacing");
                let new_value = !config.smart_pacing();
                config.set("quiz", "smart_pacing", &new_value.to_string());
                Applied::changed(if new_value { "smart pacing on" } else { "smart pacing off" })
            }

            SettingsCommand::Rate(input) => match input.parse::<u8>() {
                Ok(rate) if rate <= 100 => {
                    debug!("Setting rate to {}", rate);
                    config.set("speech", "rate", &rate.to_string());
                    Applied {
                        speech: Some(SpeechCommand::SetRate(rate)),
                        ..Applied::changed("confirmed")
                    }
                }
                _ => {
                    debug!("Invalid rate value: {}", input);
                    Applied::invalid()
                }
            },

            SettingsCommand::Volume(input) => match input.parse::<u8>() {
                Ok(volume) if volume <= 100 => {
                    debug!("Setting volume to {}", volume);
                    config.set("speech", "volume", &volume.to_string());
                    Applied {
                        speech: Some(SpeechCommand::SetVolume(volume)),
                        ..Applied::changed("confirmed")
                    }
                }
                _ => {
                    debug!("Invalid volume value: {}", input);
                    Applied::invalid()
                }
            },

            SettingsCommand::Voice(input) => match input.parse::<usize>() {
                Ok(idx) => {
                    debug!("Setting voice index to {}", idx);
                    config.set("speech", "voice_idx", &idx.to_string());
                    Applied {
                        speech: Some(SpeechCommand::SetVoiceIdx(idx)),
                        ..Applied::changed("confirmed")
                    }
                }
                Err(_) => {
                    debug!("Invalid voice index value: {}", input);
                    Applied::invalid()
                }
            },

            SettingsCommand::CorrectDelay(input) => {
                Self::set_delay(config, "correct_delay", input)
            }
            SettingsCommand::IncorrectDelay(input) => {
                Self::set_delay(config, "incorrect_delay", input)
            }

            SettingsCommand::Back | SettingsCommand::Unknown => {
                debug!("Settings: unknown command");
                Applied::invalid()
            }
        }
    }

    fn set_delay(config: &mut Config, key: &str, input: &str) -> Applied {
        match input.parse::<f32>() {
            Ok(secs) if (0.0..=MAX_DELAY_SECS).contains(&secs) => {
                debug!("Setting {} to {} seconds", key, secs);
                config.set("quiz", key, &secs.to_string());
                Applied::changed("confirmed")
            }
            _ => {
                debug!("Invalid {} value: {}", key, input);
                Applied::invalid()
            }
        }
    }

    fn render(out: &mut dyn Write, config: &Config, feedback: Option<&str>) -> Result<()> {
        let on_off = |v: bool| if v { "on" } else { "off" };
        let or_default = |v: Option<String>| v.unwrap_or_else(|| "default".to_string());

        writeln!(out, "> Settings")?;
        writeln!(out, "> q: Quick mode ({})", on_off(config.quick_mode()))?;
        writeln!(out, "> p: Smart pacing ({})", on_off(config.smart_pacing()))?;
        let rate = or_default(config.rate().map(|r| r.to_string()));
        let volume = or_default(config.volume().map(|v| v.to_string()));
        let voice = or_default(config.voice_idx().map(|v| v.to_string()));

        writeln!(out, "> r <0-100>: Speech rate ({})", rate)?;
        writeln!(out, "> v <0-100>: Volume ({})", volume)?;
        writeln!(out, "> V <n>: Voice ({})", voice)?;
        writeln!(out, "> c <seconds>: Pause after correct ({}s)", config.correct_delay())?;
        writeln!(out, "> i <seconds>: Pause after incorrect ({}s)", config.incorrect_delay())?;
        writeln!(out, "> Enter: Back")?;
        if let Some(feedback) = feedback {
            writeln!(out, "> {}", feedback)?;
        }
        write!(out, "> ")?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path().join("quiz.cfg")).unwrap();
        (dir, config)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(SettingsCommand::parse(""), SettingsCommand::Back);
        assert_eq!(SettingsCommand::parse("q"), SettingsCommand::ToggleQuickMode);
        assert_eq!(SettingsCommand::parse("r 60"), SettingsCommand::Rate("60".into()));
        assert_eq!(SettingsCommand::parse("v  40 "), SettingsCommand::Volume("40".into()));
        assert_eq!(SettingsCommand::parse("V 2"), SettingsCommand::Voice("2".into()));
        assert_eq!(SettingsCommand::parse("x"), SettingsCommand::Unknown);
    }

    #[test]
    fn test_toggle_quick_mode() {
        let (_dir, mut config) = config();
        let applied = SettingsMenu::apply(&SettingsCommand::ToggleQuickMode, &mut config);
        assert_eq!(applied.feedback, "quick mode on");
        assert!(applied.changed);
        assert!(config.quick_mode());

        let applied = SettingsMenu::apply(&SettingsCommand::ToggleQuickMode, &mut config);
        assert_eq!(applied.feedback, "quick mode off");
        assert!(!config.quick_mode());
    }

    #[test]
    fn test_rate_forwarded_to_speech() {
        let (_dir, mut config) = config();
        let applied = SettingsMenu::apply(&SettingsCommand::Rate("70".into()), &mut config);
        assert!(matches!(applied.speech, Some(SpeechCommand::SetRate(70))));
        assert_eq!(config.rate(), Some(70));
    }

    #[test]
    fn test_invalid_values_change_nothing() {
        let (_dir, mut config) = config();
        for command in [
            SettingsCommand::Rate("101".into()),
            SettingsCommand::Volume("loud".into()),
            SettingsCommand::CorrectDelay("-1".into()),
            SettingsCommand::IncorrectDelay("inf".into()),
        ] {
            let applied = SettingsMenu::apply(&command, &mut config);
            assert_eq!(applied.feedback, "invalid");
            assert!(!applied.changed);
        }
        assert_eq!(config.rate(), None);
        assert_eq!(config.correct_delay(), 0.5);
        assert_eq!(config.incorrect_delay(), 1.5);
    }

    #[test]
    fn test_huge_delay_rejected_and_session_still_starts() {
        let (_dir, mut config) = config();
        let command = SettingsCommand::CorrectDelay("1e20".into());
        let applied = SettingsMenu::apply(&command, &mut config);
        assert_eq!(applied.feedback, "invalid");

        // A hand-edited value is clamped instead
        config.set("quiz", "incorrect_delay", "1e20");
        let settings = config.quiz_settings();
        assert_eq!(
            settings.pacing,
            crate::round::NormalPacing::Fixed {
                correct: std::time::Duration::from_millis(500),
                incorrect: std::time::Duration::from_secs(60),
            }
        );
        assert_eq!(config.correct_delay(), 0.5);
    }

    #[test]
    fn test_delay_change_reaches_quiz_settings() {
        let (_dir, mut config) = config();
        SettingsMenu::apply(&SettingsCommand::IncorrectDelay("2.5".into()), &mut config);
        let settings = config.quiz_settings();
        assert_eq!(
            settings.pacing,
            crate::round::NormalPacing::Fixed {
                correct: std::time::Duration::from_millis(500),
                incorrect: std::time::Duration::from_millis(2500),
            }
        );
    }
}
