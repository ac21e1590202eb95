//! Configuration management

use crate::round::settings::{DEFAULT_CARRIERS, DEFAULT_COMPLETION_PHRASE};
use crate::round::{NormalPacing, QuizSettings};
use crate::{QuizError, Result};
use ini::Ini;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Separator between carrier phrases in the `carriers` key
const CARRIER_SEPARATOR: char = '|';

/// Longest pause allowed after an answer, in seconds
pub const MAX_DELAY_SECS: f32 = 60.0;

/// Used when `[speech] wait_limit` is missing or unusable
const DEFAULT_WAIT_LIMIT: Duration = Duration::from_secs(15);

/// Persistent quiz settings
///
/// Holds the INI document and reads values on demand, so a change made in
/// the settings menu is visible to the next session without reloading.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.spellquiz.cfg unless overridden)
    path: PathBuf,
}

impl Config {
    /// Load configuration from the default path, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from `path`, creating it with defaults if missing
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| QuizError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(&path)
                .map_err(|e| QuizError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self { ini, path })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| QuizError::Config(format!("Failed to save config: {}", e)))
    }

    /// Default config file path (~/.spellquiz.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".spellquiz.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("quiz"))
            .set("quick_mode", "false")
            .set("smart_pacing", "false")
            .set("correct_delay", "0.5")
            .set("incorrect_delay", "1.5")
            .set("carriers", DEFAULT_CARRIERS.join("|"))
            .set("completion_phrase", DEFAULT_COMPLETION_PHRASE);

        ini.with_section(Some("speech")).set("wait_limit", "15");

        ini.with_section(Some("difficulties"))
            .set("advanced", "Advanced")
            .set("expert", "Expert");

        ini
    }

    /// Get a boolean value from config
    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i32) -> i32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Get a float value from config
    pub fn get_float(&self, section: &str, key: &str, default: f32) -> f32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    // Quiz settings

    /// Speak bare words and skip spoken feedback
    pub fn quick_mode(&self) -> bool {
        self.get_bool("quiz", "quick_mode", false)
    }

    /// Use the length-based pause after every answer in normal mode
    pub fn smart_pacing(&self) -> bool {
        self.get_bool("quiz", "smart_pacing", false)
    }

    /// Pause after a correct answer in normal mode, in seconds
    pub fn correct_delay(&self) -> f32 {
        self.delay_value("correct_delay", 0.5)
    }

    /// Pause after an incorrect answer in normal mode, in seconds
    pub fn incorrect_delay(&self) -> f32 {
        self.delay_value("incorrect_delay", 1.5)
    }

    /// Delay from the `[quiz]` section, clamped to `0..=MAX_DELAY_SECS`
    fn delay_value(&self, key: &str, default: f32) -> f32 {
        let secs = self.get_float("quiz", key, default);
        if secs.is_nan() {
            default
        } else {
            secs.clamp(0.0, MAX_DELAY_SECS)
        }
    }

    /// Carrier phrases that introduce each word
    pub fn carriers(&self) -> Vec<String> {
        match self.ini.get_from(Some("quiz"), "carriers") {
            Some(value) => value
                .split(CARRIER_SEPARATOR)
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_CARRIERS.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn completion_phrase(&self) -> String {
        self.get_string("quiz", "completion_phrase", DEFAULT_COMPLETION_PHRASE)
    }

    /// Directory holding the word lists
    pub fn word_dir(&self) -> PathBuf {
        match self.ini.get_from(Some("quiz"), "word_dir") {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir.trim()),
            _ => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".spellquiz")
                .join("words"),
        }
    }

    /// Difficulties in menu order, as (id, label)
    pub fn difficulties(&self) -> Vec<(String, String)> {
        self.ini
            .section(Some("difficulties"))
            .map(|section| {
                section
                    .iter()
                    .map(|(id, label)| (id.to_string(), label.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Snapshot of the quiz settings for a new session
    pub fn quiz_settings(&self) -> QuizSettings {
        let pacing = if self.smart_pacing() {
            NormalPacing::Smart
        } else {
            NormalPacing::Fixed {
                correct: seconds(self.correct_delay()).unwrap_or(Duration::from_millis(500)),
                incorrect: seconds(self.incorrect_delay()).unwrap_or(Duration::from_millis(1500)),
            }
        };

        QuizSettings {
            quick_mode: self.quick_mode(),
            pacing,
            carriers: self.carriers(),
            completion_phrase: self.completion_phrase(),
        }
    }

    // Speech settings

    /// Speech rate (0-100)
    pub fn rate(&self) -> Option<u8> {
        self.get_int("speech", "rate", -1)
            .try_into()
            .ok()
            .filter(|&r| r <= 100)
    }

    /// Speech volume (0-100)
    pub fn volume(&self) -> Option<u8> {
        self.get_int("speech", "volume", -1)
            .try_into()
            .ok()
            .filter(|&v| v <= 100)
    }

    /// Voice index for TTS engine
    pub fn voice_idx(&self) -> Option<usize> {
        self.get_int("speech", "voice_idx", -1).try_into().ok()
    }

    /// Longest wait for one utterance before carrying on without it
    pub fn speech_wait_limit(&self) -> Duration {
        let secs = self.get_float("speech", "wait_limit", 15.0);
        match seconds(secs) {
            Some(limit) if !limit.is_zero() => limit,
            _ => DEFAULT_WAIT_LIMIT,
        }
    }
}

/// `Duration` from float seconds, `None` if negative, NaN or too large
fn seconds(secs: f32) -> Option<Duration> {
    Duration::try_from_secs_f32(secs).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_written_for_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.cfg");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert!(!config.quick_mode());
        assert_eq!(config.correct_delay(), 0.5);
        assert_eq!(config.incorrect_delay(), 1.5);
        assert_eq!(config.carriers().len(), DEFAULT_CARRIERS.len());
    }

    #[test]
    fn test_negative_delay_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::load_from(dir.path().join("quiz.cfg")).unwrap();
        config.set("quiz", "incorrect_delay", "-3");
        assert_eq!(config.incorrect_delay(), 0.0);
    }

    #[test]
    fn test_out_of_range_speech_values_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::load_from(dir.path().join("quiz.cfg")).unwrap();
        assert_eq!(config.rate(), None);
        config.set("speech", "rate", "140");
        assert_eq!(config.rate(), None);
        config.set("speech", "rate", "70");
        assert_eq!(config.rate(), Some(70));
        config.set("speech", "wait_limit", "0");
        assert_eq!(config.speech_wait_limit(), Duration::from_secs(15));
    }

    #[test]
    fn test_oversized_values_do_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::load_from(dir.path().join("quiz.cfg")).unwrap();
        config.set("quiz", "correct_delay", "1e20");
        config.set("quiz", "incorrect_delay", "inf");
        config.set("speech", "wait_limit", "1e20");

        assert_eq!(config.correct_delay(), MAX_DELAY_SECS);
        assert_eq!(config.incorrect_delay(), MAX_DELAY_SECS);
        assert_eq!(config.speech_wait_limit(), Duration::from_secs(15));
        assert_eq!(
            config.quiz_settings().pacing,
            NormalPacing::Fixed {
                correct: Duration::from_secs(60),
                incorrect: Duration::from_secs(60),
            }
        );
    }
}
