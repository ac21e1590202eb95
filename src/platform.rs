//! Platform detection utilities

use std::fs;

/// Where the quiz is running, as far as speech is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Linux under WSL, audio through the WSLG PulseAudio server
    Wsl,
    /// Native Linux, usually with Speech Dispatcher
    Linux,
    /// macOS, Windows and anything else the `tts` crate supports
    Other,
}

impl Platform {
    pub fn detect() -> Self {
        if std::env::consts::OS != "linux" {
            Platform::Other
        } else if is_wsl() {
            Platform::Wsl
        } else {
            Platform::Linux
        }
    }
}

/// Detect if running in WSL (Windows Subsystem for Linux)
pub fn is_wsl() -> bool {
    let kernel_says_wsl = fs::read_to_string("/proc/version")
        .map(|contents| {
            let lower = contents.to_lowercase();
            lower.contains("microsoft") || lower.contains("wsl")
        })
        .unwrap_or(false);

    kernel_says_wsl || std::env::var_os("WSL_DISTRO_NAME").is_some()
}
