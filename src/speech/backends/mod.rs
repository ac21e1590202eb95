//! Platform-specific speech backends

// Native TTS backend using the tts crate (cross-platform)
pub mod native;

// espeak-ng over PulseAudio, for WSL and as a Linux fallback
pub mod pulseaudio;

// Text-only fallback when no backend can be initialized
pub mod silent;
