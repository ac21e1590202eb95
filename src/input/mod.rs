//! Keyboard input
//!
//! The quiz reads whole lines. `InputChannel` is the seam the round engine
//! and the menus read through, so tests can script the player.

pub mod answer;
pub mod channel;

pub use answer::Answer;
pub use channel::{InputChannel, StdinChannel};
