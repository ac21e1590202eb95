//! Main menu
//!
//! Lists the configured difficulties, starts sessions, and opens the
//! settings menu. Any failure inside a session is reported here and the menu
//! comes back; only quitting, end of input or a double Ctrl+C leave it.

pub mod settings;

pub use settings::{SettingsCommand, SettingsMenu};

use crate::input::InputChannel;
use crate::round::RoundEngine;
use crate::session::{self, SessionEnd};
use crate::state::AppState;
use crate::terminal;
use crate::Result;
use log::{debug, error, info};
use std::io::{self, Write};

/// What a line typed at the main menu asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    /// Start a session with this difficulty id
    Difficulty(String),
    Settings,
    Quit,
    Invalid,
}

impl MenuChoice {
    /// Numbers pick difficulties in menu order; ids and labels work too
    pub fn parse(line: &str, difficulties: &[(String, String)]) -> Self {
        let choice = line.trim().to_lowercase();

        match choice.as_str() {
            "q" | "quit" => return MenuChoice::Quit,
            "s" | "settings" => return MenuChoice::Settings,
            _ => {}
        }

        if let Ok(n) = choice.parse::<usize>() {
            return match n.checked_sub(1).and_then(|i| difficulties.get(i)) {
                Some((id, _)) => MenuChoice::Difficulty(id.clone()),
                None => MenuChoice::Invalid,
            };
        }

        difficulties
            .iter()
            .find(|(id, label)| id.to_lowercase() == choice || label.to_lowercase() == choice)
            .map(|(id, _)| MenuChoice::Difficulty(id.clone()))
            .unwrap_or(MenuChoice::Invalid)
    }
}

/// Print the main menu and the input prompt
pub fn render(out: &mut dyn Write, difficulties: &[(String, String)]) -> Result<()> {
    writeln!(out, "> Choose a difficulty.")?;
    for (i, (_, label)) in difficulties.iter().enumerate() {
        writeln!(out, "> {}: {}", i + 1, label)?;
    }
    writeln!(out, "> s: Settings")?;
    writeln!(out, "> q: Quit")?;
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

/// Run the main menu until the player quits
pub fn run(app: &mut AppState, input: &mut dyn InputChannel) -> Result<()> {
    let mut stdout = io::stdout();

    loop {
        if terminal::take_interrupt() {
            info!("Interrupted at the main menu, quitting");
            break;
        }

        terminal::clear_screen(&mut stdout)?;
        let difficulties = app.config.difficulties();
        render(&mut stdout, &difficulties)?;

        let Some(line) = read_menu_line(input)? else {
            info!("Leaving the main menu");
            break;
        };

        match MenuChoice::parse(&line, &difficulties) {
            MenuChoice::Quit => break,
            MenuChoice::Settings => {
                if let Err(e) = SettingsMenu::run(app, input) {
                    error!("Settings menu failed: {}", e);
                }
            }
            MenuChoice::Difficulty(id) => {
                if let Err(e) = play(app, input, &id) {
                    error!("Session failed: {}", e);
                    writeln!(stdout, "> Session ended: {}", e)?;
                    wait_for_enter(input, &mut stdout)?;
                }
            }
            MenuChoice::Invalid => debug!("Invalid menu choice {:?}", line),
        }
    }

    Ok(())
}

/// Run one session for `difficulty`
fn play(app: &AppState, input: &mut dyn InputChannel, difficulty: &str) -> Result<()> {
    let mut stdout = io::stdout();
    let source = app.word_source();

    let Some(pool) = session::load_pool(&source, difficulty, &mut stdout)? else {
        app.say("Word list not available");
        return wait_for_enter(input, &mut stdout);
    };

    let end = {
        let mut engine = RoundEngine::new(pool, app.quiz_settings(), &app.speech, &mut *input);
        session::play_session(&mut engine, true, terminal::take_interrupt)?
    };

    info!("Session for '{}' ended: {:?}", difficulty, end);
    if end == SessionEnd::Completed {
        wait_for_enter(input, &mut stdout)?;
    }
    Ok(())
}

/// Hold the last screen until the player presses Enter
fn wait_for_enter(input: &mut dyn InputChannel, out: &mut dyn Write) -> Result<()> {
    write!(out, "> Press Enter to return to the menu.")?;
    out.flush()?;
    read_menu_line(input)?;
    Ok(())
}

/// Read one line at a menu prompt
///
/// Returns `None` at end of input, or when Ctrl+C was pressed while waiting;
/// the interrupt is consumed so the next session does not see it.
pub(crate) fn read_menu_line(input: &mut dyn InputChannel) -> Result<Option<String>> {
    let line = input.read_line()?;
    if terminal::take_interrupt() {
        info!("Interrupted at a menu prompt");
        return Ok(None);
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn difficulties() -> Vec<(String, String)> {
        vec![
            ("advanced".to_string(), "Advanced".to_string()),
            ("expert".to_string(), "Expert".to_string()),
        ]
    }

    #[test]
    fn test_numbered_choices() {
        let d = difficulties();
        assert_eq!(MenuChoice::parse("1", &d), MenuChoice::Difficulty("advanced".into()));
        assert_eq!(MenuChoice::parse(" 2 ", &d), MenuChoice::Difficulty("expert".into()));
        assert_eq!(MenuChoice::parse("0", &d), MenuChoice::Invalid);
        assert_eq!(MenuChoice::parse("3", &d), MenuChoice::Invalid);
    }

    #[test]
    fn test_named_choices() {
        let d = difficulties();
        assert_eq!(MenuChoice::parse("Expert", &d), MenuChoice::Difficulty("expert".into()));
        assert_eq!(MenuChoice::parse("s", &d), MenuChoice::Settings);
        assert_eq!(MenuChoice::parse("Q", &d), MenuChoice::Quit);
        assert_eq!(MenuChoice::parse("", &d), MenuChoice::Invalid);
        assert_eq!(MenuChoice::parse("banana", &d), MenuChoice::Invalid);
    }

    struct Lines(Vec<&'static str>);

    impl InputChannel for Lines {
        fn flush_pending(&mut self) -> Result<()> {
            Ok(())
        }

        fn read_line(&mut self) -> Result<Option<String>> {
            Ok(if self.0.is_empty() {
                None
            } else {
                Some(self.0.remove(0).to_string())
            })
        }
    }

    #[test]
    fn test_menu_line_interrupt_is_consumed() {
        let mut input = Lines(vec!["1", "2"]);
        assert_eq!(read_menu_line(&mut input).unwrap(), Some("1".to_string()));

        // Ctrl+C while the prompt was waiting backs out of the menu
        terminal::raise_interrupt();
        assert_eq!(read_menu_line(&mut input).unwrap(), None);
        assert!(!terminal::take_interrupt());

        assert_eq!(read_menu_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_render_lists_difficulties() {
        let mut buf = Vec::new();
        render(&mut buf, &difficulties()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("> 1: Advanced"));
        assert!(text.contains("> 2: Expert"));
        assert!(text.ends_with("> "));
    }
}
