//! Classifying a typed answer

/// What a line typed during a round means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Say the current word again
    Repeat,
    /// Leave the session and go back to the menu
    Menu,
    /// A spelling attempt, trimmed
    Attempt(String),
}

impl Answer {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "repeat" | "r" => Answer::Repeat,
            ":menu" | ":q" => Answer::Menu,
            _ => Answer::Attempt(trimmed.to_string()),
        }
    }
}
