//! Loading word pools from disk
//!
//! Two formats are read from the word directory, `<id>.json` first and then
//! `<id>.txt`.
//!
//! Text lists hold one entry per line. Lines starting with `--` are comments,
//! blank lines are skipped, a leading `- ` marker is stripped and alternative
//! spellings are separated by `|`:
//!
//! ```text
//! -- colours
//! - color|colour
//! necessary
//! ```
//!
//! JSON lists are an array of strings or arrays of strings:
//!
//! ```json
//! ["necessary", ["color", "colour"]]
//! ```

use super::{WordEntry, WordPool};
use crate::{QuizError, Result};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Where word pools come from
pub trait WordSource {
    /// Load the pool for a difficulty
    ///
    /// Fails with `WordListNotFound` or `EmptyPool`.
    fn load(&self, difficulty: &str) -> Result<WordPool>;
}

/// Word lists stored as files in one directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl WordSource for DirectorySource {
    fn load(&self, difficulty: &str) -> Result<WordPool> {
        let json_path = self.dir.join(format!("{}.json", difficulty));
        let text_path = self.dir.join(format!("{}.txt", difficulty));

        let entries = if json_path.is_file() {
            debug!("Loading word list {:?}", json_path);
            parse_json(&fs::read_to_string(&json_path)?)?
        } else if text_path.is_file() {
            debug!("Loading word list {:?}", text_path);
            parse_text(&fs::read_to_string(&text_path)?)
        } else {
            return Err(QuizError::WordListNotFound(difficulty.to_string()));
        };

        let pool = WordPool::new(difficulty, entries)?;
        info!("Loaded {} words for '{}'", pool.len(), difficulty);
        Ok(pool)
    }
}

/// Parse the line-based text format
pub fn parse_text(contents: &str) -> Vec<WordEntry> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("--"))
        .map(strip_marker)
        .filter_map(|line| WordEntry::new(line.split('|')))
        .collect()
}

/// Strip a leading `- ` list marker, leaving words like `-ology` alone
fn strip_marker(line: &str) -> &str {
    match line.strip_prefix('-') {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => line,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonEntry {
    Single(String),
    Aliases(Vec<String>),
}

/// Parse the JSON format
pub fn parse_json(contents: &str) -> Result<Vec<WordEntry>> {
    let raw: Vec<JsonEntry> = serde_json::from_str(contents)?;

    Ok(raw
        .into_iter()
        .filter_map(|item| match item {
            JsonEntry::Single(word) => WordEntry::new([word]),
            JsonEntry::Aliases(aliases) => WordEntry::new(aliases),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_skips_comments_and_gaps() {
        let entries = parse_text("-- Advanced words\n\n- rhythm\nnecessary\n   \n-- end\n");
        let words: Vec<&str> = entries.iter().map(|e| e.canonical()).collect();
        assert_eq!(words, vec!["rhythm", "necessary"]);
    }

    #[test]
    fn test_parse_text_aliases() {
        let entries = parse_text("color | colour\r\ngrey|gray|\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].aliases(), &["color".to_string(), "colour".to_string()]);
        assert_eq!(entries[1].aliases().len(), 2);
    }

    #[test]
    fn test_parse_text_drops_blank_entries() {
        assert!(parse_text("- \n|\n").is_empty());
    }

    #[test]
    fn test_parse_json_mixed_items() {
        let entries = parse_json(r#"["cat", ["color", "colour"], [], "  "]"#).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].canonical(), "color");
    }

    #[test]
    fn test_parse_json_rejects_garbage() {
        assert!(matches!(
            parse_json("{\"words\": 3}"),
            Err(QuizError::WordList(_))
        ));
    }
}
