//! Word entries and word pools
//!
//! A `WordEntry` is one concept to spell with every spelling that counts as
//! correct. A `WordPool` is the immutable list of entries for one difficulty.

pub mod source;

pub use source::{parse_json, parse_text, DirectorySource, WordSource};

use crate::{QuizError, Result};
use log::debug;
use std::collections::HashSet;

/// One word to spell, with its accepted spellings
///
/// The first alias is canonical: it is what gets spoken and revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    aliases: Vec<String>,
}

impl WordEntry {
    /// Build an entry from raw spellings
    ///
    /// Spellings are trimmed and blanks dropped. Returns `None` when nothing
    /// usable is left.
    pub fn new<I, S>(aliases: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let aliases: Vec<String> = aliases
            .into_iter()
            .map(|alias| alias.as_ref().trim().to_string())
            .filter(|alias| !alias.is_empty())
            .collect();

        if aliases.is_empty() {
            None
        } else {
            Some(Self { aliases })
        }
    }

    /// The spelling used for prompts and reveals
    pub fn canonical(&self) -> &str {
        &self.aliases[0]
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Case-insensitive identity of the entry
    pub fn key(&self) -> String {
        normalize(self.canonical())
    }

    /// Does `answer` match any accepted spelling?
    pub fn matches(&self, answer: &str) -> bool {
        let answer = normalize(answer);
        self.aliases.iter().any(|alias| normalize(alias) == answer)
    }
}

/// Trim and lowercase for comparison
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// The immutable list of entries for one session
#[derive(Debug, Clone)]
pub struct WordPool {
    difficulty: String,
    entries: Vec<WordEntry>,
}

impl WordPool {
    /// Build a pool, dropping entries that repeat an earlier canonical spelling
    ///
    /// Fails with `EmptyPool` when no entries are given.
    pub fn new(difficulty: &str, entries: Vec<WordEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(entries.len());

        for entry in entries {
            if seen.insert(entry.key()) {
                unique.push(entry);
            } else {
                debug!("Dropping duplicate word entry {:?}", entry.canonical());
            }
        }

        if unique.is_empty() {
            return Err(QuizError::EmptyPool(difficulty.to_string()));
        }

        Ok(Self {
            difficulty: difficulty.to_string(),
            entries: unique,
        })
    }

    /// Difficulty id the pool was loaded for
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a pool cannot be built empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WordEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(aliases: &[&str]) -> WordEntry {
        WordEntry::new(aliases.iter().copied()).unwrap()
    }

    #[test]
    fn test_entry_rejects_blank_aliases() {
        assert!(WordEntry::new(["", "   "]).is_none());
        let e = entry(&["  color ", "", "colour"]);
        assert_eq!(e.aliases(), &["color".to_string(), "colour".to_string()]);
        assert_eq!(e.canonical(), "color");
    }

    #[test]
    fn test_alias_matching_ignores_case() {
        let e = entry(&["color", "colour"]);
        assert!(e.matches("color"));
        assert!(e.matches("COLOUR"));
        assert!(e.matches("  Colour\t"));
        assert!(!e.matches("colr"));
        assert!(!e.matches(""));
    }

    #[test]
    fn test_pool_deduplicates_case_insensitively() {
        let pool = WordPool::new(
            "test",
            vec![entry(&["Cat"]), entry(&["dog"]), entry(&["cat", "kat"])],
        )
        .unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(0).unwrap().canonical(), "Cat");
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        let err = WordPool::new("expert", Vec::new()).unwrap_err();
        assert!(matches!(err, QuizError::EmptyPool(ref id) if id == "expert"));
    }
}
