//! Keyword source files and trie exports.
//!
//! A keyword source holds one entry per line, either `word` or
//! `word,frequency`; a missing frequency counts as 1 and blank lines are
//! ignored. Lines with an empty word, a word containing the wildcard marker
//! or whitespace, or a frequency that is not a non-negative integer are
//! skipped and reported, never fatal.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use super::files::{read_source, write_lines};
use crate::data_structures::FrequencyTrie;
use crate::error::source::SourceResult;
use crate::error::NewsprintResult;

/// Why a keyword line was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// Nothing before the comma
    EmptyWord,
    /// The word contains the wildcard marker or whitespace
    InvalidCharacter(char),
    /// The frequency is a negative number
    NegativeFrequency(String),
    /// The frequency is not a number at all
    InvalidFrequency(String),
    /// The trie refused the word
    Rejected(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWord => write!(f, "empty word"),
            Self::InvalidCharacter(c) => write!(f, "invalid character {c:?} in word"),
            Self::NegativeFrequency(raw) => write!(f, "negative frequency '{raw}'"),
            Self::InvalidFrequency(raw) => write!(f, "invalid frequency '{raw}'"),
            Self::Rejected(reason) => write!(f, "{reason}"),
        }
    }
}

/// A keyword line that was not loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number
    pub line_number: usize,
    /// The line as read
    pub content: String,
    /// Why it was skipped
    pub reason: SkipReason,
}

/// A parsed keyword line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordEntry {
    /// 1-based line number
    pub line_number: usize,
    /// The word as written
    pub word: String,
    /// Its frequency, 1 when omitted
    pub frequency: u64,
}

/// Outcome of parsing a keyword source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordParse {
    /// Accepted entries in file order
    pub entries: Vec<KeywordEntry>,
    /// Lines that were skipped
    pub skipped: Vec<SkippedLine>,
}

/// Summary of a keyword load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Entries inserted
    pub loaded: usize,
    /// Lines that were skipped
    pub skipped: Vec<SkippedLine>,
    /// Loaded lines an export would not reproduce as written: the word was
    /// case-folded, or it repeats an earlier word and was merged into it
    pub rewritten: Vec<usize>,
}

impl LoadReport {
    /// Line numbers of the source that writing the trie back would drop or alter.
    pub fn lossy_lines(&self) -> Vec<usize> {
        let mut lines: Vec<usize> = self
            .skipped
            .iter()
            .map(|line| line.line_number)
            .chain(self.rewritten.iter().copied())
            .collect();
        lines.sort_unstable();
        lines
    }
}

fn parse_line(line: &str, wildcard: char) -> Result<(&str, u64), SkipReason> {
    let (word, frequency) = match line.split_once(',') {
        Some((word, raw)) => {
            let raw = raw.trim();
            let frequency = match raw.parse::<u64>() {
                Ok(frequency) => frequency,
                Err(_) if raw.parse::<i64>().is_ok_and(|n| n < 0) => {
                    return Err(SkipReason::NegativeFrequency(raw.to_string()))
                }
                Err(_) => return Err(SkipReason::InvalidFrequency(raw.to_string())),
            };
            (word.trim(), frequency)
        }
        None => (line, 1),
    };

    if word.is_empty() {
        return Err(SkipReason::EmptyWord);
    }
    if let Some(c) = word
        .chars()
        .find(|&c| c == wildcard || c.is_whitespace())
    {
        return Err(SkipReason::InvalidCharacter(c));
    }

    Ok((word, frequency))
}

/// Parses keyword source text; `wildcard` is the marker no word may contain.
pub fn parse_keywords(text: &str, wildcard: char) -> KeywordParse {
    let mut parse = KeywordParse::default();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line, wildcard) {
            Ok((word, frequency)) => parse.entries.push(KeywordEntry {
                line_number: index + 1,
                word: word.to_string(),
                frequency,
            }),
            Err(reason) => {
                warn!(line_number = index + 1, content = line, %reason, "Skipping keyword line");
                parse.skipped.push(SkippedLine {
                    line_number: index + 1,
                    content: line.to_string(),
                    reason,
                });
            }
        }
    }

    parse
}

/// Replaces the contents of `trie` with the keywords in `path`.
///
/// Entries the trie rejects (e.g. longer than its maximum depth) are skipped
/// like malformed lines. The trie is only replaced once the file has been
/// read completely; a missing file leaves it untouched.
pub fn load_keywords_file(trie: &mut FrequencyTrie, path: &Path) -> NewsprintResult<LoadReport> {
    let text = read_source(path)?;
    let KeywordParse { entries, mut skipped } = parse_keywords(&text, trie.config().wildcard);

    let mut fresh = FrequencyTrie::with_config(trie.config().clone());
    let mut loaded = 0;
    let mut rewritten = Vec::new();
    let mut seen = HashSet::new();
    for entry in entries {
        match fresh.insert(&entry.word, entry.frequency) {
            Ok(()) => {
                loaded += 1;
                let stored = fresh.normalized(&entry.word);
                if stored != entry.word || !seen.insert(stored) {
                    rewritten.push(entry.line_number);
                }
            }
            Err(e) => {
                warn!(line_number = entry.line_number, error = %e, "Skipping keyword");
                skipped.push(SkippedLine {
                    line_number: entry.line_number,
                    content: format!("{},{}", entry.word, entry.frequency),
                    reason: SkipReason::Rejected(e.to_string()),
                });
            }
        }
    }
    skipped.sort_by_key(|line| line.line_number);

    *trie = fresh;
    info!(
        path = %path.display(),
        loaded,
        skipped = skipped.len(),
        rewritten = rewritten.len(),
        "Keywords loaded"
    );

    Ok(LoadReport {
        loaded,
        skipped,
        rewritten,
    })
}

/// Formats every stored word as `word,frequency` lines.
pub fn keyword_lines(trie: &FrequencyTrie) -> Vec<String> {
    trie.to_list()
        .into_iter()
        .map(|(word, frequency)| format!("{word},{frequency}"))
        .collect()
}

/// Writes every stored word to `path` in keyword source format.
pub fn write_keywords_file(trie: &FrequencyTrie, path: &Path) -> SourceResult<usize> {
    let lines = keyword_lines(trie);
    write_lines(path, &lines)?;
    info!(path = %path.display(), words = lines.len(), "Keywords written");
    Ok(lines.len())
}

/// Writes the rendered tree to `path`, followed by the number of stored words.
pub fn write_tree_file(trie: &FrequencyTrie, path: &Path) -> SourceResult<()> {
    let mut lines = trie.render();
    lines.push(String::new());
    lines.push(format!("Total words: {}", trie.len()));
    write_lines(path, &lines)?;
    info!(path = %path.display(), "Trie written");
    Ok(())
}
