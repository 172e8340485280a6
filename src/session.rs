//! The command surface hosts drive the trie through.
//!
//! A `Session` is the single owner of the trie for one run. Every command
//! returns its user-facing output, or an error the host reports before
//! carrying on with the next command.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::NewsprintConfig;
use crate::data_structures::{FrequencyTrie, WordFrequency};
use crate::error::source::SourceError;
use crate::error::NewsprintResult;
use crate::restoration::confidence::{ConfidenceError, ConfidenceScorer};
use crate::restoration::keywords::{
    load_keywords_file, write_keywords_file, write_tree_file, LoadReport,
};
use crate::restoration::{LineSink, RestorationDriver, RestorationMode, RestorationSummary};

/// Owns the trie and the settings commands run with.
#[derive(Debug)]
pub struct Session {
    trie: FrequencyTrie,
    config: NewsprintConfig,
    keywords_path: Option<PathBuf>,
    /// Lines of the keyword file a write-back would drop or alter
    lossy_lines: Vec<usize>,
}

impl Session {
    /// Creates a session with an empty trie.
    pub fn new(config: NewsprintConfig) -> Self {
        Self {
            trie: FrequencyTrie::with_config(config.trie.to_trie_config()),
            config,
            keywords_path: None,
            lossy_lines: Vec::new(),
        }
    }

    /// Read access to the trie.
    pub fn trie(&self) -> &FrequencyTrie {
        &self.trie
    }

    /// Settings in effect.
    pub fn config(&self) -> &NewsprintConfig {
        &self.config
    }

    /// Replaces the trie with the keywords in `path` and remembers the file
    /// so later mutations can be saved back to it.
    pub fn load_keywords(&mut self, path: &Path) -> NewsprintResult<LoadReport> {
        let report = load_keywords_file(&mut self.trie, path)?;
        self.keywords_path = Some(path.to_path_buf());
        self.lossy_lines = report.lossy_lines();
        Ok(report)
    }

    /// Checks that the loaded keyword file can be rewritten without losing
    /// any of its lines.
    ///
    /// # Errors
    ///
    /// `SourceError::LossyOverwrite` listing the affected lines, unless
    /// `force` is set.
    pub fn check_save(&self, force: bool) -> NewsprintResult<()> {
        match &self.keywords_path {
            Some(path) if !force && !self.lossy_lines.is_empty() => {
                Err(SourceError::LossyOverwrite {
                    path: path.clone(),
                    lines: self.lossy_lines.clone(),
                }
                .into())
            }
            _ => Ok(()),
        }
    }

    /// Writes the current words back to the file they were loaded from.
    ///
    /// Returns `false` when no keyword file was loaded. Refuses to drop or
    /// rewrite lines of that file unless `force` is set; see [`check_save`].
    ///
    /// [`check_save`]: Session::check_save
    pub fn save_keywords(&mut self, force: bool) -> NewsprintResult<bool> {
        self.check_save(force)?;
        match &self.keywords_path {
            Some(path) => {
                write_keywords_file(&self.trie, path)?;
                self.lossy_lines.clear();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Adds one occurrence of `word`.
    pub fn add(&mut self, word: &str) -> NewsprintResult<String> {
        self.trie.add(word)?;
        let word = self.trie.normalized(word);
        debug!(word = %word, "Added word");
        Ok(format!("Added '{word}' to Trie."))
    }

    /// Deletes `word`.
    pub fn delete(&mut self, word: &str) -> String {
        let normalized = self.trie.normalized(word);
        if self.trie.delete(word) {
            debug!(word = %normalized, "Deleted word");
            format!("Deleted '{normalized}' from Trie.")
        } else {
            format!("'{normalized}' not found in Trie.")
        }
    }

    /// Looks `word` up exactly.
    pub fn search(&self, word: &str) -> String {
        let normalized = self.trie.normalized(word);
        match self.trie.frequency(word) {
            Some(frequency) => format!("'{normalized}' found in Trie (frequency: {frequency})"),
            None => format!("'{normalized}' not found in Trie"),
        }
    }

    /// Renders the tree.
    pub fn display(&self) -> Vec<String> {
        self.trie.render()
    }

    /// Writes the rendered tree to `path`.
    pub fn write_tree(&self, path: &Path) -> NewsprintResult<String> {
        write_tree_file(&self.trie, path)?;
        Ok(format!("Trie written to file '{}'.", path.display()))
    }

    /// Writes every word and its frequency to `path`.
    pub fn write_keywords(&self, path: &Path) -> NewsprintResult<String> {
        let count = write_keywords_file(&self.trie, path)?;
        Ok(format!(
            "{count} keywords successfully written to '{}'.",
            path.display()
        ))
    }

    /// Lists every candidate for `pattern`, highest frequency first.
    pub fn matches(&self, pattern: &str) -> String {
        let words: Vec<String> = self
            .trie
            .wildcard_search(pattern)
            .into_iter()
            .map(|(word, _)| format!("'{word}'"))
            .collect();
        format!("Matches found: [{}]", words.join(", "))
    }

    /// Reports the best candidate for `pattern`.
    pub fn best(&self, pattern: &str) -> String {
        match self.trie.best_match(pattern) {
            Some((word, _)) => format!("Best match: <{word}>"),
            None => "No match found.".to_string(),
        }
    }

    /// Lists every candidate for `pattern` with its confidence.
    ///
    /// "No matches" and "no frequency data" are reported as distinct lines.
    pub fn confidence(&self, pattern: &str) -> Vec<String> {
        let scorer = ConfidenceScorer::new(self.config.restore.confidence_precision);
        let candidates = self.trie.wildcard_search(pattern);

        match scorer.score(&candidates) {
            Ok(scored) => {
                let mut lines = vec![
                    format!("Restoring: {pattern}"),
                    "Possible Matches with Confidence Scores:".to_string(),
                ];
                lines.extend(scored.iter().map(|candidate| scorer.format(candidate)));
                lines
            }
            Err(ConfidenceError::NoFrequencyData) => {
                let words: Vec<&str> = candidates.iter().map(|(word, _)| word.as_str()).collect();
                vec![format!(
                    "No frequency data for the matches of '{pattern}': {}",
                    words.join(", ")
                )]
            }
            Err(_) => vec![format!("No matches found for '{pattern}'.")],
        }
    }

    /// Reports the confidence of one candidate `word` for `pattern`.
    ///
    /// # Errors
    ///
    /// `NewsprintError::Confidence` when nothing matches, the matches carry
    /// no frequency, or `word` is not one of them.
    pub fn word_confidence(&self, pattern: &str, word: &str) -> NewsprintResult<String> {
        let scorer = ConfidenceScorer::new(self.config.restore.confidence_precision);
        let candidates = self.trie.wildcard_search(pattern);
        let word = self.trie.normalized(word);

        let confidence = scorer.confidence(&word, &candidates)?;
        Ok(format!(
            "Confidence of '{word}' for '{pattern}': {:.*}%",
            self.config.restore.confidence_precision, confidence
        ))
    }

    /// Restores the defect text in `path` into `sink`.
    ///
    /// `mode` falls back to the configured default when `None`.
    pub fn restore_into(
        &self,
        path: &Path,
        mode: Option<RestorationMode>,
        sink: &mut dyn LineSink,
    ) -> NewsprintResult<RestorationSummary> {
        let mode = mode.unwrap_or(self.config.restore.default_mode);
        RestorationDriver::new(&self.trie, mode).restore_file_into(path, sink)
    }

    /// Overwrites the stored frequency of `word`.
    pub fn set_frequency(&mut self, word: &str, frequency: u64) -> String {
        let normalized = self.trie.normalized(word);
        match self.trie.frequency(word) {
            Some(old) => {
                self.trie.set_frequency(word, frequency);
                info!(word = %normalized, old, new = frequency, "Frequency edited");
                format!("Frequency for '{normalized}' updated from {old} to {frequency}.")
            }
            None if !normalized.is_empty() && self.trie.has_prefix(word) => {
                format!("'{normalized}' is a prefix, not a complete word.")
            }
            None => format!("'{normalized}' not found in trie."),
        }
    }

    /// Every stored word with its frequency.
    pub fn list(&self) -> Vec<WordFrequency> {
        self.trie.to_list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NewsprintError;

    fn session() -> Session {
        let mut session = Session::new(NewsprintConfig::default());
        for (word, freq) in [("cat", 3), ("cot", 1), ("car", 2)] {
            session.trie.insert(word, freq).unwrap();
        }
        session
    }

    #[test]
    fn test_add_search_delete() {
        let mut session = session();

        assert_eq!(session.add("Dog").unwrap(), "Added 'dog' to Trie.");
        assert_eq!(session.search("dog"), "'dog' found in Trie (frequency: 1)");
        assert_eq!(session.delete("DOG"), "Deleted 'dog' from Trie.");
        assert_eq!(session.delete("dog"), "'dog' not found in Trie.");
        assert_eq!(session.search("ca"), "'ca' not found in Trie");
    }

    #[test]
    fn test_add_empty_word_is_an_error() {
        let mut session = session();
        assert!(session.add("").is_err());
        assert_eq!(session.list().len(), 3);
    }

    #[test]
    fn test_matches_and_best() {
        let session = session();

        assert_eq!(session.matches("c*t"), "Matches found: ['cat', 'cot']");
        assert_eq!(session.matches("z*"), "Matches found: []");
        assert_eq!(session.best("c*t"), "Best match: <cat>");
        assert_eq!(session.best("z*"), "No match found.");
    }

    #[test]
    fn test_confidence_reports() {
        let mut session = session();

        assert_eq!(
            session.confidence("c*t"),
            vec![
                "Restoring: c*t",
                "Possible Matches with Confidence Scores:",
                " - cat (75.00%)",
                " - cot (25.00%)",
            ]
        );
        assert_eq!(session.confidence("d*g"), vec!["No matches found for 'd*g'."]);

        session.trie.set_frequency("cat", 0);
        session.trie.set_frequency("cot", 0);
        assert_eq!(
            session.confidence("c*t"),
            vec!["No frequency data for the matches of 'c*t': cat, cot"]
        );
    }

    #[test]
    fn test_word_confidence() {
        let mut session = session();

        assert_eq!(
            session.word_confidence("c*t", "Cat").unwrap(),
            "Confidence of 'cat' for 'c*t': 75.00%"
        );
        let err = session.word_confidence("c*t", "car").unwrap_err();
        assert!(matches!(
            err,
            NewsprintError::Confidence(ConfidenceError::UnknownCandidate(ref word)) if word == "car"
        ));
        assert!(matches!(
            session.word_confidence("d*g", "dog"),
            Err(NewsprintError::Confidence(ConfidenceError::NoMatches))
        ));

        session.trie.set_frequency("cat", 0);
        session.trie.set_frequency("cot", 0);
        assert!(matches!(
            session.word_confidence("c*t", "cat"),
            Err(NewsprintError::Confidence(ConfidenceError::NoFrequencyData))
        ));
    }

    #[test]
    fn test_set_frequency_messages() {
        let mut session = session();

        assert_eq!(
            session.set_frequency("cot", 9),
            "Frequency for 'cot' updated from 1 to 9."
        );
        assert_eq!(session.best("c*t"), "Best match: <cot>");
        assert_eq!(
            session.set_frequency("ca", 2),
            "'ca' is a prefix, not a complete word."
        );
        assert_eq!(session.set_frequency("dog", 2), "'dog' not found in trie.");
        assert_eq!(session.set_frequency("", 2), "'' not found in trie.");
    }

    #[test]
    fn test_save_without_keyword_file() {
        let mut session = session();
        assert!(session.check_save(false).is_ok());
        assert!(!session.save_keywords(false).unwrap());
    }
}
