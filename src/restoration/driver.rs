//! Line-oriented restoration of defective text.
//!
//! Every whitespace-delimited token containing the wildcard marker is
//! resolved against the trie. Other tokens pass through verbatim and tokens
//! are re-joined with single spaces.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::case::apply_case;
use super::files::read_source;
use super::sink::LineSink;
use crate::data_structures::FrequencyTrie;
use crate::error::source::SourceResult;
use crate::error::NewsprintResult;

/// How a wildcard token is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestorationMode {
    /// Every candidate, as `['Cat', 'Cot']`
    #[default]
    All,
    /// The highest-frequency candidate, as `<Cat>`
    Best,
}

/// Counters gathered while restoring a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RestorationSummary {
    /// Lines processed
    pub lines: usize,
    /// Tokens containing the wildcard marker
    pub targets: usize,
    /// Targets for which no stored word matched
    pub unresolved: usize,
}

/// Restores defective text against a borrowed trie.
#[derive(Debug, Clone, Copy)]
pub struct RestorationDriver<'a> {
    trie: &'a FrequencyTrie,
    mode: RestorationMode,
}

impl<'a> RestorationDriver<'a> {
    /// Creates a driver rendering tokens in `mode`.
    pub fn new(trie: &'a FrequencyTrie, mode: RestorationMode) -> Self {
        Self { trie, mode }
    }

    /// Whether `token` contains the wildcard marker.
    pub fn is_target(&self, token: &str) -> bool {
        token.contains(self.trie.config().wildcard)
    }

    fn restore_token(&self, token: &str, summary: &mut RestorationSummary) -> String {
        if !self.is_target(token) {
            return token.to_string();
        }
        summary.targets += 1;

        match self.mode {
            RestorationMode::All => {
                let matches = self.trie.wildcard_search(token);
                if matches.is_empty() {
                    summary.unresolved += 1;
                }
                let candidates: Vec<String> = matches
                    .iter()
                    .map(|(word, _)| format!("'{}'", apply_case(token, word)))
                    .collect();
                format!("[{}]", candidates.join(", "))
            }
            RestorationMode::Best => match self.trie.best_match(token) {
                Some((word, _)) => format!("<{}>", apply_case(token, &word)),
                None => {
                    summary.unresolved += 1;
                    token.to_string()
                }
            },
        }
    }

    fn restore_line_counted(&self, line: &str, summary: &mut RestorationSummary) -> String {
        summary.lines += 1;
        line.split_whitespace()
            .map(|token| self.restore_token(token, summary))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Restores a single line.
    pub fn restore_line(&self, line: &str) -> String {
        self.restore_line_counted(line, &mut RestorationSummary::default())
    }

    /// Restores every line, preserving order.
    pub fn restore_lines<I, S>(&self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut summary = RestorationSummary::default();
        lines
            .into_iter()
            .map(|line| self.restore_line_counted(line.as_ref(), &mut summary))
            .collect()
    }

    /// Reads and restores a defect text file.
    ///
    /// # Errors
    ///
    /// `SourceError::NotFound` if the file does not exist; an empty file
    /// restores to no lines.
    pub fn restore_file(&self, path: &Path) -> SourceResult<Vec<String>> {
        let text = read_source(path)?;
        Ok(self.restore_lines(text.lines()))
    }

    /// Reads a defect text file and streams each restored line into `sink`.
    pub fn restore_file_into(
        &self,
        path: &Path,
        sink: &mut dyn LineSink,
    ) -> NewsprintResult<RestorationSummary> {
        let text = read_source(path)?;
        let mut summary = RestorationSummary::default();

        for line in text.lines() {
            let restored = self.restore_line_counted(line, &mut summary);
            debug!(original = line, restored = %restored, "Restored line");
            sink.write_line(&restored)?;
        }
        sink.finish()?;

        info!(
            path = %path.display(),
            mode = ?self.mode,
            lines = summary.lines,
            targets = summary.targets,
            unresolved = summary.unresolved,
            "Restoration complete"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NewsprintError;
    use crate::restoration::sink::MockLineSink;
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn dictionary() -> FrequencyTrie {
        let mut trie = FrequencyTrie::new();
        for (word, freq) in [("cat", 3), ("cot", 1), ("car", 2), ("the", 9), ("mat", 2)] {
            trie.insert(word, freq).unwrap();
        }
        trie
    }

    #[test]
    fn test_all_matches_rendering() {
        let trie = dictionary();
        let driver = RestorationDriver::new(&trie, RestorationMode::All);

        assert_eq!(
            driver.restore_line("The C*t sat on the m*t"),
            "The ['Cat', 'Cot'] sat on the ['mat']"
        );
        assert_eq!(driver.restore_line("x*z"), "[]");
    }

    #[test]
    fn test_best_match_rendering() {
        let trie = dictionary();
        let driver = RestorationDriver::new(&trie, RestorationMode::Best);

        assert_eq!(driver.restore_line("T*E C*t"), "<ThE> <Cat>");
        // Unresolved targets are left as they were
        assert_eq!(driver.restore_line("a d*g"), "a d*g");
    }

    #[test]
    fn test_whitespace_and_blank_lines() {
        let trie = dictionary();
        let driver = RestorationDriver::new(&trie, RestorationMode::Best);

        let restored = driver.restore_lines(["  the   c*t  ", "", "plain text"]);
        assert_eq!(restored, vec!["the <cat>", "", "plain text"]);
    }

    #[test]
    fn test_marker_matches_one_character_each() {
        let trie = dictionary();
        let driver = RestorationDriver::new(&trie, RestorationMode::All);

        assert_eq!(driver.restore_line("**t"), "['cat', 'mat', 'cot']");
        assert_eq!(driver.restore_line("**"), "[]");
    }

    #[test]
    fn test_restore_missing_file() {
        let trie = dictionary();
        let driver = RestorationDriver::new(&trie, RestorationMode::All);
        let dir = tempfile::tempdir().unwrap();

        let err = driver.restore_file(&dir.path().join("missing.txt")).unwrap_err();
        assert!(err.is_not_found());

        let mut sink = MockLineSink::new();
        sink.expect_write_line().never();
        sink.expect_finish().never();
        let err = driver
            .restore_file_into(&dir.path().join("missing.txt"), &mut sink)
            .unwrap_err();
        assert!(matches!(err, NewsprintError::Source(e) if e.is_not_found()));
    }

    #[test]
    fn test_restore_file_into_sink_in_order() {
        let trie = dictionary();
        let driver = RestorationDriver::new(&trie, RestorationMode::Best);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("defect.txt");
        std::fs::write(&path, "the c*t\nno wildcards\nd*g\n").unwrap();

        let mut seq = Sequence::new();
        let mut sink = MockLineSink::new();
        for expected in ["the <cat>", "no wildcards", "d*g"] {
            sink.expect_write_line()
                .with(eq(expected))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(()));
        }
        sink.expect_finish()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));

        let summary = driver.restore_file_into(&path, &mut sink).unwrap();
        assert_eq!(
            summary,
            RestorationSummary {
                lines: 3,
                targets: 2,
                unresolved: 1
            }
        );
    }

    #[test]
    fn test_sink_failure_propagates() {
        let trie = dictionary();
        let driver = RestorationDriver::new(&trie, RestorationMode::All);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("defect.txt");
        std::fs::write(&path, "c*t\n").unwrap();

        let mut sink = MockLineSink::new();
        sink.expect_write_line()
            .returning(|_| Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed")));
        sink.expect_finish().never();

        let err = driver.restore_file_into(&path, &mut sink).unwrap_err();
        assert!(matches!(err, NewsprintError::Io(_)));
    }
}
