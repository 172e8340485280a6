//! Confidence scoring for wildcard candidates.
//!
//! A candidate's confidence is its share of the total frequency of all
//! candidates returned for one pattern, as a percentage. "No candidates" and
//! "candidates without any frequency" are reported as distinct errors rather
//! than as a zero score.

use serde::Serialize;

use crate::data_structures::WordFrequency;

/// Default number of decimal places used when printing a confidence.
pub const DEFAULT_PRECISION: usize = 2;

/// Errors that can occur while scoring candidates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfidenceError {
    /// The candidate set is empty.
    #[error("No matches to score")]
    NoMatches,

    /// Every candidate has frequency zero, so no share can be computed.
    #[error("No frequency data for the matched candidates")]
    NoFrequencyData,

    /// The requested word is not one of the candidates.
    #[error("'{0}' is not among the candidates")]
    UnknownCandidate(String),
}

/// Result type for confidence scoring
pub type ConfidenceResult<T> = Result<T, ConfidenceError>;

/// A candidate together with its confidence percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    /// The candidate word
    pub word: String,
    /// Its stored frequency
    pub frequency: u64,
    /// Share of the total frequency, in percent
    pub confidence: f64,
}

/// Turns ranked candidates into confidence percentages.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceScorer {
    precision: usize,
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl ConfidenceScorer {
    /// Creates a scorer printing `precision` decimal places.
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    fn total_frequency(candidates: &[WordFrequency]) -> ConfidenceResult<u128> {
        if candidates.is_empty() {
            return Err(ConfidenceError::NoMatches);
        }

        let total: u128 = candidates.iter().map(|(_, freq)| u128::from(*freq)).sum();
        if total == 0 {
            return Err(ConfidenceError::NoFrequencyData);
        }

        Ok(total)
    }

    /// Computes the confidence of `word` among `candidates`.
    ///
    /// # Errors
    ///
    /// * `NoMatches` - If `candidates` is empty.
    /// * `NoFrequencyData` - If the candidates' frequencies sum to zero.
    /// * `UnknownCandidate` - If `word` is not one of the candidates.
    pub fn confidence(&self, word: &str, candidates: &[WordFrequency]) -> ConfidenceResult<f64> {
        let total = Self::total_frequency(candidates)?;
        let frequency = candidates
            .iter()
            .find(|(candidate, _)| candidate == word)
            .map(|(_, freq)| *freq)
            .ok_or_else(|| ConfidenceError::UnknownCandidate(word.to_string()))?;

        Ok(share(frequency, total))
    }

    /// Scores every candidate, preserving the input order.
    pub fn score(&self, candidates: &[WordFrequency]) -> ConfidenceResult<Vec<ScoredCandidate>> {
        let total = Self::total_frequency(candidates)?;

        Ok(candidates
            .iter()
            .map(|(word, frequency)| ScoredCandidate {
                word: word.clone(),
                frequency: *frequency,
                confidence: share(*frequency, total),
            })
            .collect())
    }

    /// Formats a scored candidate as ` - word (75.00%)`.
    pub fn format(&self, candidate: &ScoredCandidate) -> String {
        format!(
            " - {} ({:.*}%)",
            candidate.word, self.precision, candidate.confidence
        )
    }
}

fn share(frequency: u64, total: u128) -> f64 {
    100.0 * frequency as f64 / total as f64
}
