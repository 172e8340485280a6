//! Trie configuration module.
//!
//! This module defines how words are normalised and matched by the trie.

use super::ConfigResult;
use super::Validate;
use crate::data_structures::FrequencyTrieConfig;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Trie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrieConfig {
    /// Keep words as written instead of lower-casing them
    pub case_sensitive: bool,

    /// Maximum accepted word length
    pub max_depth: usize,

    /// Single-character wildcard marker
    pub wildcard: char,
}

impl Default for TrieConfig {
    fn default() -> Self {
        let defaults = FrequencyTrieConfig::default();
        Self {
            case_sensitive: defaults.case_sensitive,
            max_depth: defaults.max_depth,
            wildcard: defaults.wildcard,
        }
    }
}

impl TrieConfig {
    /// Builds the options handed to a new trie.
    pub fn to_trie_config(&self) -> FrequencyTrieConfig {
        FrequencyTrieConfig {
            case_sensitive: self.case_sensitive,
            max_depth: self.max_depth,
            wildcard: self.wildcard,
        }
    }
}

impl Validate for TrieConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_depth == 0 {
            return Err(ConfigError::ValidationError(
                "max_depth must be greater than 0".to_string(),
            ));
        }

        // The marker must survive whitespace tokenisation and never be a word character
        if self.wildcard.is_whitespace() || self.wildcard.is_alphanumeric() {
            return Err(ConfigError::ValueOutOfRange {
                key: "trie.wildcard".to_string(),
                message: format!(
                    "'{}' must be a non-whitespace, non-alphanumeric symbol",
                    self.wildcard
                ),
            });
        }

        Ok(())
    }
}
