//! Error types for the frequency trie.
//!
//! This module defines the error types that can occur during trie mutation.
//! Lookups of absent words are not errors; they report `false` or `None`.

/// Errors that can occur in frequency trie operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrequencyTrieError {
    /// Error when an empty word is provided.
    #[error("Empty word not allowed")]
    EmptyWord,

    /// Error when a word exceeds the maximum depth allowed.
    #[error("Word '{word}' exceeds maximum trie depth of {max_depth}")]
    WordTooLong {
        /// The word that was too long.
        word: String,
        /// The maximum allowed depth.
        max_depth: usize,
    },

    /// Error when a word contains the wildcard marker or whitespace.
    #[error("Word '{word}' contains invalid character {character:?}")]
    InvalidCharacter {
        /// The rejected word.
        word: String,
        /// The first offending character.
        character: char,
    },
}
