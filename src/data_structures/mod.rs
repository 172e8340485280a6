//! Data structures for newsprint restoration.
//!
//! The frequency trie is the dictionary every restoration query runs
//! against. It is single-owner by default; `SharedFrequencyTrie` adds a
//! reader/writer lock for callers that need to share it across threads.

pub mod frequency_trie;

// Re-export common data structures
pub use frequency_trie::{
    FrequencyTrie, FrequencyTrieConfig, FrequencyTrieError, FrequencyTrieResult,
    SharedFrequencyTrie, WordFrequency,
};
