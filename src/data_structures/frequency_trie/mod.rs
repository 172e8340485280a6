//! Frequency Trie Implementation
//!
//! This module provides a prefix trie whose terminal nodes carry an observed
//! word frequency. Beyond insertion and exact lookup it supports pruning
//! deletion and single-character wildcard search with results ranked by
//! frequency, which is what the restoration layer builds on.
//!
//! # Example
//!
//! ```
//! use newsprint_lib::data_structures::frequency_trie::FrequencyTrie;
//!
//! let mut trie = FrequencyTrie::new();
//! trie.insert("cat", 3).unwrap();
//! trie.insert("cot", 1).unwrap();
//! trie.insert("car", 2).unwrap();
//!
//! let matches = trie.wildcard_search("c*t");
//! assert_eq!(matches, vec![("cat".to_string(), 3), ("cot".to_string(), 1)]);
//! assert_eq!(trie.best_match("c*t"), Some(("cat".to_string(), 3)));
//! ```
//!
//! # Ordering
//!
//! Children are kept in lexical order, so every traversal (listing, rendering
//! and wildcard discovery) visits words alphabetically. Wildcard results are
//! stably sorted by descending frequency, which makes equal-frequency matches
//! tie-break alphabetically.

mod error;
mod node;
mod render;
mod shared;

use std::borrow::Cow;

pub use error::FrequencyTrieError;
pub use shared::SharedFrequencyTrie;
use node::TrieNode;

/// Result type for frequency trie operations
pub type FrequencyTrieResult<T> = Result<T, FrequencyTrieError>;

/// A stored word paired with its frequency.
pub type WordFrequency = (String, u64);

/// Default single-character wildcard symbol.
pub const DEFAULT_WILDCARD: char = '*';

/// Configuration options for the frequency trie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTrieConfig {
    /// Whether words are stored and looked up as given; when `false` they are lower-cased
    pub case_sensitive: bool,

    /// Maximum word length accepted on insertion
    pub max_depth: usize,

    /// Pattern symbol matching exactly one character
    pub wildcard: char,
}

impl Default for FrequencyTrieConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            max_depth: 64,
            wildcard: DEFAULT_WILDCARD,
        }
    }
}

/// A prefix trie of words weighted by observed frequency.
///
/// The trie owns its entire node tree. Callers only ever receive owned words
/// and frequencies back, never node references.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTrie {
    /// The root node; never terminal
    root: TrieNode,

    /// Configuration options
    config: FrequencyTrieConfig,
}

impl FrequencyTrie {
    /// Creates a new empty `FrequencyTrie` with default configuration.
    pub fn new() -> Self {
        Self::with_config(FrequencyTrieConfig::default())
    }

    /// Creates a new empty `FrequencyTrie` with the specified configuration.
    pub fn with_config(config: FrequencyTrieConfig) -> Self {
        Self {
            root: TrieNode::new(),
            config,
        }
    }

    /// Returns the configuration this trie was built with.
    pub fn config(&self) -> &FrequencyTrieConfig {
        &self.config
    }

    /// Returns `word` the way the trie stores it.
    pub fn normalized(&self, word: &str) -> String {
        self.normalize(word).into_owned()
    }

    fn normalize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if self.config.case_sensitive {
            Cow::Borrowed(word)
        } else {
            Cow::Owned(word.to_lowercase())
        }
    }

    /// Inserts a word, adding `frequency_increment` to its stored frequency.
    ///
    /// Nodes along the path are created on demand. Inserting a word that is
    /// already stored only accumulates weight.
    ///
    /// # Errors
    ///
    /// * `EmptyWord` - If `word` is empty.
    /// * `WordTooLong` - If `word` is longer than the configured `max_depth`.
    /// * `InvalidCharacter` - If `word` contains the wildcard marker, whitespace
    ///   or a control character.
    pub fn insert<W>(&mut self, word: W, frequency_increment: u64) -> FrequencyTrieResult<()>
    where
        W: AsRef<str>,
    {
        let word = word.as_ref();
        if word.is_empty() {
            return Err(FrequencyTrieError::EmptyWord);
        }

        let processed_word = self.normalize(word);
        if processed_word.chars().count() > self.config.max_depth {
            return Err(FrequencyTrieError::WordTooLong {
                word: processed_word.into_owned(),
                max_depth: self.config.max_depth,
            });
        }

        if let Some(character) = processed_word
            .chars()
            .find(|&c| c == self.config.wildcard || c.is_whitespace() || c.is_control())
        {
            return Err(FrequencyTrieError::InvalidCharacter {
                word: processed_word.into_owned(),
                character,
            });
        }

        let mut node = &mut self.root;
        for c in processed_word.chars() {
            node = node.children.entry(c).or_default();
        }

        node.is_terminal = true;
        node.frequency = node.frequency.saturating_add(frequency_increment);

        Ok(())
    }

    /// Inserts a single occurrence of `word`.
    pub fn add<W>(&mut self, word: W) -> FrequencyTrieResult<()>
    where
        W: AsRef<str>,
    {
        self.insert(word, 1)
    }

    fn find_node(&self, word: &str) -> Option<&TrieNode> {
        self.normalize(word)
            .chars()
            .try_fold(&self.root, |node, c| node.children.get(&c))
    }

    fn find_node_mut(&mut self, word: &str) -> Option<&mut TrieNode> {
        let processed_word = self.normalize(word).into_owned();
        processed_word
            .chars()
            .try_fold(&mut self.root, |node, c| node.children.get_mut(&c))
    }

    /// Checks whether `word` is stored as a complete word.
    ///
    /// A path that only exists as the prefix of longer words is not contained.
    pub fn contains<W>(&self, word: W) -> bool
    where
        W: AsRef<str>,
    {
        self.find_node(word.as_ref())
            .is_some_and(|node| node.is_terminal)
    }

    /// Checks whether some stored word starts with `prefix`.
    pub fn has_prefix<P>(&self, prefix: P) -> bool
    where
        P: AsRef<str>,
    {
        self.find_node(prefix.as_ref()).is_some()
    }

    /// Returns the frequency of a stored word.
    pub fn frequency<W>(&self, word: W) -> Option<u64>
    where
        W: AsRef<str>,
    {
        self.find_node(word.as_ref())
            .filter(|node| node.is_terminal)
            .map(|node| node.frequency)
    }

    /// Overwrites the frequency of a stored word.
    ///
    /// # Returns
    ///
    /// `true` if the word was stored and updated, `false` if it is absent or
    /// only exists as a prefix. Nothing is mutated in the `false` case.
    pub fn set_frequency<W>(&mut self, word: W, frequency: u64) -> bool
    where
        W: AsRef<str>,
    {
        match self.find_node_mut(word.as_ref()) {
            Some(node) if node.is_terminal => {
                node.frequency = frequency;
                true
            }
            _ => false,
        }
    }

    /// Removes a word from the trie, pruning nodes that no longer lead to any word.
    ///
    /// # Returns
    ///
    /// `true` if the word was stored and has been removed, `false` if it was
    /// absent or only exists as a prefix (in which case nothing is mutated).
    pub fn delete<W>(&mut self, word: W) -> bool
    where
        W: AsRef<str>,
    {
        let word = word.as_ref();
        if word.is_empty() {
            return false;
        }

        let chars: Vec<char> = self.normalize(word).chars().collect();
        Self::remove_recursive(&mut self.root, &chars)
    }

    /// Depth-first removal of the word spelled by `chars` below `node`.
    ///
    /// On the way back up every child that ended up non-terminal and childless
    /// is detached from its parent. The first node that is still terminal or
    /// still has other children stops the pruning.
    fn remove_recursive(node: &mut TrieNode, chars: &[char]) -> bool {
        let Some((c, rest)) = chars.split_first() else {
            if !node.is_terminal {
                return false;
            }
            node.is_terminal = false;
            node.frequency = 0;
            return true;
        };

        let Some(child) = node.children.get_mut(c) else {
            return false;
        };

        let removed = Self::remove_recursive(child, rest);
        if removed && child.is_prunable() {
            node.children.remove(c);
        }

        removed
    }

    /// Finds every stored word matching `pattern`, ranked by frequency.
    ///
    /// Each position of `pattern` is either a literal character or the
    /// configured wildcard, which matches exactly one character. A match has
    /// exactly as many characters as the pattern.
    ///
    /// Results are sorted by descending frequency; equal frequencies keep
    /// their discovery order, which is alphabetical. No match yields an empty
    /// vector.
    pub fn wildcard_search<P>(&self, pattern: P) -> Vec<WordFrequency>
    where
        P: AsRef<str>,
    {
        let pattern: Vec<char> = self.normalize(pattern.as_ref()).chars().collect();
        let mut results = Vec::new();

        if pattern.is_empty() || pattern.len() > self.config.max_depth {
            return results;
        }

        let mut path = String::with_capacity(pattern.len());
        self.collect_matches(&self.root, &pattern, &mut path, &mut results);

        results.sort_by(|a, b| b.1.cmp(&a.1));
        results
    }

    fn collect_matches(
        &self,
        node: &TrieNode,
        pattern: &[char],
        path: &mut String,
        results: &mut Vec<WordFrequency>,
    ) {
        let Some((&symbol, rest)) = pattern.split_first() else {
            if node.is_terminal {
                results.push((path.clone(), node.frequency));
            }
            return;
        };

        if symbol == self.config.wildcard {
            for (&c, child) in &node.children {
                path.push(c);
                self.collect_matches(child, rest, path, results);
                path.pop();
            }
        } else if let Some(child) = node.children.get(&symbol) {
            path.push(symbol);
            self.collect_matches(child, rest, path, results);
            path.pop();
        }
    }

    /// Returns the highest-frequency match for `pattern`, if any.
    ///
    /// Among equal frequencies the alphabetically first word wins.
    pub fn best_match<P>(&self, pattern: P) -> Option<WordFrequency>
    where
        P: AsRef<str>,
    {
        self.wildcard_search(pattern).into_iter().next()
    }

    /// Lists every stored word with its frequency, in alphabetical order.
    pub fn to_list(&self) -> Vec<WordFrequency> {
        let mut words = Vec::new();
        let mut path = String::new();
        Self::collect_words(&self.root, &mut path, &mut words);
        words
    }

    fn collect_words(node: &TrieNode, path: &mut String, words: &mut Vec<WordFrequency>) {
        if node.is_terminal {
            words.push((path.clone(), node.frequency));
        }

        for (&c, child) in &node.children {
            path.push(c);
            Self::collect_words(child, path, words);
            path.pop();
        }
    }

    /// Replaces the contents of the trie with `pairs`.
    ///
    /// Each word receives exactly the given frequency; duplicates within
    /// `pairs` accumulate. The replacement is built separately and swapped in
    /// only once every pair was accepted, so on error the trie is unchanged.
    pub fn load_from_pairs<I, W>(&mut self, pairs: I) -> FrequencyTrieResult<()>
    where
        I: IntoIterator<Item = (W, u64)>,
        W: AsRef<str>,
    {
        let fresh = Self::build_from_pairs(self.config.clone(), pairs)?;
        *self = fresh;
        Ok(())
    }

    pub(crate) fn build_from_pairs<I, W>(
        config: FrequencyTrieConfig,
        pairs: I,
    ) -> FrequencyTrieResult<Self>
    where
        I: IntoIterator<Item = (W, u64)>,
        W: AsRef<str>,
    {
        let mut fresh = Self::with_config(config);
        for (word, frequency) in pairs {
            fresh.insert(word, frequency)?;
        }
        Ok(fresh)
    }

    /// Returns the number of stored words.
    ///
    /// This walks the whole tree, so it's an O(n) operation.
    pub fn len(&self) -> usize {
        self.root.count_words()
    }

    /// Checks if the trie stores no words.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Returns the number of nodes below the root.
    pub fn node_count(&self) -> usize {
        self.root.count_nodes() - 1
    }

    /// Removes every word.
    pub fn clear(&mut self) {
        self.root = TrieNode::new();
    }
}
