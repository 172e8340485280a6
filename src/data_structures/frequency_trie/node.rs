//! Node implementation for the frequency trie.
//!
//! Each node exclusively owns its children. Nothing outside the trie ever
//! holds a reference to a node.

use std::collections::BTreeMap;

/// A node in the frequency trie.
///
/// Each node represents a character in a word path. Terminal nodes carry the
/// accumulated frequency of the word spelled by that path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TrieNode {
    /// Map of characters to child nodes, iterated in lexical order
    pub(crate) children: BTreeMap<char, TrieNode>,

    /// Whether this node represents the end of a stored word
    pub(crate) is_terminal: bool,

    /// Observed frequency; only meaningful when `is_terminal` is set
    pub(crate) frequency: u64,
}

impl TrieNode {
    /// Creates a new empty trie node.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A non-terminal leaf carries no word and must be detached from its parent.
    pub(crate) fn is_prunable(&self) -> bool {
        !self.is_terminal && self.children.is_empty()
    }

    /// Counts terminal nodes in this subtree.
    pub(crate) fn count_words(&self) -> usize {
        let own = usize::from(self.is_terminal);
        own + self.children.values().map(TrieNode::count_words).sum::<usize>()
    }

    /// Counts nodes in this subtree, including `self`.
    pub(crate) fn count_nodes(&self) -> usize {
        1 + self.children.values().map(TrieNode::count_nodes).sum::<usize>()
    }
}
