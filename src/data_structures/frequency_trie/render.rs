//! Human-readable tree rendering for the frequency trie.

use std::fmt;

use super::node::TrieNode;
use super::FrequencyTrie;

/// Header emitted above a non-empty tree.
pub const RENDER_HEADER: &str = "Trie Structure:";

/// Line emitted for a trie without words.
pub const RENDER_EMPTY: &str = "[]";

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

impl FrequencyTrie {
    /// Renders the tree as indented lines with branch connectors.
    ///
    /// Every node gets one line showing its edge character. Terminal nodes are
    /// marked with `*` followed by the full word and its frequency, e.g.
    /// `└── t* cat (frequency: 3)`.
    pub fn render(&self) -> Vec<String> {
        if self.root.children.is_empty() {
            return vec![RENDER_EMPTY.to_string()];
        }

        let mut lines = vec![RENDER_HEADER.to_string()];
        let mut word = String::new();
        render_children(&self.root, "", &mut word, &mut lines);
        lines
    }
}

fn render_children(node: &TrieNode, prefix: &str, word: &mut String, lines: &mut Vec<String>) {
    let last_index = node.children.len().saturating_sub(1);

    for (i, (&c, child)) in node.children.iter().enumerate() {
        let is_last = i == last_index;
        word.push(c);

        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        if child.is_terminal {
            lines.push(format!(
                "{prefix}{connector}{c}* {word} (frequency: {})",
                child.frequency
            ));
        } else {
            lines.push(format!("{prefix}{connector}{c}"));
        }

        let child_prefix = format!("{prefix}{}", if is_last { SPACE } else { PIPE });
        render_children(child, &child_prefix, word, lines);

        word.pop();
    }
}

impl fmt::Display for FrequencyTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.render() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
