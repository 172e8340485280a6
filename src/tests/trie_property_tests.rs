//! Property-based tests for the frequency trie and confidence scoring.

use proptest::prelude::*;
use std::collections::BTreeMap;

use super::test_utils::{pattern_from, word_frequency_strategy, word_strategy};
use crate::data_structures::{FrequencyTrie, WordFrequency};
use crate::restoration::ConfidenceScorer;

// Expected contents after inserting `pairs`: duplicates accumulate
fn model(pairs: &[WordFrequency]) -> BTreeMap<String, u64> {
    let mut expected = BTreeMap::new();
    for (word, frequency) in pairs {
        *expected.entry(word.clone()).or_insert(0) += *frequency;
    }
    expected
}

fn build(pairs: &[WordFrequency]) -> FrequencyTrie {
    let mut trie = FrequencyTrie::new();
    trie.load_from_pairs(pairs.iter().map(|(w, f)| (w.as_str(), *f)))
        .unwrap();
    trie
}

proptest! {
    // Property: the listing is exactly the accumulated dictionary, alphabetically
    #[test]
    fn prop_to_list_matches_model(pairs in word_frequency_strategy()) {
        let trie = build(&pairs);
        let expected: Vec<WordFrequency> = model(&pairs).into_iter().collect();

        prop_assert_eq!(trie.len(), expected.len());
        prop_assert_eq!(trie.to_list(), expected);
    }

    // Property: reloading an exported listing reproduces the trie
    #[test]
    fn prop_list_reload_round_trip(pairs in word_frequency_strategy()) {
        let trie = build(&pairs);
        let reloaded = build(&trie.to_list());

        prop_assert_eq!(reloaded.to_list(), trie.to_list());
        prop_assert_eq!(reloaded.node_count(), trie.node_count());
    }

    // Property: results are ordered by non-increasing frequency and
    // alphabetically among equal frequencies
    #[test]
    fn prop_wildcard_results_ordered(
        pairs in word_frequency_strategy(),
        word in word_strategy(),
        mask in prop::collection::vec(any::<bool>(), 6),
    ) {
        let trie = build(&pairs);
        let results = trie.wildcard_search(pattern_from(&word, &mask));

        for window in results.windows(2) {
            let (a, fa) = &window[0];
            let (b, fb) = &window[1];
            prop_assert!(fa > fb || (fa == fb && a < b));
        }
    }

    // Property: a match is exactly a stored word agreeing with every literal
    #[test]
    fn prop_wildcard_results_complete(
        pairs in word_frequency_strategy(),
        word in word_strategy(),
        mask in prop::collection::vec(any::<bool>(), 6),
    ) {
        let trie = build(&pairs);
        let pattern = pattern_from(&word, &mask);

        let mut expected: Vec<String> = model(&pairs)
            .into_keys()
            .filter(|candidate| {
                candidate.chars().count() == pattern.chars().count()
                    && candidate
                        .chars()
                        .zip(pattern.chars())
                        .all(|(c, p)| p == '*' || c == p)
            })
            .collect();
        let mut found: Vec<String> = trie
            .wildcard_search(&pattern)
            .into_iter()
            .map(|(word, _)| word)
            .collect();
        expected.sort();
        found.sort();

        prop_assert_eq!(found, expected);
    }

    // Property: a pattern without wildcards finds at most the word itself
    #[test]
    fn prop_literal_pattern_is_exact_lookup(
        pairs in word_frequency_strategy(),
        word in word_strategy(),
    ) {
        let trie = build(&pairs);
        let expected: Vec<WordFrequency> = trie
            .frequency(&word)
            .map(|frequency| (word.clone(), frequency))
            .into_iter()
            .collect();

        prop_assert_eq!(trie.wildcard_search(&word), expected);
    }

    // Property: the best match is the head of the full result list
    #[test]
    fn prop_best_match_is_first(
        pairs in word_frequency_strategy(),
        word in word_strategy(),
        mask in prop::collection::vec(any::<bool>(), 6),
    ) {
        let trie = build(&pairs);
        let pattern = pattern_from(&word, &mask);

        prop_assert_eq!(
            trie.best_match(&pattern),
            trie.wildcard_search(&pattern).into_iter().next()
        );
    }

    // Property: inserting then deleting a new word leaves the structure as it was
    #[test]
    fn prop_insert_delete_restores_structure(
        pairs in word_frequency_strategy(),
        word in word_strategy(),
        frequency in 0u64..50,
    ) {
        let mut trie = build(&pairs);
        prop_assume!(!trie.contains(&word));

        let before = trie.to_list();
        let nodes = trie.node_count();

        trie.insert(&word, frequency).unwrap();
        prop_assert!(trie.contains(&word));
        prop_assert!(trie.delete(&word));

        prop_assert_eq!(trie.to_list(), before);
        prop_assert_eq!(trie.node_count(), nodes);
        prop_assert!(!trie.delete(&word));
    }

    // Property: repeated inserts accumulate their increments
    #[test]
    fn prop_insert_accumulates(
        word in word_strategy(),
        increments in prop::collection::vec(0u64..100, 1..8),
    ) {
        let mut trie = FrequencyTrie::new();
        for increment in &increments {
            trie.insert(&word, *increment).unwrap();
        }

        prop_assert_eq!(trie.frequency(&word), Some(increments.iter().sum::<u64>()));
        prop_assert_eq!(trie.len(), 1);
    }

    // Property: confidences of a non-zero result set sum to 100
    #[test]
    fn prop_confidence_sums_to_hundred(
        pairs in word_frequency_strategy(),
        word in word_strategy(),
        mask in prop::collection::vec(any::<bool>(), 6),
    ) {
        let trie = build(&pairs);
        let candidates = trie.wildcard_search(pattern_from(&word, &mask));
        prop_assume!(candidates.iter().any(|(_, frequency)| *frequency > 0));

        let scored = ConfidenceScorer::default().score(&candidates).unwrap();
        let total: f64 = scored.iter().map(|candidate| candidate.confidence).sum();
        prop_assert!((total - 100.0).abs() < 1e-6);
    }
}
