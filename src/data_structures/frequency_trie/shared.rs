//! Reader/writer-locked handle around a [`FrequencyTrie`].
//!
//! The trie itself has no internal locking. This handle serialises writers
//! and lets queries run in parallel. Bulk loads build the replacement tree
//! outside the lock and swap it in only once it is complete.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{FrequencyTrie, FrequencyTrieConfig, FrequencyTrieResult, WordFrequency};

/// Cloneable, thread-safe handle to a single frequency trie.
#[derive(Debug, Clone, Default)]
pub struct SharedFrequencyTrie {
    inner: Arc<RwLock<FrequencyTrie>>,
}

impl SharedFrequencyTrie {
    /// Wraps an existing trie.
    pub fn new(trie: FrequencyTrie) -> Self {
        Self {
            inner: Arc::new(RwLock::new(trie)),
        }
    }

    /// Acquires shared read access.
    pub fn read(&self) -> RwLockReadGuard<'_, FrequencyTrie> {
        self.inner.read()
    }

    /// Acquires exclusive write access.
    pub fn write(&self) -> RwLockWriteGuard<'_, FrequencyTrie> {
        self.inner.write()
    }

    /// Inserts `word` under the write lock.
    pub fn insert(&self, word: &str, frequency_increment: u64) -> FrequencyTrieResult<()> {
        self.inner.write().insert(word, frequency_increment)
    }

    /// Removes `word` under the write lock.
    pub fn delete(&self, word: &str) -> bool {
        self.inner.write().delete(word)
    }

    /// Checks for `word` under a read lock.
    pub fn contains(&self, word: &str) -> bool {
        self.inner.read().contains(word)
    }

    /// Runs a wildcard search under a read lock.
    pub fn wildcard_search(&self, pattern: &str) -> Vec<WordFrequency> {
        self.inner.read().wildcard_search(pattern)
    }

    /// Returns the best match under a read lock.
    pub fn best_match(&self, pattern: &str) -> Option<WordFrequency> {
        self.inner.read().best_match(pattern)
    }

    /// Replaces the trie contents.
    ///
    /// The new tree is built without holding any lock; readers keep seeing
    /// the previous contents until the swap. On error nothing changes.
    pub fn load_from_pairs<I, W>(&self, pairs: I) -> FrequencyTrieResult<()>
    where
        I: IntoIterator<Item = (W, u64)>,
        W: AsRef<str>,
    {
        let config: FrequencyTrieConfig = self.inner.read().config().clone();
        let fresh = FrequencyTrie::build_from_pairs(config, pairs)?;
        *self.inner.write() = fresh;
        Ok(())
    }

    /// Returns a point-in-time copy of every stored word.
    pub fn to_list(&self) -> Vec<WordFrequency> {
        self.inner.read().to_list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    /// Concurrent writers on disjoint words while readers query the same trie.
    #[test]
    fn test_shared_trie_concurrency() {
        const THREAD_COUNT: usize = 8;
        const WORDS_PER_THREAD: usize = 50;

        let trie = SharedFrequencyTrie::default();
        let barrier = Arc::new(std::sync::Barrier::new(THREAD_COUNT * 2));

        let mut handles = Vec::with_capacity(THREAD_COUNT * 2);
        for thread_id in 0..THREAD_COUNT {
            let writer = trie.clone();
            let writer_barrier = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                writer_barrier.wait();
                for j in 0..WORDS_PER_THREAD {
                    let word = format!("w{}x{}", thread_id, j);
                    writer.insert(&word, 1).unwrap();
                }
            }));

            let reader = trie.clone();
            let reader_barrier = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                reader_barrier.wait();
                for _ in 0..WORDS_PER_THREAD {
                    let matches = reader.wildcard_search("w*x*");
                    assert!(matches.windows(2).all(|pair| pair[0].1 >= pair[1].1));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(trie.read().len(), THREAD_COUNT * WORDS_PER_THREAD);

        let half: Vec<String> = (0..WORDS_PER_THREAD)
            .map(|j| format!("w0x{}", j))
            .collect();
        for word in &half {
            assert!(trie.delete(word));
        }
        assert_eq!(trie.read().len(), (THREAD_COUNT - 1) * WORDS_PER_THREAD);
        assert!(!trie.contains("w0x1"));
        assert!(trie.contains("w1x1"));
    }

    #[test]
    fn test_shared_load_swaps_atomically() {
        let trie = SharedFrequencyTrie::default();
        trie.insert("old", 1).unwrap();

        assert!(trie.load_from_pairs(vec![("new", 2), ("", 1)]).is_err());
        assert_eq!(trie.to_list(), vec![("old".to_string(), 1)]);

        trie.load_from_pairs(vec![("new", 2)]).unwrap();
        assert_eq!(trie.to_list(), vec![("new".to_string(), 2)]);
        assert_eq!(trie.best_match("n*w"), Some(("new".to_string(), 2)));
    }
}
