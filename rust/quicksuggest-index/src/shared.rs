//! Rebuild-and-swap holder for a prefix index shared by concurrent readers.
//!
//! Readers take a short read lock only to clone the current `Arc`, then search
//! without holding any lock. A refresh builds a complete replacement index off
//! the read path and swaps the `Arc` under the write lock, so a reader always
//! sees either the old index or the new one, never a partially built tree.

use std::sync::{Arc, RwLock};

use quicksuggest_common::Result;

use crate::prefix_index::PrefixIndex;

#[derive(Debug)]
pub struct SharedPrefixIndex {
    current: RwLock<Arc<PrefixIndex>>,
}

impl Default for SharedPrefixIndex {
    fn default() -> Self {
        SharedPrefixIndex::new(PrefixIndex::new())
    }
}

impl From<PrefixIndex> for SharedPrefixIndex {
    fn from(index: PrefixIndex) -> Self {
        SharedPrefixIndex::new(index)
    }
}

impl SharedPrefixIndex {
    pub fn new(index: PrefixIndex) -> SharedPrefixIndex {
        SharedPrefixIndex {
            current: RwLock::new(Arc::new(index)),
        }
    }

    /// Builds a shared index from `(phrase, score)` pairs.
    pub fn from_entries<I, S>(entries: I) -> Result<SharedPrefixIndex>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        PrefixIndex::from_entries(entries).map(SharedPrefixIndex::new)
    }

    /// Returns the index currently used by readers.
    ///
    /// The snapshot stays valid, and unchanged, after later swaps.
    pub fn snapshot(&self) -> Arc<PrefixIndex> {
        Arc::clone(&self.current.read().expect("read lock"))
    }

    /// Searches the current index. See [`PrefixIndex::search_prefix`].
    pub fn search_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<Arc<str>>> {
        self.snapshot().search_prefix(prefix, limit)
    }

    /// Builds a new index from `entries` and swaps it in.
    ///
    /// If any entry is invalid, the error is returned and the active index is
    /// left untouched.
    pub fn rebuild<I, S>(&self, entries: I) -> Result<Arc<PrefixIndex>>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let index = PrefixIndex::from_entries(entries)?;
        Ok(self.replace(index))
    }

    /// Swaps in an already built index, returning the previous one.
    pub fn replace(&self, index: PrefixIndex) -> Arc<PrefixIndex> {
        let index = Arc::new(index);
        let stats = index.stats();
        let previous = std::mem::replace(&mut *self.current.write().expect("write lock"), index);
        log::info!(
            "prefix index swapped: {} phrases, {} nodes (was {} phrases)",
            stats.phrases,
            stats.nodes,
            previous.len()
        );
        previous
    }
}
