//! Ranked prefix index over a vocabulary of scored phrases.
//!
//! # Structure
//!
//! Phrases are stored once in a phrase table together with their latest score.
//! The character tree additionally keeps, at every node, a bounded shortlist of
//! the best phrases passing through that node. The same phrase therefore
//! appears in the shortlist of each of its ancestors: this duplication is what
//! lets a prefix lookup read a handful of shortlists instead of scanning the
//! subtree.
//!
//! # Ranking trade-off
//!
//! Shortlists are capped at [`SHORTLIST_CAPACITY`] entries. A legitimate match
//! whose score falls outside the top entries of every node it passes through
//! is not returned. Results are ranked within each node and only
//! approximately across nodes: nodes closer to the end of the prefix are
//! consulted first.

use std::collections::VecDeque;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use quicksuggest_common::{Result, verify_arg};

use crate::collation;
use crate::node::{NodeId, NodeStore, PhraseId, SHORTLIST_CAPACITY};

/// A phrase as stored in the phrase table.
#[derive(Debug, Clone)]
struct PhraseRecord {
    text: Arc<str>,
    score: f64,
}

/// Summary of an index's size and shape.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of distinct phrases.
    pub phrases: usize,
    /// Number of tree nodes, including the root.
    pub nodes: usize,
    /// Number of nodes where at least one phrase ends.
    pub terminal_nodes: usize,
    /// Length, in characters, of the longest indexed phrase.
    pub max_depth: usize,
}

/// In-memory prefix completion index.
///
/// Built once by a single writer (see [`PrefixIndex::insert`] and
/// [`PrefixIndex::from_entries`]), then queried through `&self` from any number
/// of threads. Lookups never mutate the index.
#[derive(Debug, Default)]
pub struct PrefixIndex {
    nodes: NodeStore,
    /// Phrase table in first-insertion order.
    phrases: Vec<PhraseRecord>,
    /// Exact (case-preserving) phrase text to its slot in `phrases`.
    by_text: AHashMap<Arc<str>, PhraseId>,
}

impl PrefixIndex {
    /// Creates an empty index.
    pub fn new() -> PrefixIndex {
        PrefixIndex::default()
    }

    /// Builds an index by inserting `entries` in the given order.
    ///
    /// Later duplicates override the score of earlier ones. The first invalid
    /// entry aborts the build.
    pub fn from_entries<I, S>(entries: I) -> Result<PrefixIndex>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut index = PrefixIndex::new();
        index.extend(entries)?;
        Ok(index)
    }

    /// Inserts `entries` in the given order, stopping at the first invalid one.
    ///
    /// Entries inserted before the failure remain in the index.
    pub fn extend<I, S>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut count = 0usize;
        for (phrase, score) in entries {
            self.insert(phrase.as_ref(), score)?;
            count += 1;
        }
        log::debug!(
            "prefix index: loaded {count} entries ({} phrases, {} nodes)",
            self.phrases.len(),
            self.nodes.len()
        );
        Ok(())
    }

    /// Inserts a phrase, or updates the score of an already inserted phrase.
    ///
    /// The phrase is offered to the shortlist of every node on its folded
    /// character path, not only to its terminal node.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if `phrase` is empty or `score` is not
    /// a finite number.
    pub fn insert(&mut self, phrase: &str, score: f64) -> Result<()> {
        verify_arg!(phrase, !phrase.is_empty());
        verify_arg!(score, score.is_finite());

        let id = self.record_phrase(phrase, score);

        let mut node = NodeId::ROOT;
        for ch in collation::fold(phrase) {
            node = self.nodes.get_or_create_child(node, ch);
            self.nodes.node_mut(node).shortlist_mut().offer(id, score);
        }
        self.nodes.node_mut(node).set_terminal();
        Ok(())
    }

    /// Returns up to `limit` phrases that case-insensitively start with `prefix`.
    ///
    /// The subtree below the prefix is visited breadth-first, and each node
    /// contributes its shortlist in score order, skipping phrases already
    /// returned. An empty prefix or a prefix with no matching path yields an
    /// empty result.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if `limit` is zero.
    pub fn search_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<Arc<str>>> {
        verify_arg!(limit, limit > 0);
        if prefix.is_empty() {
            return Ok(Vec::new());
        }
        let Some(start) = self.find_node(prefix) else {
            return Ok(Vec::new());
        };

        let mut results = Vec::with_capacity(limit.min(SHORTLIST_CAPACITY));
        let mut emitted = AHashSet::new();
        let mut queue = VecDeque::from([start]);

        while let Some(id) = queue.pop_front() {
            let node = self.nodes.node(id);
            for entry in node.shortlist().entries() {
                let text = &self.phrases[entry.phrase.index()].text;
                if !emitted.contains(&entry.phrase) && collation::starts_with(text, prefix) {
                    emitted.insert(entry.phrase);
                    results.push(Arc::clone(text));
                    if results.len() == limit {
                        return Ok(results);
                    }
                }
            }
            queue.extend(node.children().iter().map(|&(_, child)| child));
        }
        Ok(results)
    }

    /// Returns the latest score recorded for the exact phrase, if present.
    pub fn score(&self, phrase: &str) -> Option<f64> {
        self.by_text
            .get(phrase)
            .map(|id| self.phrases[id.index()].score)
    }

    /// Whether the exact phrase has been inserted.
    pub fn contains(&self, phrase: &str) -> bool {
        self.by_text.contains_key(phrase)
    }

    /// Number of distinct phrases.
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Phrases with their latest scores, in first-insertion order.
    pub fn phrases(&self) -> impl Iterator<Item = (&Arc<str>, f64)> + '_ {
        self.phrases.iter().map(|r| (&r.text, r.score))
    }

    pub fn node_store(&self) -> &NodeStore {
        &self.nodes
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            phrases: self.phrases.len(),
            nodes: self.nodes.len(),
            terminal_nodes: self.nodes.iter().filter(|n| n.is_terminal()).count(),
            max_depth: self.max_depth(),
        }
    }

    /// Descends the tree along the folded characters of `prefix`.
    fn find_node(&self, prefix: &str) -> Option<NodeId> {
        collation::fold(prefix).try_fold(NodeId::ROOT, |node, ch| self.nodes.get_child(node, ch))
    }

    /// Records `phrase -> score` in the phrase table, returning the phrase id.
    fn record_phrase(&mut self, phrase: &str, score: f64) -> PhraseId {
        if let Some(&id) = self.by_text.get(phrase) {
            self.phrases[id.index()].score = score;
            return id;
        }
        let id = PhraseId(u32::try_from(self.phrases.len()).expect("phrase table exhausted"));
        let text: Arc<str> = Arc::from(phrase);
        self.by_text.insert(Arc::clone(&text), id);
        self.phrases.push(PhraseRecord { text, score });
        id
    }

    fn max_depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(NodeId::ROOT, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(
                self.nodes
                    .node(id)
                    .children()
                    .iter()
                    .map(|&(_, child)| (child, depth + 1)),
            );
        }
        max_depth
    }
}
