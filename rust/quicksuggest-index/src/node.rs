//! Node store: the character-keyed tree behind the prefix index.
//!
//! Nodes live in a single arena and are addressed by [`NodeId`]. The store only
//! knows how to find and create children; ranking decisions are made by the
//! [`PrefixIndex`](crate::PrefixIndex) through each node's [`Shortlist`].

use ahash::AHashMap;
use tinyvec::ArrayVec;

/// Maximum number of phrases retained in a single node's shortlist.
pub const SHORTLIST_CAPACITY: usize = 15;

/// Identifier of a node within a [`NodeStore`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node, created together with the store.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// # Panics
    ///
    /// Panics when the store grows past `u32::MAX` nodes. This is treated like
    /// allocation exhaustion: fatal, never retried.
    fn from_index(index: usize) -> NodeId {
        let id = u32::try_from(index).expect("node store exhausted");
        NodeId(id)
    }
}

/// Identifier of a phrase within the owning index's phrase table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhraseId(pub(crate) u32);

impl PhraseId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A phrase and the score it was ranked with.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ShortlistEntry {
    pub phrase: PhraseId,
    pub score: f64,
}

/// Bounded list of the best phrases reachable through a node.
///
/// Entries are kept sorted by score, descending. Entries with equal scores keep
/// their arrival order. The list never holds more than [`SHORTLIST_CAPACITY`]
/// entries and never holds the same phrase twice.
#[derive(Debug, Default, Clone)]
pub struct Shortlist {
    entries: ArrayVec<[ShortlistEntry; SHORTLIST_CAPACITY]>,
}

impl Shortlist {
    pub fn entries(&self) -> &[ShortlistEntry] {
        self.entries.as_slice()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, phrase: PhraseId) -> bool {
        self.entries.iter().any(|e| e.phrase == phrase)
    }

    /// Offers a phrase to the shortlist.
    ///
    /// - A phrase already present with the same score leaves the list unchanged.
    /// - A phrase already present with a different score is re-ranked with the
    ///   new score (it may fall off the end of a full list).
    /// - A new phrase is placed after all entries with a greater or equal score.
    ///   When the list is full, the lowest entry is evicted, unless the new
    ///   phrase would itself be the lowest, in which case it is dropped.
    ///
    /// Returns `true` if the list changed.
    pub fn offer(&mut self, phrase: PhraseId, score: f64) -> bool {
        let mut changed = false;
        if let Some(pos) = self.entries.iter().position(|e| e.phrase == phrase) {
            if self.entries[pos].score == score {
                return false;
            }
            self.entries.remove(pos);
            changed = true;
        }

        let at = self
            .entries
            .iter()
            .position(|e| e.score < score)
            .unwrap_or(self.entries.len());
        if at >= SHORTLIST_CAPACITY {
            return changed;
        }
        if self.entries.len() == SHORTLIST_CAPACITY {
            self.entries.pop();
        }
        self.entries.insert(at, ShortlistEntry { phrase, score });
        true
    }
}

/// A single position in the character tree.
#[derive(Debug, Default)]
pub struct Node {
    /// Child links in first-insertion order.
    children: Vec<(char, NodeId)>,
    shortlist: Shortlist,
    is_terminal: bool,
}

impl Node {
    pub fn children(&self) -> &[(char, NodeId)] {
        &self.children
    }

    pub fn shortlist(&self) -> &Shortlist {
        &self.shortlist
    }

    pub fn shortlist_mut(&mut self) -> &mut Shortlist {
        &mut self.shortlist
    }

    /// Whether some inserted phrase ends exactly at this node.
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    pub fn set_terminal(&mut self) {
        self.is_terminal = true;
    }
}

/// Arena of tree nodes with an edge map for constant-time child lookup.
///
/// The root node always exists. Nodes are never removed.
#[derive(Debug)]
pub struct NodeStore {
    nodes: Vec<Node>,
    /// `(parent, char) -> child`. Child order is tracked separately in each node.
    edges: AHashMap<(NodeId, char), NodeId>,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore {
    /// Creates a store holding only an empty root node.
    pub fn new() -> NodeStore {
        NodeStore {
            nodes: vec![Node::default()],
            edges: AHashMap::default(),
        }
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A store is never empty: the root always exists.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn root(&self) -> &Node {
        &self.nodes[NodeId::ROOT.index()]
    }

    /// # Panics
    ///
    /// Panics if `id` was not produced by this store.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// # Panics
    ///
    /// Panics if `id` was not produced by this store.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Returns the child of `node` for `ch`, if any. Never mutates the store.
    pub fn get_child(&self, node: NodeId, ch: char) -> Option<NodeId> {
        self.edges.get(&(node, ch)).copied()
    }

    /// Returns the child of `node` for `ch`, creating an empty one if needed.
    pub fn get_or_create_child(&mut self, node: NodeId, ch: char) -> NodeId {
        if let Some(child) = self.get_child(node, ch) {
            return child;
        }
        let child = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node::default());
        self.edges.insert((node, ch), child);
        self.nodes[node.index()].children.push((ch, child));
        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(shortlist: &Shortlist) -> Vec<u32> {
        shortlist.entries().iter().map(|e| e.phrase.0).collect()
    }

    #[test]
    fn test_get_or_create_child() {
        let mut store = NodeStore::new();
        assert_eq!(store.len(), 1);
        assert!(store.get_child(NodeId::ROOT, 'a').is_none());

        let a = store.get_or_create_child(NodeId::ROOT, 'a');
        let b = store.get_or_create_child(NodeId::ROOT, 'b');
        assert_ne!(a, b);
        assert_eq!(store.get_or_create_child(NodeId::ROOT, 'a'), a);
        assert_eq!(store.get_child(NodeId::ROOT, 'a'), Some(a));
        assert_eq!(store.len(), 3);

        let ab = store.get_or_create_child(a, 'b');
        assert_eq!(store.get_child(a, 'b'), Some(ab));
        assert!(store.get_child(b, 'b').is_none());
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut store = NodeStore::new();
        for ch in ['z', 'a', 'm', 'a', 'b'] {
            store.get_or_create_child(NodeId::ROOT, ch);
        }
        let chars: Vec<char> = store.root().children().iter().map(|(c, _)| *c).collect();
        assert_eq!(chars, vec!['z', 'a', 'm', 'b']);
    }

    #[test]
    fn test_get_child_does_not_mutate() {
        let mut store = NodeStore::new();
        store.get_or_create_child(NodeId::ROOT, 'x');
        for ch in "abcdef".chars() {
            assert!(store.get_child(NodeId::ROOT, ch).is_none());
        }
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_shortlist_sorted_and_stable() {
        let mut shortlist = Shortlist::default();
        assert!(shortlist.offer(PhraseId(0), 0.5));
        assert!(shortlist.offer(PhraseId(1), 0.9));
        assert!(shortlist.offer(PhraseId(2), 0.5));
        assert!(shortlist.offer(PhraseId(3), 0.7));
        assert_eq!(ids(&shortlist), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_shortlist_same_phrase_same_score() {
        let mut shortlist = Shortlist::default();
        shortlist.offer(PhraseId(0), 0.5);
        shortlist.offer(PhraseId(1), 0.4);
        assert!(!shortlist.offer(PhraseId(0), 0.5));
        assert_eq!(ids(&shortlist), vec![0, 1]);
    }

    #[test]
    fn test_shortlist_rerank() {
        let mut shortlist = Shortlist::default();
        shortlist.offer(PhraseId(0), 0.5);
        shortlist.offer(PhraseId(1), 0.4);
        assert!(shortlist.offer(PhraseId(1), 0.6));
        assert_eq!(ids(&shortlist), vec![1, 0]);
        assert_eq!(shortlist.entries()[0].score, 0.6);
        assert_eq!(shortlist.len(), 2);
    }

    #[test]
    fn test_shortlist_capacity() {
        let mut shortlist = Shortlist::default();
        for i in 0..SHORTLIST_CAPACITY as u32 {
            assert!(shortlist.offer(PhraseId(i), 1.0 + i as f64));
        }
        assert_eq!(shortlist.len(), SHORTLIST_CAPACITY);

        // Lower than everything: dropped.
        assert!(!shortlist.offer(PhraseId(100), 0.5));
        // Equal to the lowest: placed after it, which is past the end.
        assert!(!shortlist.offer(PhraseId(101), 1.0));
        assert!(!shortlist.contains(PhraseId(101)));

        // Higher than the lowest: evicts it.
        assert!(shortlist.offer(PhraseId(102), 100.0));
        assert_eq!(shortlist.len(), SHORTLIST_CAPACITY);
        assert_eq!(shortlist.entries()[0].phrase, PhraseId(102));
        assert!(!shortlist.contains(PhraseId(0)));

        let scores: Vec<f64> = shortlist.entries().iter().map(|e| e.score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_shortlist_rerank_out_of_full_list() {
        let mut shortlist = Shortlist::default();
        for i in 0..SHORTLIST_CAPACITY as u32 {
            shortlist.offer(PhraseId(i), 10.0 + i as f64);
        }
        // Phrase 14 is at the top; demote it below everything.
        assert!(shortlist.offer(PhraseId(14), 1.0));
        assert_eq!(shortlist.len(), SHORTLIST_CAPACITY);
        assert_eq!(shortlist.entries().last().unwrap().phrase, PhraseId(14));
    }
}
