//! Ranked prefix completion over a vocabulary of scored phrases.
//!
//! # Overview
//!
//! The crate is built around [`PrefixIndex`], an in-memory character tree in
//! which every node keeps a bounded, score-sorted shortlist of the phrases
//! passing through it. A lookup descends along the query's characters and
//! collects shortlists breadth-first, so its cost does not depend on the size
//! of the vocabulary.
//!
//! Around the engine:
//!
//! - [`SharedPrefixIndex`]: rebuild-and-swap holder for concurrent readers.
//! - [`Suggester`]: request-level policy (empty and very short queries,
//!   fallback) producing serializable [`Suggestions`].
//! - [`seed`]: loading `(phrase, score)` pairs from JSON.
//!
//! Matching is case-insensitive (see [`collation`]); phrases are returned with
//! their original casing.
//!
//! # Quick Start
//!
//! ```rust
//! use quicksuggest_index::PrefixIndex;
//!
//! let index = PrefixIndex::from_entries([
//!     ("How do I connect my domain?", 0.9),
//!     ("How do I set up Services?", 0.95),
//!     ("How to configure settings?", 0.8),
//! ])
//! .unwrap();
//!
//! let results = index.search_prefix("how do", 5).unwrap();
//! assert_eq!(&*results[0], "How do I set up Services?");
//! assert_eq!(&*results[1], "How do I connect my domain?");
//! ```

pub mod collation;
pub mod config;
pub mod node;
pub mod prefix_index;
pub mod seed;
pub mod shared;
pub mod suggester;

pub use config::SuggesterConfig;
pub use node::{NodeId, NodeStore, SHORTLIST_CAPACITY};
pub use prefix_index::{IndexStats, PrefixIndex};
pub use seed::{SeedEntry, load_seed_file, parse_seed, read_seed};
pub use shared::SharedPrefixIndex;
pub use suggester::{Suggester, Suggestions};
