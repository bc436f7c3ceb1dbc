//! Request-level suggestion policy on top of the shared prefix index.
//!
//! The engine itself answers only non-empty prefixes. The suggester decides
//! what callers get for the other cases:
//!
//! - empty query: the first phrases in seed order;
//! - very short query: a linear case-insensitive scan of the phrases in seed
//!   order, which is cheap at one or two characters and avoids shortlist
//!   truncation near the root;
//! - anything longer: [`PrefixIndex::search_prefix`](crate::PrefixIndex::search_prefix).

use std::sync::Arc;
use std::time::Instant;

use quicksuggest_common::{Result, verify_arg};
use serde::Serialize;

use crate::collation;
use crate::config::SuggesterConfig;
use crate::prefix_index::PrefixIndex;
use crate::seed::SeedEntry;
use crate::shared::SharedPrefixIndex;

/// Message reported when suggestions come from the fallback path.
pub const FALLBACK_MESSAGE: &str = "Using fallback suggestions";

/// Response returned to the caller for a single suggestion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestions {
    pub suggestions: Vec<Arc<str>>,
    pub query: String,
    pub count: usize,
    /// Wall time spent answering the request, rounded to two decimals.
    pub processing_time_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct Suggester {
    index: SharedPrefixIndex,
    config: SuggesterConfig,
}

impl Suggester {
    pub fn new(index: SharedPrefixIndex, config: SuggesterConfig) -> Result<Suggester> {
        config.validate()?;
        Ok(Suggester { index, config })
    }

    /// Builds the index from seed entries, in order.
    pub fn from_seed(entries: &[SeedEntry], config: SuggesterConfig) -> Result<Suggester> {
        let index = SharedPrefixIndex::from_entries(entries.iter().map(SeedEntry::as_pair))?;
        Suggester::new(index, config)
    }

    pub fn config(&self) -> &SuggesterConfig {
        &self.config
    }

    pub fn index(&self) -> &SharedPrefixIndex {
        &self.index
    }

    /// Rebuilds the index from new seed entries and swaps it in. On error the
    /// current index keeps serving.
    pub fn refresh(&self, entries: &[SeedEntry]) -> Result<()> {
        self.index.rebuild(entries.iter().map(SeedEntry::as_pair))?;
        Ok(())
    }

    /// Answers a suggestion request.
    ///
    /// `limit` defaults to the configured default limit.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if `limit` is zero.
    pub fn suggest(&self, query: &str, limit: Option<usize>) -> Result<Suggestions> {
        let start = Instant::now();
        let limit = limit.unwrap_or(self.config.default_limit);
        verify_arg!(limit, limit > 0);

        let index = self.index.snapshot();
        let suggestions = if query.is_empty() {
            seed_head(&index, limit)
        } else if query.chars().count() < self.config.min_indexed_query_chars {
            index
                .phrases()
                .filter(|(text, _)| collation::starts_with(text, query))
                .map(|(text, _)| Arc::clone(text))
                .take(limit)
                .collect()
        } else {
            index.search_prefix(query, limit)?
        };

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        Ok(Suggestions {
            count: suggestions.len(),
            suggestions,
            query: query.to_string(),
            processing_time_ms: (elapsed_ms * 100.0).round() / 100.0,
            error: None,
        })
    }

    /// Answers a suggestion request, degrading to the first seed phrases if the
    /// request fails.
    pub fn suggest_or_fallback(&self, query: &str, limit: Option<usize>) -> Suggestions {
        match self.suggest(query, limit) {
            Ok(suggestions) => suggestions,
            Err(e) => {
                log::warn!("suggestions for '{query}' failed: {e}");
                let limit = limit.unwrap_or(self.config.default_limit);
                let suggestions = seed_head(&self.index.snapshot(), limit);
                Suggestions {
                    count: suggestions.len(),
                    suggestions,
                    query: query.to_string(),
                    processing_time_ms: 0.0,
                    error: Some(FALLBACK_MESSAGE.to_string()),
                }
            }
        }
    }
}

fn seed_head(index: &PrefixIndex, limit: usize) -> Vec<Arc<str>> {
    index
        .phrases()
        .take(limit)
        .map(|(text, _)| Arc::clone(text))
        .collect()
}
