//! Inspect command implementation

use anyhow::{Context, Result};
use quicksuggest_index::{PrefixIndex, SHORTLIST_CAPACITY, SeedEntry, collation};
use serde::Serialize;

#[derive(Serialize)]
struct InspectSummary {
    seed_entries: usize,
    phrases: usize,
    duplicate_entries: usize,
    nodes: usize,
    terminal_nodes: usize,
    max_depth: usize,
    shortlist_capacity: usize,
    full_shortlists: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    entries: Vec<PhraseInfo>,
}

#[derive(Serialize)]
struct PhraseInfo {
    phrase: String,
    score: f64,
}

pub fn run(verbose: u8, seed: String) -> Result<()> {
    let entries = super::load_seed(&seed)?;
    let index = PrefixIndex::from_entries(entries.iter().map(SeedEntry::as_pair))
        .with_context(|| format!("Failed to build index from seed file: {seed}"))?;

    let summary = summarize(&index, entries.len(), verbose > 0);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn summarize(index: &PrefixIndex, seed_entries: usize, list_phrases: bool) -> InspectSummary {
    let stats = index.stats();
    let full_shortlists = index
        .node_store()
        .iter()
        .filter(|node| node.shortlist().len() == SHORTLIST_CAPACITY)
        .count();

    let mut entries = Vec::new();
    if list_phrases {
        entries = index
            .phrases()
            .map(|(phrase, score)| PhraseInfo {
                phrase: phrase.to_string(),
                score,
            })
            .collect();
        entries.sort_by(|a, b| collation::compare(&a.phrase, &b.phrase));
    }

    InspectSummary {
        seed_entries,
        phrases: stats.phrases,
        duplicate_entries: seed_entries - stats.phrases,
        nodes: stats.nodes,
        terminal_nodes: stats.terminal_nodes,
        max_depth: stats.max_depth,
        shortlist_capacity: SHORTLIST_CAPACITY,
        full_shortlists,
        entries,
    }
}
