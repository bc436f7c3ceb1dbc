//! Loading of the `(phrase, score)` vocabulary from JSON.
//!
//! The seed is a JSON array. Each item is either an object
//! `{"phrase": "...", "score": 0.9}` or a two-element array `["...", 0.9]`.
//! Entries are returned in file order, duplicates included: later duplicates
//! override earlier scores once inserted into an index.

use std::io::Read;
use std::path::Path;

use quicksuggest_common::{Result, error::Error};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedEntry {
    pub phrase: String,
    pub score: f64,
}

impl SeedEntry {
    pub fn new(phrase: impl Into<String>, score: f64) -> SeedEntry {
        SeedEntry {
            phrase: phrase.into(),
            score,
        }
    }

    pub fn as_pair(&self) -> (&str, f64) {
        (&self.phrase, self.score)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeedItem {
    Entry(SeedEntry),
    Pair(String, f64),
}

impl From<SeedItem> for SeedEntry {
    fn from(item: SeedItem) -> Self {
        match item {
            SeedItem::Entry(entry) => entry,
            SeedItem::Pair(phrase, score) => SeedEntry { phrase, score },
        }
    }
}

/// Parses seed entries from a JSON string.
pub fn parse_seed(json: &str) -> Result<Vec<SeedEntry>> {
    let items: Vec<SeedItem> =
        serde_json::from_str(json).map_err(|e| Error::invalid_format("seed", e.to_string()))?;
    Ok(items.into_iter().map(SeedEntry::from).collect())
}

/// Reads seed entries from a JSON reader.
pub fn read_seed<R: Read>(mut reader: R) -> Result<Vec<SeedEntry>> {
    let mut json = String::new();
    reader
        .read_to_string(&mut json)
        .map_err(|e| Error::io("seed", e))?;
    parse_seed(&json)
}

/// Reads seed entries from a JSON file.
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<Vec<SeedEntry>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| Error::io(path.display().to_string(), e))?;
    let entries = parse_seed(&json)?;
    log::debug!("loaded {} seed entries from {}", entries.len(), path.display());
    Ok(entries)
}
