//! Command implementations for quicksuggest-cmd

use anyhow::{Context, Result};
use quicksuggest_index::{SeedEntry, Suggester, SuggesterConfig, load_seed_file};

pub mod inspect;
pub mod suggest;

/// Loads seed entries, attaching the path to any error.
pub fn load_seed(path: &str) -> Result<Vec<SeedEntry>> {
    load_seed_file(path).with_context(|| format!("Failed to load seed file: {path}"))
}

/// Loads the optional configuration file, falling back to defaults.
pub fn load_config(path: Option<&str>) -> Result<SuggesterConfig> {
    match path {
        Some(path) => SuggesterConfig::load(path)
            .with_context(|| format!("Failed to load configuration: {path}")),
        None => Ok(SuggesterConfig::default()),
    }
}

/// Builds a suggester from a seed file and an optional configuration file.
pub fn build_suggester(seed: &str, config: Option<&str>) -> Result<Suggester> {
    let config = load_config(config)?;
    let entries = load_seed(seed)?;
    Suggester::from_seed(&entries, config)
        .with_context(|| format!("Failed to build index from seed file: {seed}"))
}
