//! Suggest command implementation

use std::fmt::Write;

use anyhow::Result;
use quicksuggest_index::Suggestions;

pub fn run(
    seed: String,
    config: Option<String>,
    limit: Option<usize>,
    json: bool,
    queries: Vec<String>,
) -> Result<()> {
    let suggester = super::build_suggester(&seed, config.as_deref())?;

    for query in &queries {
        let response = suggester.suggest_or_fallback(query, limit);
        print!("{}", format_response(&response, json)?);
    }
    Ok(())
}

/// Renders a response either as pretty JSON or as a numbered list.
fn format_response(response: &Suggestions, json: bool) -> Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(response)?));
    }

    let mut out = format!(
        "{:?}: {} suggestion(s) in {:.2} ms\n",
        response.query, response.count, response.processing_time_ms
    );
    if let Some(error) = &response.error {
        writeln!(out, "  ({error})")?;
    }
    for (i, suggestion) in response.suggestions.iter().enumerate() {
        writeln!(out, "  {:>2}. {suggestion}", i + 1)?;
    }
    Ok(out)
}
