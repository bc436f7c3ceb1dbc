//! Request-layer configuration for the [`Suggester`](crate::Suggester).

use std::path::Path;

use quicksuggest_common::{Result, error::Error, verify_arg};
use serde::{Deserialize, Serialize};

/// Default number of suggestions returned when the caller gives no limit.
pub const DEFAULT_LIMIT: usize = 20;

/// Queries with fewer characters than this are answered by a linear scan of the
/// phrase list instead of the tree.
pub const DEFAULT_MIN_INDEXED_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuggesterConfig {
    /// Number of suggestions returned when the caller gives no limit.
    pub default_limit: usize,
    /// Minimum query length, in characters, answered through the prefix tree.
    pub min_indexed_query_chars: usize,
}

impl Default for SuggesterConfig {
    fn default() -> Self {
        SuggesterConfig {
            default_limit: DEFAULT_LIMIT,
            min_indexed_query_chars: DEFAULT_MIN_INDEXED_QUERY_CHARS,
        }
    }
}

impl SuggesterConfig {
    pub fn validate(&self) -> Result<()> {
        verify_arg!(default_limit, self.default_limit > 0);
        Ok(())
    }

    /// Parses and validates a JSON configuration. Missing fields take their
    /// default values.
    pub fn from_json(json: &str) -> Result<SuggesterConfig> {
        let config: SuggesterConfig =
            serde_json::from_str(json).map_err(|e| Error::invalid_format("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<SuggesterConfig> {
        let path = path.as_ref();
        let json =
            std::fs::read_to_string(path).map_err(|e| Error::io(path.display().to_string(), e))?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicksuggest_common::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = SuggesterConfig::default();
        assert_eq!(config.default_limit, 20);
        assert_eq!(config.min_indexed_query_chars, 2);
        assert!(config.validate().is_ok());
        assert_eq!(SuggesterConfig::from_json("{}").unwrap(), config);
    }

    #[test]
    fn test_partial_json() {
        let config = SuggesterConfig::from_json(r#"{"default_limit": 5}"#).unwrap();
        assert_eq!(config.default_limit, 5);
        assert_eq!(config.min_indexed_query_chars, 2);
    }

    #[test]
    fn test_invalid_config() {
        let err = SuggesterConfig::from_json(r#"{"default_limit": 0}"#).unwrap_err();
        assert!(err.is_invalid_arg());

        let err = SuggesterConfig::from_json(r#"{"limit": 5}"#).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidFormat { .. }));
    }
}
