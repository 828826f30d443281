use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of bases kept fixed at each end of a query
pub const DEFAULT_FLANKING_SIZE: usize = 1;

/// Default number of simultaneous wildcard positions per pattern
pub const DEFAULT_NUM_AMBIGUITIES: usize = 3;

/// Default number of patterns reported per query
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Per-query analysis parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    pub flanking_size: usize,
    pub num_ambiguities: usize,
    pub top_n: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            flanking_size: DEFAULT_FLANKING_SIZE,
            num_ambiguities: DEFAULT_NUM_AMBIGUITIES,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Full run configuration, loadable from JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Bases at each end of a query excluded from wildcard placement
    pub flanking_size: usize,

    /// Number of wildcard positions per pattern (k)
    pub num_ambiguities: usize,

    /// Results retained per query
    pub top_n: usize,

    /// Number of corpus shards; defaults to the available compute units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shards: Option<usize>,

    /// Size of the query worker pool; defaults to the available parallelism
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            flanking_size: DEFAULT_FLANKING_SIZE,
            num_ambiguities: DEFAULT_NUM_AMBIGUITIES,
            top_n: DEFAULT_TOP_N,
            shards: None,
            workers: None,
        }
    }
}

impl SearchConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file cannot be read or
    /// `ConfigError::ParseError` if it is not valid JSON for this schema.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a configuration from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check values that can never produce a useful run
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `top_n` is zero or the worker pool
    /// is explicitly sized to zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".to_string()));
        }
        if self.workers == Some(0) {
            return Err(ConfigError::Invalid(
                "workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn params(&self) -> SearchParams {
        SearchParams {
            flanking_size: self.flanking_size,
            num_ambiguities: self.num_ambiguities,
            top_n: self.top_n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.flanking_size, 1);
        assert_eq!(config.num_ambiguities, 3);
        assert_eq!(config.top_n, 5);
        assert!(config.shards.is_none());
        assert_eq!(config.params(), SearchParams::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SearchConfig::from_json(r#"{"num_ambiguities": 2, "shards": 4}"#).unwrap();
        assert_eq!(config.num_ambiguities, 2);
        assert_eq!(config.shards, Some(4));
        assert_eq!(config.flanking_size, DEFAULT_FLANKING_SIZE);
        assert_eq!(config.top_n, DEFAULT_TOP_N);
    }

    #[test]
    fn test_load_from_file() {
        let mut temp = NamedTempFile::with_suffix(".json").unwrap();
        temp.write_all(br#"{"flanking_size": 3, "top_n": 10, "workers": 2}"#)
            .unwrap();
        temp.flush().unwrap();

        let config = SearchConfig::load_from_file(temp.path()).unwrap();
        assert_eq!(config.flanking_size, 3);
        assert_eq!(config.top_n, 10);
        assert_eq!(config.workers, Some(2));
    }

    #[test]
    fn test_malformed_json() {
        let result = SearchConfig::from_json("{not json");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validate() {
        assert!(SearchConfig::default().validate().is_ok());

        let zero_top = SearchConfig {
            top_n: 0,
            ..SearchConfig::default()
        };
        assert!(matches!(zero_top.validate(), Err(ConfigError::Invalid(_))));

        let zero_workers = SearchConfig {
            workers: Some(0),
            ..SearchConfig::default()
        };
        assert!(zero_workers.validate().is_err());
    }
}
