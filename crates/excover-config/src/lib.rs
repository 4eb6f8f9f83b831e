//! Configuration system for excover.
//!
//! Load solver configuration from TOML or YAML files to control the
//! selection budget and scoring parallelism without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use excover_config::{ScoreThreadCount, SolverConfig};
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     selection_limit = 25
//!
//!     [score_thread_count]
//!     count = 4
//! "#).unwrap();
//!
//! assert_eq!(config.selection_limit, Some(25));
//! assert_eq!(config.score_thread_count, ScoreThreadCount::Count(4));
//! ```
//!
//! Use default config when the file is missing:
//!
//! ```
//! use excover_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Maximum number of candidate sets to accept into the solution.
    /// Unset means unbounded: solve until covered or pool exhausted.
    #[serde(default)]
    pub selection_limit: Option<u64>,

    /// Number of threads for parallel candidate scoring.
    #[serde(default)]
    pub score_thread_count: ScoreThreadCount,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the selection budget.
    pub fn with_selection_limit(mut self, limit: u64) -> Self {
        self.selection_limit = Some(limit);
        self
    }

    /// Sets the scoring thread count.
    pub fn with_score_thread_count(mut self, threads: ScoreThreadCount) -> Self {
        self.score_thread_count = threads;
        self
    }

    /// Checks the configuration for values that parse but cannot run.
    ///
    /// # Examples
    ///
    /// ```
    /// use excover_config::{ScoreThreadCount, SolverConfig};
    ///
    /// let config = SolverConfig::new().with_score_thread_count(ScoreThreadCount::Count(0));
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.score_thread_count == ScoreThreadCount::Count(0) {
            return Err(ConfigError::Invalid(
                "score_thread_count.count must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Scoring thread count configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreThreadCount {
    /// Automatically determine thread count.
    #[default]
    Auto,

    /// No parallel scoring; evaluate candidates sequentially.
    None,

    /// Specific number of threads.
    Count(usize),
}
