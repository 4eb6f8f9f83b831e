//! Error types for excover

use thiserror::Error;

/// Main error type for excover operations
#[derive(Debug, Error)]
pub enum ExcoverError {
    /// Two candidate sets were registered under the same identifier
    #[error("duplicate candidate identifier: {id}")]
    DuplicateIdentifier {
        /// The identifier that appeared more than once.
        id: String,
    },

    /// Column ingestion was given columns of differing lengths
    #[error("column length mismatch: {ids} ids, {includes} include sets, {excludes} exclude sets")]
    ColumnLengthMismatch {
        ids: usize,
        includes: usize,
        excludes: usize,
    },

    /// The declared include universe is not fully reachable from the pool
    #[error("include universe is incomplete; unreachable elements: {missing:?}")]
    IncompleteUniverse {
        /// Universe elements no candidate contributes, sorted.
        missing: Vec<String>,
    },

    /// Error applying solver configuration
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for excover operations
pub type Result<T> = std::result::Result<T, ExcoverError>;
