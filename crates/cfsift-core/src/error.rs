//! Error types for cfsift

use thiserror::Error;

/// Main error type for cfsift operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CfSiftError {
    /// A rule, schema or filter setting is malformed.
    ///
    /// Raised at construction time; never recovered internally.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An instance does not match the feature schema, or an original and a
    /// candidate carry different feature sets.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// A batch (or one of its queries) has no candidates to filter.
    #[error("Empty batch: {}", describe_empty(.query))]
    EmptyBatch {
        /// Index of the offending query, `None` when the batch itself is empty.
        query: Option<usize>,
    },
}

fn describe_empty(query: &Option<usize>) -> String {
    match query {
        Some(q) => format!("query {q} has no candidates"),
        None => "batch contains no queries".to_string(),
    }
}

impl CfSiftError {
    /// Shorthand for a [`CfSiftError::Configuration`] error.
    pub fn config(msg: impl Into<String>) -> Self {
        CfSiftError::Configuration(msg.into())
    }

    /// Shorthand for a [`CfSiftError::SchemaMismatch`] error.
    pub fn schema(msg: impl Into<String>) -> Self {
        CfSiftError::SchemaMismatch(msg.into())
    }
}

/// Result type alias for cfsift operations
pub type Result<T> = std::result::Result<T, CfSiftError>;
