//! Error types for sqlseam

use thiserror::Error;

/// Result type alias for sqlseam operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Error types for query building and decomposition
#[derive(Debug, Error)]
pub enum QueryError {
    /// A required clause scan found no match
    #[error("Clause not found: {clause}")]
    ClauseNotFound { clause: &'static str },

    /// A LIMIT/OFFSET span is not parseable as an integer
    #[error("Malformed numeric span: {span:?}")]
    MalformedNumeric { span: String },

    /// UPDATE or DELETE requested with no WHERE filter set
    #[error("No WHERE filter set; refusing to build a full-table mutation")]
    MissingFilter,

    /// Input shape outside the supported SQL subset
    #[error("Unsupported shape: {0}")]
    UnsupportedShape(String),

    /// Propagated executor failure
    #[error("Execution error: {0}")]
    Execution(String),
}

impl QueryError {
    /// Create a clause-not-found error for a named clause
    pub fn clause_not_found(clause: &'static str) -> Self {
        Self::ClauseNotFound { clause }
    }

    /// Create a malformed-numeric error for a scanned span
    pub fn malformed_numeric(span: impl Into<String>) -> Self {
        Self::MalformedNumeric { span: span.into() }
    }

    /// Create an unsupported-shape error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedShape(message.into())
    }

    /// Check if this is a clause-not-found error
    pub fn is_clause_not_found(&self) -> bool {
        matches!(self, Self::ClauseNotFound { .. })
    }

    /// Check if this is a missing-filter error
    pub fn is_missing_filter(&self) -> bool {
        matches!(self, Self::MissingFilter)
    }

    /// Check if this is an unsupported-shape error
    pub fn is_unsupported_shape(&self) -> bool {
        matches!(self, Self::UnsupportedShape(_))
    }
}
