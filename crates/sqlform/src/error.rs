//! Error types for sqlform

use thiserror::Error;

/// Result type alias for compose operations
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Validation failures detected before any SQL text is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// Table name is blank
    #[error("Table name is required")]
    MissingTable,

    /// SELECT (or filter-row generation) without a field list
    #[error("Fields are required")]
    MissingFields,

    /// INSERT/UPDATE without a field list or values
    #[error("Fields and values are required")]
    MissingFieldsOrValues,

    /// Query type token is not one of SELECT/INSERT/UPDATE/DELETE
    #[error("Invalid query type: {0:?}")]
    InvalidKind(String),

    /// Comparison operator is not one of `=`, `>`, `<`, `>=`, `<=`, `!=`
    #[error("Invalid comparison operator: {0:?}")]
    InvalidOperator(String),

    /// Sort direction is neither ASC nor DESC
    #[error("Invalid sort direction: {0:?}")]
    InvalidSortDirection(String),
}

impl ComposeError {
    /// Check if this error came from a missing required form value.
    pub fn is_missing_input(&self) -> bool {
        matches!(
            self,
            Self::MissingTable | Self::MissingFields | Self::MissingFieldsOrValues
        )
    }
}
