//! Error types for liteorm

use thiserror::Error;

/// Result type alias for liteorm operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for mapper operations
#[derive(Debug, Error)]
pub enum OrmError {
    /// Model descriptor is malformed (bad table/column identifiers)
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Model descriptor declares no `id` column
    #[error("Model has no id column")]
    MissingIdField,

    /// Single-row fetch matched no rows
    #[error("Not found")]
    NotFound,

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(#[source] rusqlite::Error),

    /// Failed to begin a transaction
    #[error("Failed to begin transaction: {0}")]
    Begin(#[source] rusqlite::Error),

    /// Failed to prepare a statement
    #[error("Failed to prepare statement: {0}")]
    Prepare(#[source] rusqlite::Error),

    /// Failed to execute a statement
    #[error("Failed to execute statement: {0}")]
    Execute(#[source] rusqlite::Error),

    /// Failed to scan a row column into a model field
    #[error("Failed to scan column '{column}': {source}")]
    Scan {
        column: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// A write touched an unexpected number of rows
    #[error("Expected one row to be affected, got {got}")]
    RowsAffected { got: usize },

    /// Failed to commit a transaction
    #[error("Failed to commit transaction: {0}")]
    Commit(#[source] rusqlite::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl OrmError {
    /// Create an invalid-model error
    pub fn invalid_model(message: impl Into<String>) -> Self {
        Self::InvalidModel(message.into())
    }

    /// Create a scan error for a specific column
    pub fn scan(column: &'static str, source: rusqlite::Error) -> Self {
        Self::Scan { column, source }
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Check if this is an invalid-model error
    pub fn is_invalid_model(&self) -> bool {
        matches!(self, Self::InvalidModel(_))
    }

    /// Check if this is a missing-id-field error
    pub fn is_missing_id_field(&self) -> bool {
        matches!(self, Self::MissingIdField)
    }
}
