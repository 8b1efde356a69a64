//! Error types for mapping operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from editing a mapping set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MappingError {
    /// The column was never seen in any upload of the dataset.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// The dataset identifier cannot be used as a file name.
    #[error("Invalid dataset id '{0}'")]
    InvalidDatasetId(String),
}

/// Errors from the on-disk mapping repository.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RepositoryError {
    /// File I/O error.
    #[error("Failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored file could not be parsed or written as JSON.
    #[error("Invalid JSON in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The stored file was written by a newer format revision.
    #[error("{path} uses format version {found}, expected {expected}")]
    UnsupportedVersion {
        path: PathBuf,
        found: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
