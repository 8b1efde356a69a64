//! Error types for reference table loading.

use thiserror::Error;

/// Errors that can occur when loading the reference tables.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Failed to parse a CSV table.
    #[error("Failed to parse CSV {file}: {message}")]
    CsvParse { file: String, message: String },

    /// A row is missing a required value.
    #[error("Missing {field} on line {line} of {file}")]
    MissingValue {
        field: &'static str,
        line: u64,
        file: String,
    },

    /// The same category label was declared with two Nepali labels.
    #[error("Category '{name}' declared with conflicting Nepali labels in {file}")]
    ConflictingCategory { name: String, file: String },
}

/// Result type for reference table loading.
pub type Result<T> = std::result::Result<T, StandardsError>;
