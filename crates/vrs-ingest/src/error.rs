//! Error types for voter roll ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while validating or decoding an upload.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    // === File System Errors ===
    /// Upload not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the upload.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Validation Errors ===
    /// Upload exceeds the size limit.
    #[error("{path} is {size} bytes, larger than the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// The extension does not name a supported format.
    #[error("unsupported file type for {path}; expected .csv, .xlsx or .json")]
    UnsupportedFormat { path: PathBuf },

    /// File content does not match its declared format.
    #[error("{path} is not a valid {format} file")]
    InvalidSignature { path: PathBuf, format: &'static str },

    /// Text upload in an encoding other than UTF-8.
    #[error("{path} is encoded as {encoding}; only UTF-8 is supported")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// Text upload with NUL bytes, usually a binary file renamed.
    #[error("{path} contains NUL bytes")]
    ContainsNul { path: PathBuf },

    /// No header row was found.
    #[error("{path} has no header row")]
    MissingHeader { path: PathBuf },

    /// Too many data rows.
    #[error("{path} has {rows} data rows, more than the limit of {max_rows}")]
    TooManyRows {
        path: PathBuf,
        rows: usize,
        max_rows: usize,
    },

    /// A cell is longer than allowed.
    #[error("{path}: cell at row {row}, column {column} has {length} characters (limit {max_length})")]
    FieldTooLong {
        path: PathBuf,
        row: usize,
        column: usize,
        length: usize,
        max_length: usize,
    },

    // === Decoding Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to read a workbook.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// The requested worksheet does not exist.
    #[error("worksheet '{name}' not found in {path}")]
    WorksheetNotFound { path: PathBuf, name: String },

    /// Failed to parse JSON, or JSON of an unsupported shape.
    #[error("failed to parse JSON {path}: {message}")]
    JsonParse { path: PathBuf, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
