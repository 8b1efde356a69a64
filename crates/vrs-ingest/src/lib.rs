//! Voter roll ingestion.
//!
//! Turns an uploaded CSV, XLSX or JSON voter list into [`ParsedRecord`]s:
//!
//! - **Validation**: size limit, file signature, UTF-8 text, row and cell
//!   limits
//! - **Decoding**: header row plus data rows, blank rows dropped
//! - **Record building**: header reconciliation, positional fallback,
//!   normalization, passthrough of every source column
//! - **Classification**: caste, surname and Newar tag, then manual overrides
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use vrs_classify::SurnameClassifier;
//! use vrs_ingest::{IngestContext, IngestOptions, ingest_file};
//!
//! let classifier = SurnameClassifier::standard()?;
//! let outcome = ingest_file(
//!     Path::new("ward-4.csv"),
//!     &IngestOptions::default(),
//!     IngestContext::new(classifier),
//! )?;
//! println!("{} records", outcome.records.len());
//! ```
//!
//! [`ParsedRecord`]: vrs_model::ParsedRecord

mod builder;
mod decode;
mod error;
mod options;
mod pipeline;
mod validate;

// === Error Types ===
pub use error::{IngestError, Result};

// === Options ===
pub use options::{
    DEFAULT_MAX_FIELD_LEN, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_ROWS, IngestOptions, InputFormat,
};

// === Decoding ===
pub use decode::{DecodedTable, decode, decode_csv, decode_json, decode_xlsx};

// === Validation ===
pub use validate::{check_shape, check_signature, check_size, decode_text};

// === Records ===
pub use builder::RecordBuilder;
pub use pipeline::{IngestContext, IngestOutcome, ingest_bytes, ingest_file};
