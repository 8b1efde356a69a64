//! Header reconciliation and column mapping.
//!
//! Voter rolls come with headers in Nepali, English or a mix of both, and
//! rarely in the same order twice. This crate decides which column feeds
//! which [`FieldKey`](vrs_model::FieldKey):
//!
//! - [`rules`]: the ordered header rule table, one rule per field
//! - [`reconcile_headers`]: applies the rules to a header row
//! - [`FieldAliases`]: candidate keys for rows that arrive as JSON objects
//! - [`ColumnPlan`]: the final field → column lookup the row builder reads
//! - [`MappingSet`] and [`MappingRepository`]: per-dataset mappings that
//!   survive across uploads, including manual corrections

pub mod aliases;
pub mod error;
pub mod plan;
pub mod reconcile;
pub mod repository;
pub mod rules;
pub mod set;

pub use aliases::FieldAliases;
pub use error::{MappingError, RepositoryError, Result};
pub use plan::{ColumnPlan, POSITIONAL_FALLBACK};
pub use reconcile::{HeaderConflict, ReconciliationResult, match_header, reconcile_headers};
pub use repository::{
    DatasetSummary, MappingRepository, StoredMappingSet, StoredOverrides,
};
pub use rules::{HEADER_RULES, HeaderRule};
pub use set::{MappingSet, UploadRecord, fingerprint};
