//! Reports over parsed voter records.
//!
//! - **Distribution summaries**: counts by caste, gender and ward
//! - **Export**: records as pretty JSON or as CSV with the normalized
//!   columns followed by every original column

mod error;
mod export;
mod summary;

pub use error::{ReportError, Result};
pub use export::{ExportFormat, export_records, write_csv, write_json};
pub use summary::{CountEntry, DistributionSummary, UNASSIGNED_WARD};
