//! Shared data model for the voter roll workspace.
//!
//! Every crate in the workspace speaks these types: decoded cells coming out
//! of the file readers, the normalized field keys the header reconciler maps
//! onto, the classification result of a voter name, and the final
//! [`ParsedRecord`] handed to export and storage.

pub mod cell;
pub mod classification;
pub mod error;
pub mod field;
pub mod gender;
pub mod mapping;
pub mod record;
pub mod redact;

pub use cell::CellValue;
pub use classification::{ClassificationSource, NameClassification, OTHER_CASTE};
pub use error::{ModelError, Result};
pub use field::FieldKey;
pub use gender::Gender;
pub use mapping::{FieldMapping, MappingOrigin};
pub use record::ParsedRecord;
pub use redact::{REDACTED_VALUE, redact_value};
