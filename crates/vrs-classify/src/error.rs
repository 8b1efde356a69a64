//! Error types for classification bookkeeping.

use thiserror::Error;
use vrs_standards::StandardsError;

/// Errors raised while loading tables or editing user classifications.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClassifyError {
    /// The embedded reference tables could not be loaded.
    #[error(transparent)]
    Standards(#[from] StandardsError),

    /// A custom caste tag was blank.
    #[error("Custom caste tag is empty")]
    EmptyTag,

    /// A custom caste tag collides with a built-in category.
    #[error("'{0}' is already a built-in caste category")]
    ReservedTag(String),

    /// A caste label is neither built-in nor a known custom tag.
    #[error("Unknown caste '{0}'")]
    UnknownCaste(String),

    /// An override carried neither a caste nor a surname.
    #[error("Override for '{0}' sets neither caste nor surname")]
    EmptyOverride(String),
}

/// Result type for classification bookkeeping.
pub type Result<T> = std::result::Result<T, ClassifyError>;
