//! Surname and caste classification.
//!
//! A voter name is matched against the caste catalog by substring
//! containment. Categories are walked in declaration order and the first
//! surname spelling found in the name decides the category. Names that match
//! nothing fall back to `Other` with the last word of the name as surname.
//!
//! The Newar tag is a separate lookup against its own surname list and never
//! influences the caste category.
//!
//! User edits live beside the classifier, never inside it:
//!
//! - [`CustomCasteTags`] holds extra caste labels a user introduced
//! - [`ClassificationOverrides`] holds manual caste/surname assignments per
//!   record and wins over classifier output

pub mod classifier;
pub mod custom;
pub mod error;
pub mod overrides;

pub use classifier::SurnameClassifier;
pub use custom::CustomCasteTags;
pub use error::{ClassifyError, Result};
pub use overrides::{ClassificationOverride, ClassificationOverrides};
