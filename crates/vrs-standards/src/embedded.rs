//! Embedded reference data.
//!
//! Tables are embedded at compile time using `include_str!()` so the
//! classifier works offline and without path resolution.

/// Revision of the embedded tables. Bump whenever a CSV changes so stored
/// classifications can be traced back to the dictionary that produced them.
pub const TABLE_VERSION: &str = "2024.2";

/// Caste categories and their surname spellings.
pub const CASTES_CSV: &str = include_str!("../data/castes.csv");

/// Newar surname substrings.
pub const NEWAR_SURNAMES_CSV: &str = include_str!("../data/newar_surnames.csv");
