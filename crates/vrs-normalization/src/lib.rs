//! Cell value normalization.
//!
//! Voter rolls arrive from spreadsheets typed by hand in two scripts. These
//! helpers turn raw cell text into the normalized values stored on a
//! record:
//!
//! - [`sanitize`] trims, drops invisible characters and collapses whitespace
//! - [`normalize_gender`] maps the English/Nepali gender vocabulary
//! - [`parse_age`] reads ASCII or Devanagari digits and ignores trailing text

pub mod age;
pub mod gender;
pub mod text;

pub use age::parse_age;
pub use gender::normalize_gender;
pub use text::{fold_devanagari_digits, sanitize, sanitize_optional};
