//! Static reference tables for surname and caste classification.
//!
//! This crate provides:
//!
//! - **Caste categories** with English/Nepali labels and their known surname
//!   spellings, in declaration order
//! - **Newar surnames**, the flat list behind the independent Newar tag
//! - **Loaders** that parse the embedded CSV tables once per process
//!
//! # Data Directory Structure
//!
//! ```text
//! data/
//! ├── castes.csv           # Category, Category (Nepali), Surname, Surname (Nepali)
//! └── newar_surnames.csv   # Surname
//! ```
//!
//! Row order in `castes.csv` is significant: categories are declared in the
//! order they first appear, and that order decides which category wins when
//! a name matches several.
//!
//! # Example
//!
//! ```rust,ignore
//! use vrs_standards::standard_catalog;
//!
//! let catalog = standard_catalog()?;
//! let brahmin = catalog.get("brahmin").unwrap();
//! println!("{} known surnames", brahmin.surnames.len());
//! ```

pub mod caste;
pub mod embedded;
pub mod error;
pub mod loader;
pub mod newar;

pub use caste::{CasteCatalog, CasteCategory};
pub use error::{Result, StandardsError};
pub use loader::{
    load_catalog_from_str, load_newar_from_str, standard_catalog, standard_newar_surnames,
};
pub use newar::NewarSurnameSet;
