//! Reference table loading.
//!
//! Parses the embedded CSV tables into a [`CasteCatalog`] and a
//! [`NewarSurnameSet`]. The standard tables are parsed once per process.

use std::io::Cursor;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::caste::{CasteCatalog, CasteCategory};
use crate::embedded;
use crate::error::{Result, StandardsError};
use crate::newar::NewarSurnameSet;

static STANDARD_CATALOG: OnceLock<CasteCatalog> = OnceLock::new();
static STANDARD_NEWAR: OnceLock<NewarSurnameSet> = OnceLock::new();

/// The embedded caste catalog, parsed on first use.
pub fn standard_catalog() -> Result<&'static CasteCatalog> {
    if let Some(catalog) = STANDARD_CATALOG.get() {
        return Ok(catalog);
    }
    let catalog = load_catalog_from_str(embedded::CASTES_CSV, "castes.csv")?;
    tracing::debug!(
        version = %catalog.version,
        categories = catalog.len(),
        "Loaded caste catalog"
    );
    Ok(STANDARD_CATALOG.get_or_init(|| catalog))
}

/// The embedded Newar surname set, parsed on first use.
pub fn standard_newar_surnames() -> Result<&'static NewarSurnameSet> {
    if let Some(set) = STANDARD_NEWAR.get() {
        return Ok(set);
    }
    let set = load_newar_from_str(embedded::NEWAR_SURNAMES_CSV, "newar_surnames.csv")?;
    tracing::debug!(entries = set.len(), "Loaded Newar surname set");
    Ok(STANDARD_NEWAR.get_or_init(|| set))
}

/// Load a caste catalog from CSV string content.
///
/// # CSV Structure
///
/// One row per surname: `Category`, `Category (Nepali)`, `Surname`,
/// `Surname (Nepali)`. Either surname column may be blank. Categories are
/// ordered by first appearance.
pub fn load_catalog_from_str(content: &str, filename: &str) -> Result<CasteCatalog> {
    let cursor = Cursor::new(content.as_bytes());
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(cursor);

    let mut categories: Vec<CasteCategory> = Vec::new();
    for result in reader.deserialize::<CasteCsvRow>() {
        let row = result.map_err(|e| StandardsError::CsvParse {
            file: filename.to_string(),
            message: e.to_string(),
        })?;

        let name = row.category.trim();
        if name.is_empty() {
            return Err(StandardsError::MissingValue {
                field: "Category",
                line: reader.position().line(),
                file: filename.to_string(),
            });
        }
        let name_ne = row.category_ne.trim();

        let index = match categories
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
        {
            Some(index) => {
                let existing = &categories[index].name_ne;
                if !name_ne.is_empty() && !existing.is_empty() && existing != name_ne {
                    return Err(StandardsError::ConflictingCategory {
                        name: name.to_string(),
                        file: filename.to_string(),
                    });
                }
                index
            }
            None => {
                categories.push(CasteCategory::new(name, name_ne));
                categories.len() - 1
            }
        };

        let category = &mut categories[index];
        if category.name_ne.is_empty() && !name_ne.is_empty() {
            category.name_ne = name_ne.to_string();
        }
        category.add_surname(&row.surname);
        category.add_surname_ne(&row.surname_ne);
    }

    let empty: Vec<&str> = categories
        .iter()
        .filter(|c| c.surname_count() == 0)
        .map(|c| c.name.as_str())
        .collect();
    if !empty.is_empty() {
        tracing::warn!(
            file = %filename,
            categories = ?empty,
            "Caste categories without any surname can never match"
        );
    }

    Ok(CasteCatalog::new(embedded::TABLE_VERSION, categories))
}

/// Load the Newar surname set from CSV string content with a single
/// `Surname` column.
pub fn load_newar_from_str(content: &str, filename: &str) -> Result<NewarSurnameSet> {
    let cursor = Cursor::new(content.as_bytes());
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(cursor);

    let mut entries = Vec::new();
    for result in reader.deserialize::<NewarCsvRow>() {
        let row = result.map_err(|e| StandardsError::CsvParse {
            file: filename.to_string(),
            message: e.to_string(),
        })?;
        entries.push(row.surname);
    }

    Ok(NewarSurnameSet::new(entries))
}

#[derive(Debug, Deserialize)]
struct CasteCsvRow {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Category (Nepali)", default)]
    category_ne: String,
    #[serde(rename = "Surname", default)]
    surname: String,
    #[serde(rename = "Surname (Nepali)", default)]
    surname_ne: String,
}

#[derive(Debug, Deserialize)]
struct NewarCsvRow {
    #[serde(rename = "Surname")]
    surname: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\"Category\",\"Category (Nepali)\",\"Surname\",\"Surname (Nepali)\"\n\
        \"A\",\"अ\",\"One\",\"एक\"\n\
        \"B\",\"ब\",\"Two\",\"\"\n\
        \"A\",\"अ\",\"Three\",\"\"\n";

    #[test]
    fn groups_rows_by_first_appearance() {
        let catalog = load_catalog_from_str(SMALL, "small.csv").unwrap();
        assert_eq!(catalog.category_names(), vec!["A", "B"]);
        let a = catalog.get("a").unwrap();
        assert_eq!(a.surnames, vec!["One", "Three"]);
        assert_eq!(a.surnames_ne, vec!["एक"]);
        assert!(catalog.get("b").unwrap().surnames_ne.is_empty());
    }

    #[test]
    fn rejects_conflicting_nepali_labels() {
        let content = "\"Category\",\"Category (Nepali)\",\"Surname\",\"Surname (Nepali)\"\n\
            \"A\",\"अ\",\"One\",\"\"\n\
            \"A\",\"आ\",\"Two\",\"\"\n";
        let err = load_catalog_from_str(content, "bad.csv").unwrap_err();
        assert!(matches!(err, StandardsError::ConflictingCategory { .. }));
    }

    #[test]
    fn rejects_blank_category() {
        let content = "\"Category\",\"Category (Nepali)\",\"Surname\",\"Surname (Nepali)\"\n\
            \"\",\"\",\"One\",\"\"\n";
        let err = load_catalog_from_str(content, "bad.csv").unwrap_err();
        assert!(matches!(err, StandardsError::MissingValue { field: "Category", .. }));
    }
}
