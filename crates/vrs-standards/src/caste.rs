//! Caste category types.

use serde::{Deserialize, Serialize};

/// One caste category and the surnames known to belong to it.
///
/// Surname lists keep their declaration order and are case-insensitively
/// unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasteCategory {
    /// Canonical English label, unique within a catalog.
    pub name: String,
    /// Nepali label.
    pub name_ne: String,
    /// Known surnames in English spelling.
    pub surnames: Vec<String>,
    /// Known surnames in Devanagari.
    pub surnames_ne: Vec<String>,
}

impl CasteCategory {
    pub fn new(name: impl Into<String>, name_ne: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            name_ne: name_ne.into(),
            surnames: Vec::new(),
            surnames_ne: Vec::new(),
        }
    }

    /// Builder-style variant of [`Self::add_surname`] for fixtures.
    #[must_use]
    pub fn with_surnames<I, S>(mut self, surnames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for surname in surnames {
            self.add_surname(surname.as_ref());
        }
        self
    }

    /// Builder-style variant of [`Self::add_surname_ne`] for fixtures.
    #[must_use]
    pub fn with_surnames_ne<I, S>(mut self, surnames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for surname in surnames {
            self.add_surname_ne(surname.as_ref());
        }
        self
    }

    /// Appends an English surname unless it is blank or already present.
    pub fn add_surname(&mut self, surname: &str) {
        push_unique(&mut self.surnames, surname);
    }

    /// Appends a Devanagari surname unless it is blank or already present.
    pub fn add_surname_ne(&mut self, surname: &str) {
        push_unique(&mut self.surnames_ne, surname);
    }

    /// Total number of surname spellings in both scripts.
    pub fn surname_count(&self) -> usize {
        self.surnames.len() + self.surnames_ne.len()
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }
    if list.iter().any(|existing| existing.to_lowercase() == value.to_lowercase()) {
        return;
    }
    list.push(value.to_string());
}

/// An ordered, immutable set of caste categories.
///
/// The order of [`Self::categories`] is the tie-break order used by the
/// classifier: the first declared category that matches wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasteCatalog {
    /// Revision of the table this catalog was loaded from.
    pub version: String,
    categories: Vec<CasteCategory>,
}

impl CasteCatalog {
    pub fn new(version: impl Into<String>, categories: Vec<CasteCategory>) -> Self {
        Self {
            version: version.into(),
            categories,
        }
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> &[CasteCategory] {
        &self.categories
    }

    /// Looks up a category by English or Nepali label, ignoring case.
    pub fn get(&self, name: &str) -> Option<&CasteCategory> {
        let wanted = name.trim().to_lowercase();
        self.categories
            .iter()
            .find(|c| c.name.to_lowercase() == wanted || c.name_ne == name.trim())
    }

    /// Returns true if `name` is one of the category labels.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// English category labels in declaration order.
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surnames_are_unique_ignoring_case() {
        let category = CasteCategory::new("Brahmin", "ब्राह्मण")
            .with_surnames(["Sharma", "sharma", " ", "Poudel"]);
        assert_eq!(category.surnames, vec!["Sharma", "Poudel"]);
    }

    #[test]
    fn lookup_accepts_either_label() {
        let catalog = CasteCatalog::new(
            "test",
            vec![CasteCategory::new("Chhetri", "क्षेत्री")],
        );
        assert!(catalog.get("CHHETRI").is_some());
        assert!(catalog.get("क्षेत्री").is_some());
        assert!(catalog.get("Dalit").is_none());
    }
}
