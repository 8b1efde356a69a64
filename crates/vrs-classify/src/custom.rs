//! User-defined caste tags.

use serde::{Deserialize, Serialize};
use vrs_model::OTHER_CASTE;
use vrs_standards::CasteCatalog;

use crate::error::{ClassifyError, Result};

/// Extra caste labels introduced by users.
///
/// Kept apart from the static catalog so adding a tag never changes what
/// the classifier returns. Tags keep insertion order and are unique ignoring
/// case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomCasteTags {
    tags: Vec<String>,
}

impl CustomCasteTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tag. Returns `false` if an equal tag is already present.
    pub fn add(&mut self, tag: &str, catalog: &CasteCatalog) -> Result<bool> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(ClassifyError::EmptyTag);
        }
        if catalog.contains(tag) || tag.eq_ignore_ascii_case(OTHER_CASTE) {
            return Err(ClassifyError::ReservedTag(tag.to_string()));
        }
        if self.contains(tag) {
            return Ok(false);
        }
        self.tags.push(tag.to_string());
        Ok(true)
    }

    /// Removes a tag. Returns `true` if it was present.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        let wanted = tag.trim().to_lowercase();
        self.tags.retain(|t| t.to_lowercase() != wanted);
        self.tags.len() != before
    }

    pub fn contains(&self, tag: &str) -> bool {
        let wanted = tag.trim().to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == wanted)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Resolves a caste label to its canonical spelling.
    ///
    /// Accepts built-in categories (English or Nepali label), `Other` and
    /// custom tags.
    pub fn canonical_caste(&self, caste: &str, catalog: &CasteCatalog) -> Result<String> {
        let caste = caste.trim();
        if let Some(category) = catalog.get(caste) {
            return Ok(category.name.clone());
        }
        if caste.eq_ignore_ascii_case(OTHER_CASTE) {
            return Ok(OTHER_CASTE.to_string());
        }
        let wanted = caste.to_lowercase();
        self.tags
            .iter()
            .find(|t| t.to_lowercase() == wanted)
            .cloned()
            .ok_or_else(|| ClassifyError::UnknownCaste(caste.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use vrs_standards::CasteCategory;

    use super::*;

    fn catalog() -> CasteCatalog {
        CasteCatalog::new("test", vec![CasteCategory::new("Brahmin", "ब्राह्मण")])
    }

    #[test]
    fn tags_are_unique_ignoring_case() {
        let mut tags = CustomCasteTags::new();
        assert!(tags.add("Kirat", &catalog()).unwrap());
        assert!(!tags.add("KIRAT", &catalog()).unwrap());
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["Kirat"]);
    }

    #[test]
    fn builtin_labels_are_reserved() {
        let mut tags = CustomCasteTags::new();
        assert!(matches!(
            tags.add("brahmin", &catalog()),
            Err(ClassifyError::ReservedTag(_))
        ));
        assert!(matches!(tags.add("other", &catalog()), Err(ClassifyError::ReservedTag(_))));
        assert!(matches!(tags.add("  ", &catalog()), Err(ClassifyError::EmptyTag)));
    }

    #[test]
    fn canonical_caste_resolves_all_sources() {
        let mut tags = CustomCasteTags::new();
        tags.add("Kirat", &catalog()).unwrap();
        assert_eq!(tags.canonical_caste("ब्राह्मण", &catalog()).unwrap(), "Brahmin");
        assert_eq!(tags.canonical_caste("OTHER", &catalog()).unwrap(), "Other");
        assert_eq!(tags.canonical_caste("kirat", &catalog()).unwrap(), "Kirat");
        assert!(tags.canonical_caste("Unknown", &catalog()).is_err());
    }

    #[test]
    fn remove_reports_presence() {
        let mut tags = CustomCasteTags::new();
        tags.add("Kirat", &catalog()).unwrap();
        assert!(tags.remove("kirat"));
        assert!(!tags.remove("kirat"));
        assert!(tags.is_empty());
    }
}
