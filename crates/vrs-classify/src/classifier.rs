//! Dictionary-driven surname/caste classifier.

use std::borrow::Cow;
use std::sync::OnceLock;

use vrs_model::{ClassificationSource, NameClassification, ParsedRecord};
use vrs_standards::{CasteCatalog, NewarSurnameSet, standard_catalog, standard_newar_surnames};

use crate::error::Result;

static STANDARD: OnceLock<SurnameClassifier> = OnceLock::new();

/// Classifies voter names into caste categories.
///
/// Pure and deterministic: the output depends only on the input name and the
/// tables the classifier was built from.
#[derive(Debug, Clone)]
pub struct SurnameClassifier {
    catalog: Cow<'static, CasteCatalog>,
    newar: Cow<'static, NewarSurnameSet>,
    needles: Vec<Needle>,
}

/// One surname spelling flattened out of the catalog, in match order.
#[derive(Debug, Clone)]
struct Needle {
    category: usize,
    pattern: String,
    spelling: String,
    folded: bool,
}

impl SurnameClassifier {
    /// Builds a classifier over the given tables.
    pub fn new(catalog: CasteCatalog, newar: NewarSurnameSet) -> Self {
        Self::from_cow(Cow::Owned(catalog), Cow::Owned(newar))
    }

    /// The classifier over the embedded tables, built once per process.
    pub fn standard() -> Result<&'static SurnameClassifier> {
        if let Some(classifier) = STANDARD.get() {
            return Ok(classifier);
        }
        let classifier = Self::from_cow(
            Cow::Borrowed(standard_catalog()?),
            Cow::Borrowed(standard_newar_surnames()?),
        );
        Ok(STANDARD.get_or_init(|| classifier))
    }

    fn from_cow(catalog: Cow<'static, CasteCatalog>, newar: Cow<'static, NewarSurnameSet>) -> Self {
        let mut needles = Vec::new();
        for (index, category) in catalog.categories().iter().enumerate() {
            for spelling in &category.surnames {
                push_needle(&mut needles, index, spelling, true);
            }
            for spelling in &category.surnames_ne {
                push_needle(&mut needles, index, spelling, false);
            }
        }
        tracing::trace!(
            categories = catalog.len(),
            spellings = needles.len(),
            "Built surname classifier"
        );
        Self {
            catalog,
            newar,
            needles,
        }
    }

    pub fn catalog(&self) -> &CasteCatalog {
        &self.catalog
    }

    pub fn newar_surnames(&self) -> &NewarSurnameSet {
        &self.newar
    }

    /// Classifies a full name.
    ///
    /// English spellings are compared case-insensitively, Devanagari ones as
    /// exact substrings. Never fails: an empty name yields `Other` with an
    /// empty surname.
    pub fn classify(&self, full_name: &str) -> NameClassification {
        let trimmed = full_name.trim();
        if trimmed.is_empty() {
            return NameClassification::other("");
        }
        let folded = trimmed.to_lowercase();

        for needle in &self.needles {
            let haystack = if needle.folded { folded.as_str() } else { trimmed };
            if haystack.contains(needle.pattern.as_str()) {
                let category = &self.catalog.categories()[needle.category];
                return NameClassification::new(category.name.clone(), needle.spelling.clone());
            }
        }

        let last = trimmed.split_whitespace().last().unwrap_or_default();
        NameClassification::other(last)
    }

    /// Classifies a record whose source may carry a dedicated surname column.
    ///
    /// With a non-empty surname hint the caste is derived from the hint
    /// first and from the full name when the hint alone is unknown. The hint
    /// is always kept as the surname.
    pub fn classify_record_name(
        &self,
        surname_hint: Option<&str>,
        full_name: &str,
    ) -> NameClassification {
        let Some(hint) = surname_hint.map(str::trim).filter(|h| !h.is_empty()) else {
            return self.classify(full_name);
        };

        let from_hint = self.classify(hint);
        let caste = if from_hint.is_other() {
            self.classify(full_name).caste
        } else {
            from_hint.caste
        };
        NameClassification::new(caste, hint)
    }

    /// Returns true if the surname contains any Newar surname entry.
    pub fn is_newar_surname(&self, surname: &str) -> bool {
        self.newar.matches(surname)
    }

    /// Fills the caste, surname and Newar flag of a record from its name.
    pub fn apply(&self, record: &mut ParsedRecord, surname_hint: Option<&str>) {
        let result = self.classify_record_name(surname_hint, &record.voter_name);
        record.is_newar = self.is_newar_surname(&result.surname);
        record.caste = result.caste;
        record.surname = result.surname;
        record.classification_source = ClassificationSource::Auto;
    }
}

fn push_needle(needles: &mut Vec<Needle>, category: usize, spelling: &str, folded: bool) {
    let spelling = spelling.trim();
    if spelling.is_empty() {
        return;
    }
    let pattern = if folded {
        spelling.to_lowercase()
    } else {
        spelling.to_string()
    };
    needles.push(Needle {
        category,
        pattern,
        spelling: spelling.to_string(),
        folded,
    });
}

#[cfg(test)]
mod tests {
    use vrs_standards::CasteCategory;

    use super::*;

    fn fixture() -> SurnameClassifier {
        let catalog = CasteCatalog::new(
            "test",
            vec![
                CasteCategory::new("First", "पहिलो")
                    .with_surnames(["Sharma"])
                    .with_surnames_ne(["शर्मा"]),
                CasteCategory::new("Second", "दोस्रो").with_surnames(["Sharma", "Thapa"]),
            ],
        );
        SurnameClassifier::new(catalog, NewarSurnameSet::new(["shrestha"]))
    }

    #[test]
    fn earliest_category_wins() {
        let result = fixture().classify("Ram Sharma");
        assert_eq!(result, NameClassification::new("First", "Sharma"));
    }

    #[test]
    fn returns_dictionary_spelling() {
        let result = fixture().classify("  HARI THAPA ");
        assert_eq!(result, NameClassification::new("Second", "Thapa"));
    }

    #[test]
    fn devanagari_matches_exactly() {
        let result = fixture().classify("राम शर्मा");
        assert_eq!(result, NameClassification::new("First", "शर्मा"));
    }

    #[test]
    fn unknown_name_falls_back_to_last_token() {
        let result = fixture().classify("Xyzabc Nonexistentname");
        assert_eq!(result, NameClassification::other("Nonexistentname"));
        assert_eq!(fixture().classify("   "), NameClassification::other(""));
        assert_eq!(fixture().classify("Single"), NameClassification::other("Single"));
    }

    #[test]
    fn surname_hint_is_kept() {
        let classifier = fixture();
        let result = classifier.classify_record_name(Some("Unknownsurname"), "Ram Sharma");
        assert_eq!(result, NameClassification::new("First", "Unknownsurname"));

        let result = classifier.classify_record_name(Some(" "), "Ram Sharma");
        assert_eq!(result, NameClassification::new("First", "Sharma"));
    }

    #[test]
    fn empty_spellings_are_skipped() {
        let catalog = CasteCatalog::new(
            "test",
            vec![CasteCategory {
                name: "Blank".into(),
                name_ne: String::new(),
                surnames: vec![String::new()],
                surnames_ne: vec!["  ".into()],
            }],
        );
        let classifier = SurnameClassifier::new(catalog, NewarSurnameSet::default());
        assert!(classifier.classify("Anything").is_other());
    }
}
