use serde::{Deserialize, Serialize};

/// Caste label used when no dictionary entry matches.
pub const OTHER_CASTE: &str = "Other";

/// Result of classifying one voter name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameClassification {
    pub caste: String,
    pub surname: String,
}

impl NameClassification {
    pub fn new(caste: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            caste: caste.into(),
            surname: surname.into(),
        }
    }

    /// The fallback classification with the given surname token.
    pub fn other(surname: impl Into<String>) -> Self {
        Self::new(OTHER_CASTE, surname)
    }

    pub fn is_other(&self) -> bool {
        self.caste == OTHER_CASTE
    }
}

/// Where a record's caste/surname came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationSource {
    /// Derived by the classifier.
    #[default]
    Auto,
    /// Set by a user and stored as an override.
    Manual,
}
