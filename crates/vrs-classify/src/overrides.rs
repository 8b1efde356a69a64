//! Manual classification overrides.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vrs_model::{ClassificationSource, ParsedRecord};

use crate::classifier::SurnameClassifier;
use crate::error::{ClassifyError, Result};

/// A manual caste and/or surname assignment for one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caste: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
}

impl ClassificationOverride {
    pub fn new(caste: Option<String>, surname: Option<String>) -> Self {
        Self {
            caste: caste.filter(|c| !c.trim().is_empty()),
            surname: surname.filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.caste.is_none() && self.surname.is_none()
    }
}

/// Manual overrides for one dataset, keyed by record key.
///
/// Stored apart from classifier output; when present an override wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationOverrides {
    entries: BTreeMap<String, ClassificationOverride>,
}

impl ClassificationOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an override, merging with an existing one for the same key.
    pub fn set(&mut self, record_key: &str, value: ClassificationOverride) -> Result<()> {
        let key = record_key.trim();
        if value.is_empty() {
            return Err(ClassifyError::EmptyOverride(key.to_string()));
        }
        let entry = self.entries.entry(key.to_string()).or_default();
        if value.caste.is_some() {
            entry.caste = value.caste;
        }
        if value.surname.is_some() {
            entry.surname = value.surname;
        }
        Ok(())
    }

    pub fn remove(&mut self, record_key: &str) -> Option<ClassificationOverride> {
        self.entries.remove(record_key.trim())
    }

    pub fn get(&self, record_key: &str) -> Option<&ClassificationOverride> {
        self.entries.get(record_key.trim())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClassificationOverride)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies the override for a record, if any, and marks it manual.
    ///
    /// A replaced surname is re-checked for the Newar tag. Returns `true`
    /// when an override was applied.
    pub fn apply(&self, record: &mut ParsedRecord, classifier: &SurnameClassifier) -> bool {
        let Some(entry) = self.entries.get(&record.record_key()) else {
            return false;
        };
        if let Some(caste) = &entry.caste {
            record.caste.clone_from(caste);
        }
        if let Some(surname) = &entry.surname {
            record.surname.clone_from(surname);
            record.is_newar = classifier.is_newar_surname(surname);
        }
        record.classification_source = ClassificationSource::Manual;
        true
    }

    /// Applies overrides to every record and returns how many matched.
    pub fn apply_all(&self, records: &mut [ParsedRecord], classifier: &SurnameClassifier) -> usize {
        if self.entries.is_empty() {
            return 0;
        }
        let mut applied = 0;
        for record in records.iter_mut() {
            if self.apply(record, classifier) {
                applied += 1;
            }
        }
        tracing::debug!(applied, stored = self.entries.len(), "Applied manual overrides");
        applied
    }
}
