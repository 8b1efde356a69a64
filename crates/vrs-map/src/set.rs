//! Per-dataset column mappings that persist across uploads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use vrs_model::{FieldKey, FieldMapping, MappingOrigin};

use crate::error::MappingError;
use crate::reconcile::ReconciliationResult;

/// SHA-256 of an upload, hex encoded.
pub fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// One upload merged into a mapping set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub file_name: String,
    pub sha256: String,
    pub header_count: usize,
    pub new_header_count: usize,
    pub uploaded_at: DateTime<Utc>,
}

/// Every header ever seen for a dataset and the field each one feeds.
///
/// Entries are created once per distinct header and never dropped. Manual
/// entries are only changed by another manual edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingSet {
    pub dataset_id: String,
    mappings: Vec<FieldMapping>,
    #[serde(default)]
    uploads: Vec<UploadRecord>,
}

impl MappingSet {
    pub fn new(dataset_id: impl Into<String>) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            mappings: Vec::new(),
            uploads: Vec::new(),
        }
    }

    pub fn mappings(&self) -> &[FieldMapping] {
        &self.mappings
    }

    pub fn uploads(&self) -> &[UploadRecord] {
        &self.uploads
    }

    pub fn get(&self, source_column: &str) -> Option<&FieldMapping> {
        self.mappings
            .iter()
            .find(|m| m.source_column == source_column)
    }

    /// Appends unmapped entries for headers not seen before and records the
    /// upload. Returns the number of new headers.
    pub fn merge_headers<S: AsRef<str>>(&mut self, headers: &[S], file_name: &str, sha256: &str) -> usize {
        let mut added = 0;
        for header in headers {
            let header = header.as_ref();
            if self.get(header).is_none() {
                self.mappings.push(FieldMapping::unmapped(header));
                added += 1;
            }
        }
        self.uploads.push(UploadRecord {
            file_name: file_name.to_string(),
            sha256: sha256.to_string(),
            header_count: headers.len(),
            new_header_count: added,
            uploaded_at: Utc::now(),
        });
        tracing::debug!(
            dataset = %self.dataset_id,
            file = %file_name,
            headers = headers.len(),
            new_headers = added,
            "Merged upload headers"
        );
        added
    }

    /// Fills unmapped, non-manual entries from the reconciler's suggestions.
    /// Returns the number of entries assigned.
    pub fn auto_assign(&mut self, result: &ReconciliationResult) -> usize {
        let mut assigned = 0;
        for suggestion in result.suggestions() {
            let Some(field) = suggestion.target_field else {
                continue;
            };
            let Some(entry) = self
                .mappings
                .iter_mut()
                .find(|m| m.source_column == suggestion.source_column)
            else {
                continue;
            };
            if entry.is_manual() || entry.is_mapped() {
                continue;
            }
            entry.target_field = Some(field);
            entry.origin = MappingOrigin::Auto;
            assigned += 1;
        }
        assigned
    }

    /// Sets or clears the field of a column. Manual entries always win over
    /// auto assignment.
    pub fn set_manual(
        &mut self,
        source_column: &str,
        field: Option<FieldKey>,
    ) -> Result<(), MappingError> {
        let entry = self
            .mappings
            .iter_mut()
            .find(|m| m.source_column == source_column)
            .ok_or_else(|| MappingError::ColumnNotFound(source_column.to_string()))?;
        *entry = FieldMapping::manual(source_column, field);
        Ok(())
    }

    /// Columns mapped to some field.
    pub fn mapped_count(&self) -> usize {
        self.mappings.iter().filter(|m| m.is_mapped()).count()
    }

    pub fn manual_count(&self) -> usize {
        self.mappings.iter().filter(|m| m.is_manual()).count()
    }
}
