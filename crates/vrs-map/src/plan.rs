//! The field → column lookup used when building records.

use std::collections::{BTreeMap, BTreeSet};

use vrs_model::FieldKey;

use crate::aliases::FieldAliases;
use crate::reconcile::ReconciliationResult;
use crate::set::MappingSet;

/// Legacy column positions used when a header row does not name the
/// voter name, age or gender column.
pub const POSITIONAL_FALLBACK: [(FieldKey, usize); 3] = [
    (FieldKey::VoterName, 2),
    (FieldKey::Age, 3),
    (FieldKey::Gender, 4),
];

/// Candidate columns per field, best first.
///
/// Grid tables have at most one candidate per field. Object rows may list
/// several; the row builder takes the first with a non-empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnPlan {
    columns: BTreeMap<FieldKey, Vec<usize>>,
    /// Columns a manual mapping decided, including cleared ones.
    pinned: BTreeSet<usize>,
}

impl ColumnPlan {
    /// One candidate per field, taken from a reconciled header row.
    pub fn from_reconciliation(result: &ReconciliationResult) -> Self {
        let columns = result
            .fields
            .iter()
            .map(|(field, index)| (*field, vec![*index]))
            .collect();
        Self {
            columns,
            pinned: BTreeSet::new(),
        }
    }

    /// Candidates for rows keyed by the given object keys.
    pub fn from_keys<S: AsRef<str>>(keys: &[S], aliases: &FieldAliases) -> Self {
        Self {
            columns: aliases.candidate_columns(keys),
            pinned: BTreeSet::new(),
        }
    }

    /// Fills voter name, age and gender from [`POSITIONAL_FALLBACK`] when no
    /// header named them, provided the column exists, no other field
    /// already reads it and no manual mapping decided it.
    pub fn with_positional_fallback(mut self, column_count: usize) -> Self {
        for (field, index) in POSITIONAL_FALLBACK {
            if self.columns.contains_key(&field) || index >= column_count || self.is_claimed(index)
            {
                continue;
            }
            tracing::debug!(field = %field, column = index, "Using positional column");
            self.columns.insert(field, vec![index]);
        }
        self
    }

    /// Applies the manual entries of a persisted mapping set.
    ///
    /// A manual entry takes its column away from whichever field held it and
    /// gives it to the chosen field, or to none when the mapping was
    /// cleared. Auto entries are left to the reconciler.
    pub fn with_manual_mappings<S: AsRef<str>>(mut self, headers: &[S], set: &MappingSet) -> Self {
        for mapping in set.mappings().iter().filter(|m| m.is_manual()) {
            let Some(index) = headers
                .iter()
                .position(|h| h.as_ref() == mapping.source_column)
            else {
                continue;
            };
            self.release(index);
            self.pinned.insert(index);
            if let Some(field) = mapping.target_field {
                self.columns.insert(field, vec![index]);
            }
        }
        self
    }

    /// Best column for a field.
    pub fn column(&self, field: FieldKey) -> Option<usize> {
        self.candidates(field).first().copied()
    }

    pub fn candidates(&self, field: FieldKey) -> &[usize] {
        self.columns.get(&field).map_or(&[], Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.columns.keys().copied()
    }

    /// True when a field reads the column or a manual mapping cleared it.
    pub fn is_claimed(&self, index: usize) -> bool {
        self.pinned.contains(&index) || self.columns.values().any(|list| list.contains(&index))
    }

    fn release(&mut self, index: usize) {
        for list in self.columns.values_mut() {
            list.retain(|i| *i != index);
        }
        self.columns.retain(|_, list| !list.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use vrs_model::FieldMapping;

    use super::*;
    use crate::reconcile::reconcile_headers;

    #[test]
    fn fallback_fills_only_unclaimed_columns() {
        let headers = ["क्र.सं.", "मतदाता नं", "कैफियत", "वडा", "x"];
        let plan = ColumnPlan::from_reconciliation(&reconcile_headers(&headers))
            .with_positional_fallback(headers.len());
        assert_eq!(plan.column(FieldKey::VoterName), Some(2));
        assert_eq!(plan.column(FieldKey::WardNo), Some(3));
        assert_eq!(plan.column(FieldKey::Age), None);
        assert_eq!(plan.column(FieldKey::Gender), Some(4));
    }

    #[test]
    fn fallback_respects_column_count() {
        let headers = ["a", "b"];
        let plan = ColumnPlan::from_reconciliation(&reconcile_headers(&headers))
            .with_positional_fallback(headers.len());
        assert_eq!(plan.fields().count(), 0);
    }

    #[test]
    fn manual_mapping_moves_column() {
        let headers = ["नाम", "कैफियत"];
        let mut set = MappingSet::new("ward-1");
        set.merge_headers(&headers, "roll.csv", "abc");
        set.set_manual("कैफियत", Some(FieldKey::Occupation)).unwrap();
        set.set_manual("नाम", None).unwrap();

        let plan = ColumnPlan::from_reconciliation(&reconcile_headers(&headers))
            .with_manual_mappings(&headers, &set);
        assert_eq!(plan.column(FieldKey::VoterName), None);
        assert_eq!(plan.column(FieldKey::Occupation), Some(1));
        assert!(set.mappings().contains(&FieldMapping::manual("नाम", None)));
    }

    #[test]
    fn cleared_column_is_not_refilled_by_fallback() {
        let headers = ["a", "b", "कैफियत", "d", "e"];
        let mut set = MappingSet::new("ward-1");
        set.merge_headers(&headers, "roll.csv", "abc");
        set.set_manual("कैफियत", None).unwrap();

        let plan = ColumnPlan::from_reconciliation(&reconcile_headers(&headers))
            .with_manual_mappings(&headers, &set)
            .with_positional_fallback(headers.len());
        assert_eq!(plan.column(FieldKey::VoterName), None);
        assert!(plan.is_claimed(2));
        assert_eq!(plan.column(FieldKey::Age), Some(3));
    }
}
