//! Header reconciliation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vrs_model::{FieldKey, FieldMapping};
use vrs_normalization::sanitize;

use crate::rules::HEADER_RULES;

/// Two headers that matched the same field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderConflict {
    pub field: FieldKey,
    /// Column that lost the field.
    pub superseded: usize,
    /// Column that now holds the field.
    pub winner: usize,
}

/// Outcome of reconciling one header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationResult {
    /// The raw headers, in column order.
    pub headers: Vec<String>,
    /// Field → column index. The later column wins a collision.
    pub fields: BTreeMap<FieldKey, usize>,
    /// Collisions in the order they were found.
    pub conflicts: Vec<HeaderConflict>,
    /// Columns no rule matched.
    pub unmapped: Vec<usize>,
}

impl ReconciliationResult {
    pub fn column_for(&self, field: FieldKey) -> Option<usize> {
        self.fields.get(&field).copied()
    }

    /// The field a column ended up feeding, if any.
    pub fn field_for(&self, column: usize) -> Option<FieldKey> {
        self.fields
            .iter()
            .find_map(|(field, index)| (*index == column).then_some(*field))
    }

    /// One auto-origin mapping per header. Headers that matched nothing or
    /// lost a collision are listed as unmapped.
    pub fn suggestions(&self) -> Vec<FieldMapping> {
        self.headers
            .iter()
            .enumerate()
            .map(|(index, header)| match self.field_for(index) {
                Some(field) => FieldMapping::auto(header.clone(), field),
                None => FieldMapping::unmapped(header.clone()),
            })
            .collect()
    }

    /// Headers no rule matched.
    pub fn unmapped_headers(&self) -> impl Iterator<Item = &str> {
        self.unmapped
            .iter()
            .filter_map(|index| self.headers.get(*index).map(String::as_str))
    }
}

/// The field a single header maps to, if any rule matches.
pub fn match_header(header: &str) -> Option<FieldKey> {
    let trimmed = sanitize(header);
    if trimmed.is_empty() {
        return None;
    }
    let folded = trimmed.to_lowercase();
    HEADER_RULES
        .iter()
        .find(|rule| rule.matches(&trimmed, &folded))
        .map(|rule| rule.field)
}

/// Maps each recognized field to the column holding it.
///
/// Never fails. Unrecognized headers are listed in
/// [`ReconciliationResult::unmapped`]; when two headers claim the same field
/// the later one wins and the collision is recorded.
pub fn reconcile_headers<S: AsRef<str>>(headers: &[S]) -> ReconciliationResult {
    let mut result = ReconciliationResult {
        headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
        ..ReconciliationResult::default()
    };

    for (index, header) in headers.iter().enumerate() {
        let Some(field) = match_header(header.as_ref()) else {
            result.unmapped.push(index);
            continue;
        };
        if let Some(previous) = result.fields.insert(field, index) {
            tracing::warn!(
                field = %field,
                superseded = previous,
                winner = index,
                "Two headers map to the same field; keeping the later column"
            );
            result.conflicts.push(HeaderConflict {
                field,
                superseded: previous,
                winner: index,
            });
        }
    }

    tracing::debug!(
        headers = headers.len(),
        mapped = result.fields.len(),
        unmapped = result.unmapped.len(),
        conflicts = result.conflicts.len(),
        "Reconciled headers"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_precedes_voter_id() {
        let result = reconcile_headers(&["मतदाता क्र.सं.", "मतदाता परिचयपत्र नं."]);
        assert_eq!(result.column_for(FieldKey::SerialNumber), Some(0));
        assert_eq!(result.column_for(FieldKey::VoterId), Some(1));
        assert!(result.conflicts.is_empty());
    }

    #[test]
    fn name_rule_skips_relatives() {
        assert_eq!(match_header("पति/पत्नीको नाम"), Some(FieldKey::Spouse));
        assert_eq!(match_header("पिता/माताको नाम"), Some(FieldKey::Parents));
        assert_eq!(match_header("Father Name"), Some(FieldKey::Parents));
        assert_eq!(match_header("Husband Name"), Some(FieldKey::Spouse));
        assert_eq!(match_header("मतदाताको नाम"), Some(FieldKey::VoterName));
        assert_eq!(match_header("Voter Name"), Some(FieldKey::VoterName));
        assert_eq!(match_header("Tole Name"), Some(FieldKey::Tole));
        assert_eq!(match_header("टोलको नाम"), Some(FieldKey::Tole));
        assert_eq!(match_header("Caste Name"), Some(FieldKey::Caste));
        assert_eq!(match_header("Party Name"), Some(FieldKey::Party));
        assert_eq!(match_header("वडाको नाम"), Some(FieldKey::WardNo));
        assert_eq!(match_header("Occupation Name"), Some(FieldKey::Occupation));
    }

    #[test]
    fn english_headers_ignore_case_and_padding() {
        assert_eq!(match_header("  AGE "), Some(FieldKey::Age));
        assert_eq!(match_header("\u{feff}S.N"), Some(FieldKey::SerialNumber));
        assert_eq!(match_header("Sex"), Some(FieldKey::Gender));
        assert_eq!(match_header("Ward No."), Some(FieldKey::WardNo));
        assert_eq!(match_header("Polling Station"), Some(FieldKey::CenterName));
        assert_eq!(match_header("Family Name"), Some(FieldKey::Surname));
        assert_eq!(match_header("Language"), None);
    }

    #[test]
    fn later_duplicate_wins_and_is_recorded() {
        let result = reconcile_headers(&["नाम", "उमेर", "Name"]);
        assert_eq!(result.column_for(FieldKey::VoterName), Some(2));
        assert_eq!(
            result.conflicts,
            vec![HeaderConflict {
                field: FieldKey::VoterName,
                superseded: 0,
                winner: 2,
            }]
        );
        let suggestions = result.suggestions();
        assert!(!suggestions[0].is_mapped());
        assert_eq!(suggestions[2].target_field, Some(FieldKey::VoterName));
    }

    #[test]
    fn unmatched_headers_are_listed() {
        let result = reconcile_headers(&["नाम", "कैफियत", ""]);
        assert_eq!(result.unmapped, vec![1, 2]);
        assert_eq!(result.unmapped_headers().collect::<Vec<_>>(), vec!["कैफियत", ""]);
    }
}
