//! Row → [`ParsedRecord`] conversion.

use std::collections::HashMap;

use vrs_classify::SurnameClassifier;
use vrs_map::ColumnPlan;
use vrs_model::{CellValue, FieldKey, ParsedRecord};
use vrs_normalization::{normalize_gender, parse_age, sanitize, sanitize_optional};

/// Builds records from decoded rows using a fixed column plan.
#[derive(Debug)]
pub struct RecordBuilder<'a> {
    plan: &'a ColumnPlan,
    classifier: &'a SurnameClassifier,
    keys: Vec<String>,
}

impl<'a> RecordBuilder<'a> {
    /// Prepares a builder for the given headers.
    ///
    /// Passthrough keys are the literal header texts. Blank headers become
    /// `Column <n>` and repeated header text gets a `#<n>` suffix so every
    /// column survives in `originalData`.
    pub fn new(headers: &[String], plan: &'a ColumnPlan, classifier: &'a SurnameClassifier) -> Self {
        Self {
            plan,
            classifier,
            keys: passthrough_keys(headers),
        }
    }

    /// Passthrough key for a column, including columns past the header row.
    pub fn key_for(&self, column: usize) -> String {
        self.keys
            .get(column)
            .cloned()
            .unwrap_or_else(|| format!("Column {}", column + 1))
    }

    /// Builds one record. `row_number` is the 1-based data row position.
    pub fn build(&self, row_number: usize, cells: &[CellValue]) -> ParsedRecord {
        let mut record = ParsedRecord::new(row_number);

        for (column, cell) in cells.iter().enumerate() {
            let key = self.key_for(column);
            if self.keys.get(column).is_some() || !cell.is_empty() {
                record.original_data.insert(key, cell.to_text());
            }
        }

        let mut surname_hint = None;
        let mut caste_hint = None;
        for field in self.plan.fields() {
            let Some(value) = self.value(field, cells) else {
                continue;
            };
            match field {
                FieldKey::VoterName => record.voter_name = value,
                FieldKey::Age => record.age = parse_age(&value),
                FieldKey::Gender => record.gender = normalize_gender(&value),
                FieldKey::Surname => surname_hint = Some(value),
                FieldKey::Caste => caste_hint = Some(value),
                other => record.set_text_field(other, value),
            }
        }

        self.classifier.apply(&mut record, surname_hint.as_deref());
        if let Some(category) = caste_hint
            .as_deref()
            .and_then(|caste| self.classifier.catalog().get(caste))
        {
            record.caste.clone_from(&category.name);
        }
        record
    }

    /// First candidate column with a non-empty sanitized value.
    fn value(&self, field: FieldKey, cells: &[CellValue]) -> Option<String> {
        self.plan
            .candidates(field)
            .iter()
            .filter_map(|column| cells.get(*column))
            .find_map(|cell| sanitize_optional(&cell.to_text()))
    }
}

fn passthrough_keys(headers: &[String]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let base = if sanitize(header).is_empty() {
                format!("Column {}", index + 1)
            } else {
                header.clone()
            };
            let count = seen.entry(base.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                base
            } else {
                format!("{base}#{count}")
            }
        })
        .collect()
}
