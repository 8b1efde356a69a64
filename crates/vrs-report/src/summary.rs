//! Distribution summaries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vrs_classify::CustomCasteTags;
use vrs_model::{ClassificationSource, Gender, OTHER_CASTE, ParsedRecord};
use vrs_normalization::fold_devanagari_digits;
use vrs_standards::CasteCatalog;

/// Ward label for records without a ward number.
pub const UNASSIGNED_WARD: &str = "Unassigned";

/// One labelled count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

impl CountEntry {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            count: 0,
        }
    }
}

/// Totals over a set of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSummary {
    pub total: usize,
    /// Every built-in category in declaration order, then `Other`, then
    /// custom tags, then any other caste label found on a record.
    pub by_caste: Vec<CountEntry>,
    pub by_gender: Vec<CountEntry>,
    /// Wards in ascending order, numeric wards by value.
    pub by_ward: Vec<CountEntry>,
    pub newar_count: usize,
    pub manual_count: usize,
    /// Mean over records with a known age.
    pub average_age: Option<f64>,
}

impl DistributionSummary {
    pub fn from_records(
        records: &[ParsedRecord],
        catalog: &CasteCatalog,
        custom: &CustomCasteTags,
    ) -> Self {
        let mut by_caste: Vec<CountEntry> = catalog
            .category_names()
            .into_iter()
            .chain(std::iter::once(OTHER_CASTE))
            .chain(custom.iter())
            .map(CountEntry::new)
            .collect();
        let mut by_gender: Vec<CountEntry> =
            Gender::ALL.iter().map(|g| CountEntry::new(g.as_str())).collect();
        let mut wards: BTreeMap<WardKey, usize> = BTreeMap::new();
        let mut newar_count = 0;
        let mut manual_count = 0;
        let mut age_sum = 0u64;
        let mut age_count = 0u64;

        for record in records {
            match by_caste
                .iter_mut()
                .find(|e| e.label.eq_ignore_ascii_case(&record.caste))
            {
                Some(entry) => entry.count += 1,
                None => by_caste.push(CountEntry {
                    label: record.caste.clone(),
                    count: 1,
                }),
            }
            if let Some(entry) = by_gender.iter_mut().find(|e| e.label == record.gender.as_str()) {
                entry.count += 1;
            }
            let ward = record
                .ward_no
                .as_deref()
                .map(str::trim)
                .filter(|w| !w.is_empty());
            *wards.entry(WardKey::new(ward)).or_default() += 1;
            if record.is_newar {
                newar_count += 1;
            }
            if record.classification_source == ClassificationSource::Manual {
                manual_count += 1;
            }
            if let Some(age) = record.age {
                age_sum += u64::from(age);
                age_count += 1;
            }
        }

        let average_age = (age_count > 0).then(|| age_sum as f64 / age_count as f64);
        Self {
            total: records.len(),
            by_caste,
            by_gender,
            by_ward: wards
                .into_iter()
                .map(|(key, count)| CountEntry {
                    label: key.label,
                    count,
                })
                .collect(),
            newar_count,
            manual_count,
            average_age,
        }
    }

    pub fn caste_count(&self, caste: &str) -> usize {
        self.by_caste
            .iter()
            .find(|e| e.label.eq_ignore_ascii_case(caste))
            .map_or(0, |e| e.count)
    }
}

/// Sort key putting numeric wards first in numeric order, then named wards,
/// then the unassigned bucket.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct WardKey {
    rank: u8,
    number: u64,
    label: String,
}

impl WardKey {
    fn new(ward: Option<&str>) -> Self {
        match ward {
            None => Self {
                rank: 2,
                number: 0,
                label: UNASSIGNED_WARD.to_string(),
            },
            Some(label) => match fold_devanagari_digits(label).parse::<u64>() {
                Ok(number) => Self {
                    rank: 0,
                    number,
                    label: label.to_string(),
                },
                Err(_) => Self {
                    rank: 1,
                    number: 0,
                    label: label.to_string(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use vrs_standards::CasteCategory;

    use super::*;

    fn record(caste: &str, ward: Option<&str>, age: Option<u32>) -> ParsedRecord {
        let mut record = ParsedRecord::new(1);
        record.caste = caste.to_string();
        record.ward_no = ward.map(str::to_string);
        record.age = age;
        record
    }

    #[test]
    fn lists_every_category_and_orders_wards() {
        let catalog = CasteCatalog::new(
            "test",
            vec![CasteCategory::new("Brahmin", "ब्राह्मण"), CasteCategory::new("Dalit", "दलित")],
        );
        let mut custom = CustomCasteTags::new();
        custom.add("Kirat", &catalog).unwrap();

        let records = vec![
            record("Dalit", Some("10"), Some(30)),
            record("Dalit", Some("२"), None),
            record("Other", None, Some(41)),
            record("Muslim", Some("Tole A"), None),
        ];
        let summary = DistributionSummary::from_records(&records, &catalog, &custom);

        let castes: Vec<_> = summary
            .by_caste
            .iter()
            .map(|e| (e.label.as_str(), e.count))
            .collect();
        assert_eq!(
            castes,
            vec![("Brahmin", 0), ("Dalit", 2), ("Other", 1), ("Kirat", 0), ("Muslim", 1)]
        );
        let wards: Vec<_> = summary.by_ward.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(wards, vec!["२", "10", "Tole A", UNASSIGNED_WARD]);
        assert_eq!(summary.average_age, Some(35.5));
        assert_eq!(summary.by_gender[2].count, 4);
    }
}
