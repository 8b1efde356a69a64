use vrs_classify::CustomCasteTags;
use vrs_model::{ClassificationSource, Gender, ParsedRecord};
use vrs_report::DistributionSummary;
use vrs_standards::{CasteCatalog, CasteCategory};

fn voter(row: usize, caste: &str, gender: Gender, ward: &str, age: u32) -> ParsedRecord {
    let mut record = ParsedRecord::new(row);
    record.caste = caste.to_string();
    record.gender = gender;
    record.ward_no = Some(ward.to_string());
    record.age = Some(age);
    record
}

#[test]
fn summary_json_shape() {
    let catalog = CasteCatalog::new(
        "test",
        vec![
            CasteCategory::new("Brahmin", "ब्राह्मण"),
            CasteCategory::new("Janajati", "जनजाति"),
        ],
    );
    let mut first = voter(1, "Janajati", Gender::Male, "4", 30);
    first.is_newar = true;
    let mut second = voter(2, "Janajati", Gender::Female, "12", 41);
    second.classification_source = ClassificationSource::Manual;
    let records = vec![first, second, voter(3, "Brahmin", Gender::Female, "4", 25)];

    let summary = DistributionSummary::from_records(&records, &catalog, &CustomCasteTags::new());
    assert_eq!(summary.caste_count("janajati"), 2);

    insta::assert_json_snapshot!(summary, @r#"
    {
      "total": 3,
      "byCaste": [
        {
          "label": "Brahmin",
          "count": 1
        },
        {
          "label": "Janajati",
          "count": 2
        },
        {
          "label": "Other",
          "count": 0
        }
      ],
      "byGender": [
        {
          "label": "male",
          "count": 1
        },
        {
          "label": "female",
          "count": 2
        },
        {
          "label": "other",
          "count": 0
        }
      ],
      "byWard": [
        {
          "label": "4",
          "count": 2
        },
        {
          "label": "12",
          "count": 1
        }
      ],
      "newarCount": 1,
      "manualCount": 1,
      "averageAge": 32.0
    }
    "#);
}
