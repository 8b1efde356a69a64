//! Classifier behavior against the embedded tables.

use proptest::prelude::*;
use vrs_classify::{ClassificationOverride, ClassificationOverrides, SurnameClassifier};
use vrs_model::{ClassificationSource, NameClassification, ParsedRecord};

fn standard() -> &'static SurnameClassifier {
    SurnameClassifier::standard().expect("embedded tables")
}

#[test]
fn classifies_common_surnames() {
    let classifier = standard();
    assert_eq!(
        classifier.classify("Ram Prasad Sharma"),
        NameClassification::new("Brahmin", "Sharma")
    );
    assert_eq!(
        classifier.classify("sita gurung"),
        NameClassification::new("Janajati", "Gurung")
    );
}

#[test]
fn devanagari_name_is_classified() {
    let result = standard().classify("राम श्रेष्ठ");
    assert_eq!(result, NameClassification::new("Janajati", "श्रेष्ठ"));
}

#[test]
fn unknown_name_falls_back() {
    assert_eq!(
        standard().classify("Xyzabc Nonexistentname"),
        NameClassification::other("Nonexistentname")
    );
    assert_eq!(standard().classify(""), NameClassification::other(""));
}

#[test]
fn every_dictionary_surname_classifies_into_its_own_category() {
    let catalog = vrs_standards::standard_catalog().expect("embedded catalog");
    let classifier = standard();
    for category in catalog.categories() {
        for surname in category.surnames.iter().chain(&category.surnames_ne) {
            assert_eq!(
                classifier.classify(surname),
                NameClassification::new(category.name.as_str(), surname.as_str()),
                "{surname} should stay in {}",
                category.name
            );
        }
    }
}

#[test]
fn initials_and_similar_surnames_resolve_correctly() {
    let classifier = standard();
    assert_eq!(classifier.classify("Ram KC"), NameClassification::new("Chhetri", "KC"));
    assert_eq!(classifier.classify("Ram K.C."), NameClassification::new("Chhetri", "K.C."));
    assert_eq!(classifier.classify("Maya BK"), NameClassification::new("Dalit", "BK"));
    assert_eq!(
        classifier.classify("Ram Mahato"),
        NameClassification::new("Madhesi", "Mahato")
    );
    assert_eq!(
        classifier.classify("राम महतो"),
        NameClassification::new("Madhesi", "महतो")
    );
}

#[test]
fn newar_tag_is_independent_of_caste() {
    let classifier = standard();
    assert!(classifier.is_newar_surname("Shrestha"));
    assert_eq!(classifier.classify("Shrestha").caste, "Janajati");
    assert!(classifier.is_newar_surname("Joshi"));
    assert_eq!(classifier.classify("Hari Joshi").caste, "Brahmin");
    assert!(!classifier.is_newar_surname(""));
    assert!(!classifier.is_newar_surname("Gurung"));
}

#[test]
fn apply_fills_record() {
    let mut record = ParsedRecord::new(1);
    record.voter_name = "Ram Shrestha".to_string();
    standard().apply(&mut record, Some("Shrestha"));
    assert_eq!(record.caste, "Janajati");
    assert_eq!(record.surname, "Shrestha");
    assert!(record.is_newar);
    assert_eq!(record.classification_source, ClassificationSource::Auto);
}

#[test]
fn manual_override_wins() {
    let classifier = standard();
    let mut record = ParsedRecord::new(3);
    record.voter_id = Some("12345".to_string());
    record.voter_name = "Ram Sharma".to_string();
    classifier.apply(&mut record, None);
    assert_eq!(record.caste, "Brahmin");

    let mut overrides = ClassificationOverrides::new();
    overrides
        .set(
            "12345",
            ClassificationOverride::new(Some("Chhetri".into()), Some("Shrestha".into())),
        )
        .unwrap();

    assert_eq!(overrides.apply_all(std::slice::from_mut(&mut record), classifier), 1);
    assert_eq!(record.caste, "Chhetri");
    assert_eq!(record.surname, "Shrestha");
    assert!(record.is_newar);
    assert_eq!(record.classification_source, ClassificationSource::Manual);
}

#[test]
fn override_merges_partial_updates() {
    let mut overrides = ClassificationOverrides::new();
    overrides
        .set("1:Ram", ClassificationOverride::new(Some("Dalit".into()), None))
        .unwrap();
    overrides
        .set("1:Ram", ClassificationOverride::new(None, Some("BK".into())))
        .unwrap();
    let entry = overrides.get("1:Ram").unwrap();
    assert_eq!(entry.caste.as_deref(), Some("Dalit"));
    assert_eq!(entry.surname.as_deref(), Some("BK"));
    assert!(overrides.set("1:Ram", ClassificationOverride::default()).is_err());

    insta::assert_json_snapshot!(overrides, @r#"
    {
      "1:Ram": {
        "caste": "Dalit",
        "surname": "BK"
      }
    }
    "#);
}

proptest! {
    #[test]
    fn classify_is_deterministic(name in "\\PC{0,40}") {
        let classifier = standard();
        prop_assert_eq!(classifier.classify(&name), classifier.classify(&name));
    }

    #[test]
    fn classify_is_total(name in "[A-Za-z]{0,24}") {
        let result = standard().classify(&name);
        if result.is_other() {
            prop_assert_eq!(result.surname, name.trim().to_string());
        } else {
            prop_assert!(name.to_lowercase().contains(&result.surname.to_lowercase()));
        }
    }
}
