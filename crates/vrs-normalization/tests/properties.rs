use proptest::prelude::*;
use vrs_model::Gender;
use vrs_normalization::{normalize_gender, parse_age, sanitize};

proptest! {
    #[test]
    fn gender_normalization_is_idempotent(raw in "\\PC{0,12}") {
        let once = normalize_gender(&raw);
        prop_assert_eq!(normalize_gender(once.as_str()), once);
    }

    #[test]
    fn sanitize_is_idempotent(raw in "\\PC{0,40}") {
        let once = sanitize(&raw);
        prop_assert_eq!(sanitize(&once), once.clone());
        prop_assert!(!once.starts_with(' ') && !once.ends_with(' '));
        prop_assert!(!once.contains("  "));
    }

    #[test]
    fn ascii_ages_round_trip(age in 0u32..150) {
        prop_assert_eq!(parse_age(&age.to_string()), Some(age));
    }
}

#[test]
fn gender_labels_normalize_to_themselves() {
    for gender in Gender::ALL {
        assert_eq!(normalize_gender(gender.as_str()), gender);
    }
}
