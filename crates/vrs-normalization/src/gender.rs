//! Gender vocabulary.

use vrs_model::Gender;

use crate::text::sanitize;

const MALE: [&str; 3] = ["male", "m", "पुरुष"];
const FEMALE: [&str; 3] = ["female", "f", "महिला"];

/// Maps a raw gender cell to [`Gender`].
///
/// Recognizes `male`/`m`/`पुरुष` and `female`/`f`/`महिला` ignoring case and
/// surrounding whitespace. Everything else, including blank cells, is
/// [`Gender::Other`].
pub fn normalize_gender(raw: &str) -> Gender {
    let value = sanitize(raw).to_lowercase();
    if MALE.contains(&value.as_str()) {
        Gender::Male
    } else if FEMALE.contains(&value.as_str()) {
        Gender::Female
    } else {
        Gender::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_both_scripts() {
        assert_eq!(normalize_gender("Male"), Gender::Male);
        assert_eq!(normalize_gender(" M "), Gender::Male);
        assert_eq!(normalize_gender("पुरुष"), Gender::Male);
        assert_eq!(normalize_gender("FEMALE"), Gender::Female);
        assert_eq!(normalize_gender("f"), Gender::Female);
        assert_eq!(normalize_gender("महिला"), Gender::Female);
    }

    #[test]
    fn unknown_is_other() {
        assert_eq!(normalize_gender(""), Gender::Other);
        assert_eq!(normalize_gender("other"), Gender::Other);
        assert_eq!(normalize_gender("x"), Gender::Other);
    }
}
