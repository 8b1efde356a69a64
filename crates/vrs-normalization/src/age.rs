//! Age parsing.

use crate::text::{fold_devanagari_digits, sanitize};

/// Parses an age from the leading digits of a cell.
///
/// ASCII and Devanagari digits are accepted and anything after the digits
/// is ignored, so `"३४ वर्ष"` reads as 34. Returns `None` when the value does
/// not start with a digit or does not fit in a `u32`.
pub fn parse_age(raw: &str) -> Option<u32> {
    let folded = fold_devanagari_digits(&sanitize(raw));
    let digits: String = folded.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ascii_and_devanagari() {
        assert_eq!(parse_age("34"), Some(34));
        assert_eq!(parse_age(" ३४ वर्ष "), Some(34));
        assert_eq!(parse_age("45 years"), Some(45));
        assert_eq!(parse_age("34.0"), Some(34));
    }

    #[test]
    fn rejects_non_numeric() {
        assert_eq!(parse_age(""), None);
        assert_eq!(parse_age("unknown"), None);
        assert_eq!(parse_age("age 34"), None);
        assert_eq!(parse_age("99999999999"), None);
    }
}
