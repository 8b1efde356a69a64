//! The header rule table.
//!
//! One rule per field, evaluated in [`FieldKey::ALL`] order. The first rule
//! that matches a header claims it, so rules earlier in the table must
//! exclude the headers later rules are meant to catch: the voter name rule
//! vetoes relative names and other "... name" headers such as `Tole Name`,
//! and serial number precedes voter ID so `मतदाता क्र.सं.` is a serial
//! number rather than an ID.

use vrs_model::FieldKey;

/// Matching rule for one field.
#[derive(Debug, Clone, Copy)]
pub struct HeaderRule {
    pub field: FieldKey,
    /// Literal headers compared against the trimmed header as-is.
    pub exact: &'static [&'static str],
    /// Lowercase literals compared against the lowercased header.
    pub equals: &'static [&'static str],
    /// Lowercase substrings; any hit matches unless an exclusion also hits.
    pub contains: &'static [&'static str],
    /// Lowercase substrings that veto a `contains` hit.
    pub excludes: &'static [&'static str],
}

impl HeaderRule {
    /// Tests a header. `trimmed` is the sanitized header, `folded` its
    /// lowercase form.
    pub fn matches(&self, trimmed: &str, folded: &str) -> bool {
        if self.exact.contains(&trimmed) || self.equals.contains(&folded) {
            return true;
        }
        self.contains.iter().any(|p| folded.contains(p))
            && !self.excludes.iter().any(|e| folded.contains(e))
    }
}

/// Rules in evaluation order.
pub static HEADER_RULES: [HeaderRule; 19] = [
    HeaderRule {
        field: FieldKey::SerialNumber,
        exact: &["मतदाता क्र.सं.", "क्र.सं.", "क्र.स.", "सि.नं.", "सि.नं", "क्रम संख्या"],
        equals: &[
            "s.n", "s.n.", "sn", "s.no", "s.no.", "sno", "serial", "serial no", "serial number",
            "serial_number", "serialnumber",
        ],
        contains: &["serial"],
        excludes: &[],
    },
    HeaderRule {
        field: FieldKey::VoterId,
        exact: &["मतदाता परिचयपत्र नं.", "मतदाता नं.", "मतदाता नं", "परिचयपत्र नं."],
        equals: &["voter id", "voterid", "voter_id", "voter no", "voter no.", "voter number", "id"],
        contains: &["मतदाता", "परिचयपत्र", "voter id", "voter no", "voter_id"],
        excludes: &["नाम", "name", "स्थिति", "status"],
    },
    HeaderRule {
        field: FieldKey::VoterName,
        exact: &["नाम", "नाम थर", "नामथर", "मतदाताको नाम", "मतदाताको नाम थर"],
        equals: &["name", "full name", "fullname", "voter name", "voter_name", "votername"],
        contains: &["नाम", "name"],
        excludes: &[
            "पति", "पत्नी", "पिता", "माता", "आमा", "बाबु", "केन्द्र", "स्थल", "टोल", "वडा", "जात",
            "पार्टी", "दल", "spouse", "husband", "wife", "father", "mother", "parent", "surname",
            "last name", "family", "center", "centre", "station", "booth", "tole", "ward",
            "caste", "party", "occupation",
        ],
    },
    HeaderRule {
        field: FieldKey::Age,
        exact: &["उमेर", "उमेर(वर्ष)", "उमेर (वर्ष)"],
        equals: &["age", "age (years)", "age(years)", "age_years"],
        contains: &["उमेर", "age"],
        excludes: &[
            "page", "village", "percentage", "stage", "image", "marriage", "language", "message",
            "average",
        ],
    },
    HeaderRule {
        field: FieldKey::Gender,
        exact: &["लिङ्ग", "लिंग"],
        equals: &["gender", "sex", "m/f"],
        contains: &["लिङ्ग", "लिंग", "gender"],
        excludes: &[],
    },
    HeaderRule {
        field: FieldKey::Spouse,
        exact: &["पति/पत्नीको नाम", "पति/पत्नी", "पति पत्नीको नाम"],
        equals: &["spouse", "spouse name", "husband/wife", "husband/wife name"],
        contains: &["पति", "पत्नी", "spouse", "husband", "wife"],
        excludes: &[],
    },
    HeaderRule {
        field: FieldKey::Parents,
        exact: &["पिता/माताको नाम", "बाबु/आमाको नाम", "पिता/माता"],
        equals: &["parents", "parent", "father/mother", "father/mother name"],
        contains: &["पिता", "माता", "बाबु", "आमा", "father", "mother", "parent"],
        excludes: &[],
    },
    HeaderRule {
        field: FieldKey::Surname,
        exact: &["थर"],
        equals: &["surname", "last name", "lastname", "last_name", "family name", "thar"],
        contains: &["surname"],
        excludes: &[],
    },
    HeaderRule {
        field: FieldKey::Caste,
        exact: &["जात", "जाति", "जातजाति", "जात/जाति"],
        equals: &["caste", "ethnicity", "jat", "jati"],
        contains: &["caste", "ethnicity"],
        excludes: &[],
    },
    HeaderRule {
        field: FieldKey::Status,
        exact: &["स्थिति", "अवस्था", "मतदाता स्थिति"],
        equals: &["status", "voter status", "state"],
        contains: &["status", "स्थिति"],
        excludes: &[],
    },
    HeaderRule {
        field: FieldKey::WardNo,
        exact: &["वडा नं.", "वडा नं", "वडा", "वडा नम्बर"],
        equals: &["ward", "ward no", "ward no.", "ward number", "ward_no", "wardno"],
        contains: &["वडा", "ward"],
        excludes: &[],
    },
    HeaderRule {
        field: FieldKey::CenterName,
        exact: &["मतदान केन्द्र", "मतदान स्थल", "केन्द्रको नाम", "मतदान केन्द्रको नाम"],
        equals: &[
            "center", "centre", "center name", "centre name", "polling center", "polling centre",
            "polling station", "booth",
        ],
        contains: &["केन्द्र", "स्थल", "center", "centre", "polling", "booth"],
        excludes: &[],
    },
    HeaderRule {
        field: FieldKey::Phone,
        exact: &["फोन", "फोन नं.", "मोबाइल", "मोबाइल नं.", "सम्पर्क नं."],
        equals: &[
            "phone", "mobile", "contact", "cell", "phone no", "mobile no", "contact no",
            "phone number", "mobile number",
        ],
        contains: &["phone", "mobile", "contact", "फोन", "मोबाइल", "सम्पर्क"],
        excludes: &[],
    },
    HeaderRule {
        field: FieldKey::Email,
        exact: &["इमेल", "ईमेल"],
        equals: &["email", "e-mail", "mail", "email address"],
        contains: &["email", "e-mail", "इमेल", "ईमेल"],
        excludes: &[],
    },
    HeaderRule {
        field: FieldKey::Occupation,
        exact: &["पेशा", "व्यवसाय"],
        equals: &["occupation", "profession", "job", "work"],
        contains: &["occupation", "profession", "पेशा", "व्यवसाय"],
        excludes: &[],
    },
    HeaderRule {
        field: FieldKey::Tole,
        exact: &["टोल", "ठेगाना", "गाउँ", "टोल/ठेगाना"],
        equals: &["tole", "tol", "address", "village", "locality"],
        contains: &["tole", "address", "टोल", "ठेगाना"],
        excludes: &[],
    },
    HeaderRule {
        field: FieldKey::Family,
        exact: &["परिवार", "घरधुरी", "परिवार नं."],
        equals: &["family", "household", "family no", "household no", "family id"],
        contains: &["family", "household", "परिवार", "घरधुरी"],
        excludes: &[],
    },
    HeaderRule {
        field: FieldKey::Party,
        exact: &["पार्टी", "दल", "राजनीतिक दल"],
        equals: &["party", "political party", "affiliation"],
        contains: &["party", "पार्टी"],
        excludes: &[],
    },
    HeaderRule {
        field: FieldKey::ColorCode,
        exact: &["रङ", "रंग", "रङ कोड"],
        equals: &["color", "colour", "color code", "colour code", "tag"],
        contains: &["color", "colour"],
        excludes: &[],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_follow_field_order() {
        let fields: Vec<FieldKey> = HEADER_RULES.iter().map(|r| r.field).collect();
        assert_eq!(fields, FieldKey::ALL.to_vec());
    }

    #[test]
    fn literals_are_normalized() {
        for rule in &HEADER_RULES {
            for literal in rule.equals.iter().chain(rule.contains).chain(rule.excludes) {
                assert_eq!(*literal, literal.to_lowercase(), "{literal} in {:?}", rule.field);
                assert_eq!(*literal, literal.trim());
            }
        }
    }
}
