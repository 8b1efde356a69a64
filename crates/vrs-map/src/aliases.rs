//! Candidate keys for rows that arrive as string-keyed objects.

use std::collections::BTreeMap;

use vrs_model::FieldKey;
use vrs_normalization::sanitize;

use crate::reconcile::match_header;

/// Prioritized candidate keys per field.
///
/// Keys are compared ignoring case and surrounding whitespace. The first
/// candidate present with a non-empty value wins for a row.
#[derive(Debug, Clone)]
pub struct FieldAliases {
    aliases: BTreeMap<FieldKey, Vec<String>>,
}

impl FieldAliases {
    /// The built-in alias lists: the camelCase field key, its snake_case and
    /// upper-case spellings, and the usual Nepali header.
    pub fn standard() -> Self {
        let mut aliases = BTreeMap::new();
        for field in FieldKey::ALL {
            let camel = field.as_str();
            let snake = to_snake_case(camel);
            let mut list = vec![camel.to_string(), snake.clone(), snake.replace('_', " ")];
            list.extend(extra_aliases(field).iter().map(|a| (*a).to_string()));
            aliases.insert(field, list);
        }
        Self { aliases }
    }

    /// Adds a candidate key at the lowest priority.
    pub fn push(&mut self, field: FieldKey, alias: impl Into<String>) {
        self.aliases.entry(field).or_default().push(alias.into());
    }

    pub fn aliases_for(&self, field: FieldKey) -> &[String] {
        self.aliases.get(&field).map_or(&[], Vec::as_slice)
    }

    /// The field whose alias list covers `key`, if any.
    pub fn field_for_key(&self, key: &str) -> Option<FieldKey> {
        let wanted = fold(key);
        self.aliases
            .iter()
            .find(|(_, list)| list.iter().any(|alias| fold(alias) == wanted))
            .map(|(field, _)| *field)
    }

    /// Candidate columns per field for the given keys, best first.
    ///
    /// Keys covered by an alias list follow that list's priority. Keys no
    /// alias covers go through the header rules and are appended after the
    /// alias hits, so Nepali keys in JSON reconcile like spreadsheet headers.
    pub fn candidate_columns<S: AsRef<str>>(&self, keys: &[S]) -> BTreeMap<FieldKey, Vec<usize>> {
        let folded: Vec<String> = keys.iter().map(|k| fold(k.as_ref())).collect();
        let mut candidates: BTreeMap<FieldKey, Vec<usize>> = BTreeMap::new();
        let mut covered = vec![false; keys.len()];

        for (field, list) in &self.aliases {
            for alias in list {
                let alias = fold(alias);
                for (index, key) in folded.iter().enumerate() {
                    if *key == alias && !covered[index] {
                        covered[index] = true;
                        candidates.entry(*field).or_default().push(index);
                    }
                }
            }
        }

        for (index, key) in keys.iter().enumerate() {
            if covered[index] {
                continue;
            }
            if let Some(field) = match_header(key.as_ref()) {
                candidates.entry(field).or_default().push(index);
            }
        }
        candidates
    }
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self::standard()
    }
}

fn fold(key: &str) -> String {
    sanitize(key).to_lowercase()
}

fn to_snake_case(camel: &str) -> String {
    let mut out = String::with_capacity(camel.len() + 4);
    for ch in camel.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn extra_aliases(field: FieldKey) -> &'static [&'static str] {
    match field {
        FieldKey::SerialNumber => &["sn", "s.n", "serial", "मतदाता क्र.सं.", "क्र.सं."],
        FieldKey::VoterId => &["voterNo", "voter_no", "मतदाता परिचयपत्र नं.", "मतदाता नं"],
        FieldKey::VoterName => &["name", "fullName", "full_name", "नाम", "मतदाताको नाम"],
        FieldKey::Age => &["उमेर", "उमेर(वर्ष)"],
        FieldKey::Gender => &["sex", "लिङ्ग", "लिंग"],
        FieldKey::Spouse => &["spouseName", "spouse_name", "पति/पत्नीको नाम"],
        FieldKey::Parents => &["parentName", "parent_name", "पिता/माताको नाम"],
        FieldKey::Surname => &["lastName", "last_name", "थर"],
        FieldKey::Caste => &["जात", "जाति"],
        FieldKey::Status => &["स्थिति"],
        FieldKey::WardNo => &["ward", "वडा नं.", "वडा"],
        FieldKey::CenterName => &["center", "pollingCenter", "मतदान केन्द्र"],
        FieldKey::Phone => &["mobile", "phoneNumber", "फोन", "मोबाइल"],
        FieldKey::Email => &["emailAddress", "इमेल"],
        FieldKey::Occupation => &["पेशा"],
        FieldKey::Tole => &["address", "टोल", "ठेगाना"],
        FieldKey::Family => &["household", "परिवार"],
        FieldKey::Party => &["पार्टी"],
        FieldKey::ColorCode => &["color", "colour", "रङ"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_aliases_cover_key_spellings() {
        let aliases = FieldAliases::standard();
        assert_eq!(
            aliases.aliases_for(FieldKey::VoterId)[..3],
            ["voterId".to_string(), "voter_id".to_string(), "voter id".to_string()]
        );
        assert_eq!(aliases.field_for_key("VOTER ID"), Some(FieldKey::VoterId));
        assert_eq!(aliases.field_for_key("मतदाता परिचयपत्र नं."), Some(FieldKey::VoterId));
        assert_eq!(aliases.field_for_key("remarks"), None);
    }

    #[test]
    fn candidates_keep_alias_priority() {
        let aliases = FieldAliases::standard();
        let keys = ["name", "voterName", "age"];
        let candidates = aliases.candidate_columns(&keys);
        assert_eq!(candidates[&FieldKey::VoterName], vec![1, 0]);
        assert_eq!(candidates[&FieldKey::Age], vec![2]);
    }

    #[test]
    fn uncovered_keys_use_header_rules() {
        let aliases = FieldAliases::standard();
        let keys = ["मतदाता परिचयपत्र नं.", "पति पत्नीको नाम", "कैफियत"];
        let candidates = aliases.candidate_columns(&keys);
        assert_eq!(candidates[&FieldKey::VoterId], vec![0]);
        assert_eq!(candidates[&FieldKey::Spouse], vec![1]);
        assert_eq!(candidates.len(), 2);
    }
}
