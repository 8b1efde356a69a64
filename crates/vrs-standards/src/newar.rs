//! The Newar surname set.

use serde::{Deserialize, Serialize};

/// Lowercase surname substrings that tag a surname as Newar.
///
/// Independent from the caste catalog: a surname may belong to any caste
/// category and still carry the Newar tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewarSurnameSet {
    entries: Vec<String>,
}

impl NewarSurnameSet {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for entry in entries {
            let entry = entry.as_ref().trim().to_lowercase();
            if !entry.is_empty() && !set.entries.contains(&entry) {
                set.entries.push(entry);
            }
        }
        set
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns true if any entry is a case-insensitive substring of `surname`.
    pub fn matches(&self, surname: &str) -> bool {
        let folded = surname.trim().to_lowercase();
        if folded.is_empty() {
            return false;
        }
        self.entries.iter().any(|entry| folded.contains(entry.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
