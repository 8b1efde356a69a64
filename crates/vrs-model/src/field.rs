//! Normalized field keys of a voter record.
//!
//! The declaration order of [`FieldKey::ALL`] is the order in which the
//! header reconciler evaluates its rules, so it is load-bearing: serial
//! number must come before voter ID.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    SerialNumber,
    VoterId,
    VoterName,
    Age,
    Gender,
    Spouse,
    Parents,
    Surname,
    Caste,
    Status,
    WardNo,
    CenterName,
    Phone,
    Email,
    Occupation,
    Tole,
    Family,
    Party,
    ColorCode,
}

impl FieldKey {
    pub const ALL: [FieldKey; 19] = [
        FieldKey::SerialNumber,
        FieldKey::VoterId,
        FieldKey::VoterName,
        FieldKey::Age,
        FieldKey::Gender,
        FieldKey::Spouse,
        FieldKey::Parents,
        FieldKey::Surname,
        FieldKey::Caste,
        FieldKey::Status,
        FieldKey::WardNo,
        FieldKey::CenterName,
        FieldKey::Phone,
        FieldKey::Email,
        FieldKey::Occupation,
        FieldKey::Tole,
        FieldKey::Family,
        FieldKey::Party,
        FieldKey::ColorCode,
    ];

    /// The internal key, as used in serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SerialNumber => "serialNumber",
            Self::VoterId => "voterId",
            Self::VoterName => "voterName",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Spouse => "spouse",
            Self::Parents => "parents",
            Self::Surname => "surname",
            Self::Caste => "caste",
            Self::Status => "status",
            Self::WardNo => "wardNo",
            Self::CenterName => "centerName",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Occupation => "occupation",
            Self::Tole => "tole",
            Self::Family => "family",
            Self::Party => "party",
            Self::ColorCode => "colorCode",
        }
    }

    /// Human-readable English label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SerialNumber => "Serial No.",
            Self::VoterId => "Voter ID",
            Self::VoterName => "Voter Name",
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::Spouse => "Spouse",
            Self::Parents => "Parents",
            Self::Surname => "Surname",
            Self::Caste => "Caste",
            Self::Status => "Status",
            Self::WardNo => "Ward No.",
            Self::CenterName => "Polling Center",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::Occupation => "Occupation",
            Self::Tole => "Tole / Address",
            Self::Family => "Family",
            Self::Party => "Party",
            Self::ColorCode => "Color Code",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase alphanumerics only, so `voter_id`, `Voter-ID` and `voterId`
/// all compare equal.
fn compact_key(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

impl FromStr for FieldKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = compact_key(s);
        FieldKey::ALL
            .iter()
            .copied()
            .find(|key| compact_key(key.as_str()) == wanted)
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}
