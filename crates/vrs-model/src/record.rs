//! The reconciled voter record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classification::{ClassificationSource, OTHER_CASTE};
use crate::field::FieldKey;
use crate::gender::Gender;

/// A voter row after header reconciliation, normalization and
/// classification.
///
/// `original_data` holds every source column verbatim, including the ones
/// that also landed in a normalized field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRecord {
    /// 1-based position of the row among the data rows of its file.
    pub row_number: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voter_id: Option<String>,
    pub voter_name: String,
    pub age: Option<u32>,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parents: Option<String>,
    pub surname: String,
    pub caste: String,
    pub is_newar: bool,
    #[serde(default)]
    pub classification_source: ClassificationSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ward_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tole: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
    #[serde(default)]
    pub original_data: BTreeMap<String, String>,
}

impl ParsedRecord {
    /// An empty record for the given data row.
    pub fn new(row_number: usize) -> Self {
        Self {
            row_number,
            serial_number: None,
            voter_id: None,
            voter_name: String::new(),
            age: None,
            gender: Gender::Other,
            spouse: None,
            parents: None,
            surname: String::new(),
            caste: OTHER_CASTE.to_string(),
            is_newar: false,
            classification_source: ClassificationSource::Auto,
            status: None,
            ward_no: None,
            center_name: None,
            phone: None,
            email: None,
            occupation: None,
            tole: None,
            family: None,
            party: None,
            color_code: None,
            original_data: BTreeMap::new(),
        }
    }

    /// Stable key used to attach manual overrides to this record.
    ///
    /// The voter ID when there is one, otherwise `<serial>:<name>` with the
    /// row number standing in for a missing serial.
    pub fn record_key(&self) -> String {
        if let Some(id) = self.voter_id.as_deref().filter(|id| !id.trim().is_empty()) {
            return id.trim().to_string();
        }
        let serial = self
            .serial_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or_else(|| self.row_number.to_string(), str::to_string);
        format!("{serial}:{}", self.voter_name.trim())
    }

    /// The normalized value of a field rendered as text.
    pub fn field_value(&self, field: FieldKey) -> Option<String> {
        match field {
            FieldKey::SerialNumber => self.serial_number.clone(),
            FieldKey::VoterId => self.voter_id.clone(),
            FieldKey::VoterName => Some(self.voter_name.clone()),
            FieldKey::Age => self.age.map(|age| age.to_string()),
            FieldKey::Gender => Some(self.gender.as_str().to_string()),
            FieldKey::Spouse => self.spouse.clone(),
            FieldKey::Parents => self.parents.clone(),
            FieldKey::Surname => Some(self.surname.clone()),
            FieldKey::Caste => Some(self.caste.clone()),
            FieldKey::Status => self.status.clone(),
            FieldKey::WardNo => self.ward_no.clone(),
            FieldKey::CenterName => self.center_name.clone(),
            FieldKey::Phone => self.phone.clone(),
            FieldKey::Email => self.email.clone(),
            FieldKey::Occupation => self.occupation.clone(),
            FieldKey::Tole => self.tole.clone(),
            FieldKey::Family => self.family.clone(),
            FieldKey::Party => self.party.clone(),
            FieldKey::ColorCode => self.color_code.clone(),
        }
    }

    /// Stores a text value in one of the optional text fields.
    ///
    /// Fields with a dedicated type (name, age, gender, surname, caste) are
    /// filled by the record builder and ignored here.
    pub fn set_text_field(&mut self, field: FieldKey, value: String) {
        let slot = match field {
            FieldKey::SerialNumber => &mut self.serial_number,
            FieldKey::VoterId => &mut self.voter_id,
            FieldKey::Spouse => &mut self.spouse,
            FieldKey::Parents => &mut self.parents,
            FieldKey::Status => &mut self.status,
            FieldKey::WardNo => &mut self.ward_no,
            FieldKey::CenterName => &mut self.center_name,
            FieldKey::Phone => &mut self.phone,
            FieldKey::Email => &mut self.email,
            FieldKey::Occupation => &mut self.occupation,
            FieldKey::Tole => &mut self.tole,
            FieldKey::Family => &mut self.family,
            FieldKey::Party => &mut self.party,
            FieldKey::ColorCode => &mut self.color_code,
            FieldKey::VoterName
            | FieldKey::Age
            | FieldKey::Gender
            | FieldKey::Surname
            | FieldKey::Caste => return,
        };
        *slot = Some(value);
    }
}
