use serde::{Deserialize, Serialize};

use crate::field::FieldKey;

/// Whether a column mapping was suggested by the reconciler or set by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingOrigin {
    #[default]
    Auto,
    Manual,
}

/// One raw source column and the field it maps to, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub source_column: String,
    pub target_field: Option<FieldKey>,
    #[serde(default)]
    pub origin: MappingOrigin,
}

impl FieldMapping {
    pub fn unmapped(source_column: impl Into<String>) -> Self {
        Self {
            source_column: source_column.into(),
            target_field: None,
            origin: MappingOrigin::Auto,
        }
    }

    pub fn auto(source_column: impl Into<String>, target_field: FieldKey) -> Self {
        Self {
            source_column: source_column.into(),
            target_field: Some(target_field),
            origin: MappingOrigin::Auto,
        }
    }

    pub fn manual(source_column: impl Into<String>, target_field: Option<FieldKey>) -> Self {
        Self {
            source_column: source_column.into(),
            target_field,
            origin: MappingOrigin::Manual,
        }
    }

    pub fn is_mapped(&self) -> bool {
        self.target_field.is_some()
    }

    pub fn is_manual(&self) -> bool {
        self.origin == MappingOrigin::Manual
    }
}
