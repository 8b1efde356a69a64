//! File-system repository for mapping sets and classification overrides.
//!
//! # Storage Format
//!
//! One directory, two JSON files per dataset:
//!
//! ```text
//! <dataset_id>.mapping.json     # StoredMappingSet
//! <dataset_id>.overrides.json   # StoredOverrides
//! ```
//!
//! Both carry a format `version` and a `savedAt` timestamp.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use vrs_classify::{ClassificationOverrides, CustomCasteTags};

use crate::error::{MappingError, RepositoryError, Result};
use crate::set::MappingSet;

/// Current format revision of stored files.
pub const FORMAT_VERSION: &str = "1.0";

const MAPPING_SUFFIX: &str = ".mapping.json";
const OVERRIDES_SUFFIX: &str = ".overrides.json";

/// A mapping set with repository metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMappingSet {
    #[serde(default = "default_version")]
    pub version: String,
    pub saved_at: DateTime<Utc>,
    #[serde(flatten)]
    pub set: MappingSet,
}

/// Manual classification edits for one dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredOverrides {
    #[serde(default = "default_version")]
    pub version: String,
    pub saved_at: DateTime<Utc>,
    pub dataset_id: String,
    #[serde(default)]
    pub overrides: ClassificationOverrides,
    #[serde(default)]
    pub custom_castes: CustomCasteTags,
}

impl StoredOverrides {
    pub fn new(dataset_id: impl Into<String>) -> Self {
        Self {
            version: default_version(),
            saved_at: Utc::now(),
            dataset_id: dataset_id.into(),
            overrides: ClassificationOverrides::default(),
            custom_castes: CustomCasteTags::default(),
        }
    }
}

fn default_version() -> String {
    FORMAT_VERSION.to_string()
}

/// What the repository holds for one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    pub dataset_id: String,
    pub mapping_count: usize,
    pub manual_count: usize,
    pub upload_count: usize,
    pub has_overrides: bool,
}

/// Directory-backed store keyed by dataset ID.
#[derive(Debug, Clone)]
pub struct MappingRepository {
    base_dir: PathBuf,
}

impl MappingRepository {
    /// Opens a repository, creating the directory if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|source| RepositoryError::Io {
            operation: "create",
            path: base_dir.clone(),
            source,
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Saves a mapping set, stamping the save time.
    pub fn save_mapping(&self, set: &MappingSet) -> Result<PathBuf> {
        let path = self.path_for(&set.dataset_id, MAPPING_SUFFIX)?;
        let stored = StoredMappingSet {
            version: default_version(),
            saved_at: Utc::now(),
            set: set.clone(),
        };
        write_json(&path, &stored)?;
        tracing::debug!(dataset = %set.dataset_id, path = %path.display(), "Saved mapping set");
        Ok(path)
    }

    /// Loads a mapping set. Returns `None` if none was saved.
    pub fn load_mapping(&self, dataset_id: &str) -> Result<Option<MappingSet>> {
        Ok(self.load_stored_mapping(dataset_id)?.map(|stored| stored.set))
    }

    pub fn load_stored_mapping(&self, dataset_id: &str) -> Result<Option<StoredMappingSet>> {
        let path = self.path_for(dataset_id, MAPPING_SUFFIX)?;
        let stored: Option<StoredMappingSet> = read_json(&path)?;
        if let Some(stored) = &stored {
            check_version(&path, &stored.version)?;
        }
        Ok(stored)
    }

    /// Loads the mapping set or starts a fresh one.
    pub fn load_or_create_mapping(&self, dataset_id: &str) -> Result<MappingSet> {
        Ok(self
            .load_mapping(dataset_id)?
            .unwrap_or_else(|| MappingSet::new(dataset_id)))
    }

    pub fn save_overrides(&self, overrides: &StoredOverrides) -> Result<PathBuf> {
        let path = self.path_for(&overrides.dataset_id, OVERRIDES_SUFFIX)?;
        let mut stored = overrides.clone();
        stored.version = default_version();
        stored.saved_at = Utc::now();
        write_json(&path, &stored)?;
        tracing::debug!(
            dataset = %overrides.dataset_id,
            overrides = overrides.overrides.len(),
            "Saved classification overrides"
        );
        Ok(path)
    }

    pub fn load_overrides(&self, dataset_id: &str) -> Result<Option<StoredOverrides>> {
        let path = self.path_for(dataset_id, OVERRIDES_SUFFIX)?;
        let stored: Option<StoredOverrides> = read_json(&path)?;
        if let Some(stored) = &stored {
            check_version(&path, &stored.version)?;
        }
        Ok(stored)
    }

    pub fn load_or_create_overrides(&self, dataset_id: &str) -> Result<StoredOverrides> {
        Ok(self
            .load_overrides(dataset_id)?
            .unwrap_or_else(|| StoredOverrides::new(dataset_id)))
    }

    /// Returns true if a mapping set is stored for the dataset.
    pub fn exists(&self, dataset_id: &str) -> bool {
        self.path_for(dataset_id, MAPPING_SUFFIX)
            .is_ok_and(|path| path.exists())
    }

    /// Lists every dataset with a stored mapping set or overrides, sorted by
    /// ID. Unreadable files are skipped with a warning.
    pub fn list(&self) -> Result<Vec<DatasetSummary>> {
        let entries = fs::read_dir(&self.base_dir).map_err(|source| RepositoryError::Io {
            operation: "read",
            path: self.base_dir.clone(),
            source,
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| RepositoryError::Io {
                operation: "read",
                path: self.base_dir.clone(),
                source,
            })?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let id = name
                .strip_suffix(MAPPING_SUFFIX)
                .or_else(|| name.strip_suffix(OVERRIDES_SUFFIX));
            if let Some(id) = id
                && !ids.iter().any(|existing| existing == id)
            {
                ids.push(id.to_string());
            }
        }
        ids.sort();

        let mut summaries = Vec::with_capacity(ids.len());
        for id in ids {
            let set = match self.load_mapping(&id) {
                Ok(set) => set,
                Err(error) => {
                    tracing::warn!(dataset = %id, %error, "Skipping unreadable mapping set");
                    None
                }
            };
            let has_overrides = self
                .path_for(&id, OVERRIDES_SUFFIX)
                .is_ok_and(|path| path.exists());
            summaries.push(DatasetSummary {
                mapping_count: set.as_ref().map_or(0, MappingSet::mapped_count),
                manual_count: set.as_ref().map_or(0, MappingSet::manual_count),
                upload_count: set.as_ref().map_or(0, |s| s.uploads().len()),
                has_overrides,
                dataset_id: id,
            });
        }
        Ok(summaries)
    }

    /// Deletes everything stored for a dataset. Returns `true` if anything
    /// was removed.
    pub fn delete(&self, dataset_id: &str) -> Result<bool> {
        let mut removed = false;
        for suffix in [MAPPING_SUFFIX, OVERRIDES_SUFFIX] {
            let path = self.path_for(dataset_id, suffix)?;
            if path.exists() {
                fs::remove_file(&path).map_err(|source| RepositoryError::Io {
                    operation: "delete",
                    path: path.clone(),
                    source,
                })?;
                removed = true;
            }
        }
        Ok(removed)
    }

    fn path_for(&self, dataset_id: &str, suffix: &str) -> Result<PathBuf> {
        let id = dataset_id.trim();
        let valid = !id.is_empty()
            && !id.starts_with('.')
            && id
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(MappingError::InvalidDatasetId(dataset_id.to_string()).into());
        }
        Ok(self.base_dir.join(format!("{id}{suffix}")))
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|source| RepositoryError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| RepositoryError::Io {
        operation: "write",
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path).map_err(|source| RepositoryError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_str(&contents).map_err(|source| RepositoryError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(value))
}

fn check_version(path: &Path, found: &str) -> Result<()> {
    let major = |v: &str| v.split('.').next().unwrap_or_default().to_string();
    if major(found) != major(FORMAT_VERSION) {
        return Err(RepositoryError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: found.to_string(),
            expected: FORMAT_VERSION,
        });
    }
    Ok(())
}
