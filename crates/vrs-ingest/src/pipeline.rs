//! The ingest pipeline: validate, decode, reconcile, build, classify.

use std::path::{Path, PathBuf};
use std::time::Instant;

use vrs_classify::{ClassificationOverrides, SurnameClassifier};
use vrs_map::{
    ColumnPlan, FieldAliases, MappingSet, ReconciliationResult, fingerprint, reconcile_headers,
};
use vrs_model::{ParsedRecord, redact_value};

use crate::builder::RecordBuilder;
use crate::decode::decode;
use crate::error::{IngestError, Result};
use crate::options::{InputFormat, IngestOptions};
use crate::validate::{check_shape, check_signature, check_size};

/// Collaborators the pipeline consults besides the upload itself.
pub struct IngestContext<'a> {
    pub classifier: &'a SurnameClassifier,
    pub aliases: FieldAliases,
    /// Persisted mapping set of the dataset. Receives the upload's headers
    /// and supplies manual column mappings.
    pub mapping: Option<&'a mut MappingSet>,
    /// Manual classifications applied after the classifier.
    pub overrides: Option<&'a ClassificationOverrides>,
}

impl<'a> IngestContext<'a> {
    pub fn new(classifier: &'a SurnameClassifier) -> Self {
        Self {
            classifier,
            aliases: FieldAliases::standard(),
            mapping: None,
            overrides: None,
        }
    }

    pub fn with_mapping(mut self, mapping: &'a mut MappingSet) -> Self {
        self.mapping = Some(mapping);
        self
    }

    pub fn with_overrides(mut self, overrides: &'a ClassificationOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn with_aliases(mut self, aliases: FieldAliases) -> Self {
        self.aliases = aliases;
        self
    }
}

/// Result of ingesting one upload.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub path: PathBuf,
    pub format: InputFormat,
    /// SHA-256 of the upload bytes.
    pub sha256: String,
    pub headers: Vec<String>,
    pub reconciliation: ReconciliationResult,
    pub records: Vec<ParsedRecord>,
    pub skipped_blank_rows: usize,
    /// Headers seen for the first time in the dataset's mapping set.
    pub new_headers: usize,
    pub manual_overrides: usize,
}

/// Reads and ingests an upload from disk. The size limit is checked before
/// the file is read.
pub fn ingest_file(
    path: &Path,
    options: &IngestOptions,
    context: IngestContext<'_>,
) -> Result<IngestOutcome> {
    let metadata = std::fs::metadata(path).map_err(|e| read_error(path, e))?;
    check_size(path, metadata.len(), options)?;
    let bytes = std::fs::read(path).map_err(|e| read_error(path, e))?;
    ingest_bytes(path, &bytes, options, context)
}

/// Ingests upload bytes. `path` names the upload for format detection and
/// error messages.
pub fn ingest_bytes(
    path: &Path,
    bytes: &[u8],
    options: &IngestOptions,
    context: IngestContext<'_>,
) -> Result<IngestOutcome> {
    let started = Instant::now();
    let format = options
        .format
        .or_else(|| InputFormat::from_path(path))
        .ok_or_else(|| IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

    check_size(path, bytes.len() as u64, options)?;
    check_signature(path, bytes, format)?;
    let table = decode(path, bytes, format, options)?;
    check_shape(path, &table, options)?;

    let sha256 = fingerprint(bytes);
    let reconciliation = reconcile_headers(&table.headers);

    let IngestContext {
        classifier,
        aliases,
        mapping,
        overrides,
    } = context;

    let mut plan = if table.keyed {
        ColumnPlan::from_keys(&table.headers, &aliases)
    } else {
        ColumnPlan::from_reconciliation(&reconciliation)
    };

    let mut new_headers = 0;
    if let Some(set) = mapping {
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        new_headers = set.merge_headers(&table.headers, &file_name, &sha256);
        set.auto_assign(&reconciliation);
        plan = plan.with_manual_mappings(&table.headers, set);
    }
    if options.positional_fallback && !table.keyed {
        plan = plan.with_positional_fallback(table.column_count());
    }

    let builder = RecordBuilder::new(&table.headers, &plan, classifier);
    let mut records = Vec::with_capacity(table.rows.len());
    for (index, row) in table.rows.iter().enumerate() {
        let record = builder.build(index + 1, row);
        if record.voter_name.is_empty() {
            tracing::warn!(row = index + 1, "Row has no voter name");
        } else {
            tracing::trace!(
                row = index + 1,
                name = %redact_value(&record.voter_name),
                caste = %record.caste,
                "Built record"
            );
        }
        records.push(record);
    }

    let manual_overrides = overrides.map_or(0, |o| o.apply_all(&mut records, classifier));

    tracing::info!(
        path = %path.display(),
        format = %format,
        records = records.len(),
        mapped_fields = plan.fields().count(),
        conflicts = reconciliation.conflicts.len(),
        blank_rows = table.skipped_blank_rows,
        manual_overrides,
        duration_ms = started.elapsed().as_millis(),
        "Ingested voter roll"
    );

    Ok(IngestOutcome {
        path: path.to_path_buf(),
        format,
        sha256,
        headers: table.headers,
        reconciliation,
        records,
        skipped_blank_rows: table.skipped_blank_rows,
        new_headers,
        manual_overrides,
    })
}

fn read_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}
