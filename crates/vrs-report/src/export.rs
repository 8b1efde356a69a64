//! Record export.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use vrs_model::{ClassificationSource, FieldKey, ParsedRecord};

use crate::error::{ReportError, Result};

/// Output format for exported records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(ReportError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Csv => "csv",
        })
    }
}

/// Writes records as a pretty-printed JSON array.
pub fn write_json<W: Write>(writer: W, records: &[ParsedRecord]) -> Result<()> {
    let mut writer = writer;
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer).map_err(serde_json::Error::io)?;
    Ok(())
}

/// Writes records as CSV.
///
/// The normalized columns come first, named by their JSON keys, followed by
/// every original column seen in any record. An original column whose name
/// equals a normalized one is prefixed with `original:`.
pub fn write_csv<W: Write>(writer: W, records: &[ParsedRecord]) -> Result<()> {
    let mut fixed: Vec<String> = vec!["rowNumber".to_string()];
    fixed.extend(FieldKey::ALL.iter().map(|f| f.as_str().to_string()));
    fixed.push("isNewar".to_string());
    fixed.push("classificationSource".to_string());

    let mut original: Vec<&str> = Vec::new();
    for record in records {
        for key in record.original_data.keys() {
            if !original.contains(&key.as_str()) {
                original.push(key);
            }
        }
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    let header = fixed.iter().cloned().chain(original.iter().map(|key| {
        if fixed.iter().any(|f| f == key) {
            format!("original:{key}")
        } else {
            (*key).to_string()
        }
    }));
    csv_writer.write_record(header.collect::<Vec<_>>())?;

    for record in records {
        let mut row: Vec<String> = Vec::with_capacity(fixed.len() + original.len());
        row.push(record.row_number.to_string());
        row.extend(
            FieldKey::ALL
                .iter()
                .map(|field| record.field_value(*field).unwrap_or_default()),
        );
        row.push(record.is_newar.to_string());
        row.push(
            match record.classification_source {
                ClassificationSource::Auto => "auto",
                ClassificationSource::Manual => "manual",
            }
            .to_string(),
        );
        row.extend(
            original
                .iter()
                .map(|key| record.original_data.get(*key).cloned().unwrap_or_default()),
        );
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes records to a file in the given format.
pub fn export_records(path: &Path, records: &[ParsedRecord], format: ExportFormat) -> Result<()> {
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let writer = BufWriter::new(file);
    match format {
        ExportFormat::Json => write_json(writer, records)?,
        ExportFormat::Csv => write_csv(writer, records)?,
    }
    tracing::info!(
        path = %path.display(),
        format = %format,
        records = records.len(),
        "Exported records"
    );
    Ok(())
}
