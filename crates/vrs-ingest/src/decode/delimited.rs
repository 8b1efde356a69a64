//! CSV decoding.

use std::path::Path;

use vrs_model::CellValue;

use super::DecodedTable;
use crate::error::{IngestError, Result};

/// Decodes CSV text. The first non-blank record is the header row; records
/// may have differing lengths.
pub fn decode_csv(path: &Path, text: &str) -> Result<DecodedTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        grid.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::from(field)
                    }
                })
                .collect(),
        );
    }
    Ok(DecodedTable::from_grid(grid))
}
