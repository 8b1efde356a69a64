//! Decoders turning upload bytes into a header row and data rows.

mod delimited;
mod json;
mod workbook;

use std::path::Path;

use vrs_model::CellValue;
use vrs_normalization::sanitize;

use crate::error::Result;
use crate::options::{InputFormat, IngestOptions};

pub use delimited::decode_csv;
pub use json::decode_json;
pub use workbook::decode_xlsx;

/// A decoded upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedTable {
    /// Header texts exactly as they appear in the upload, in column order.
    pub headers: Vec<String>,
    /// Data rows. Rows may be shorter or longer than the header row.
    pub rows: Vec<Vec<CellValue>>,
    /// True when rows came from string-keyed objects rather than a grid.
    pub keyed: bool,
    /// Rows dropped because every cell was empty.
    pub skipped_blank_rows: usize,
}

impl DecodedTable {
    /// Builds a table from a grid whose first non-blank row is the header
    /// row. Blank data rows are dropped and counted.
    pub fn from_grid(grid: Vec<Vec<CellValue>>) -> Self {
        let mut rows = grid.into_iter();
        let mut table = Self::default();
        for row in rows.by_ref() {
            if !is_blank(&row) {
                table.headers = row.iter().map(CellValue::to_text).collect();
                break;
            }
        }
        for row in rows {
            if is_blank(&row) {
                table.skipped_blank_rows += 1;
            } else {
                table.rows.push(row);
            }
        }
        table
    }

    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or_default()
    }
}

fn is_blank(row: &[CellValue]) -> bool {
    row.iter().all(|cell| sanitize(&cell.to_text()).is_empty())
}

/// Decodes validated bytes in the given format.
pub fn decode(path: &Path, bytes: &[u8], format: InputFormat, options: &IngestOptions) -> Result<DecodedTable> {
    let table = match format {
        InputFormat::Csv => decode_csv(path, crate::validate::decode_text(path, bytes)?)?,
        InputFormat::Json => decode_json(path, crate::validate::decode_text(path, bytes)?)?,
        InputFormat::Xlsx => decode_xlsx(path, bytes, options.worksheet.as_deref())?,
    };
    tracing::debug!(
        path = %path.display(),
        format = %format,
        columns = table.headers.len(),
        rows = table.rows.len(),
        blank_rows = table.skipped_blank_rows,
        "Decoded upload"
    );
    Ok(table)
}
