//! XLSX decoding.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use vrs_model::CellValue;

use super::DecodedTable;
use crate::error::{IngestError, Result};

/// Decodes one worksheet of an XLSX workbook: the named one, or the first.
///
/// Cells are placed at their sheet coordinates, so a used range that does
/// not start at column A keeps its leading empty columns.
pub fn decode_xlsx(path: &Path, bytes: &[u8], worksheet: Option<&str>) -> Result<DecodedTable> {
    let mut workbook: Xlsx<_> =
        open_workbook_from_rs(Cursor::new(bytes)).map_err(|e: calamine::XlsxError| IngestError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let names = workbook.sheet_names();
    let name = match worksheet {
        Some(wanted) => names
            .iter()
            .find(|name| name.trim().eq_ignore_ascii_case(wanted.trim()))
            .cloned()
            .ok_or_else(|| IngestError::WorksheetNotFound {
                path: path.to_path_buf(),
                name: wanted.to_string(),
            })?,
        None => names.first().cloned().ok_or_else(|| IngestError::MissingHeader {
            path: path.to_path_buf(),
        })?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e: calamine::XlsxError| IngestError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let offset = usize::try_from(start_col).unwrap_or_default();
    let mut grid: Vec<Vec<CellValue>> = Vec::with_capacity(range.height() + 1);
    if start_row > 0 {
        tracing::debug!(sheet = %name, start_row, "Worksheet data starts below row 1");
    }
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; offset];
        cells.extend(row.iter().map(cell_value));
        grid.push(cells);
    }

    tracing::debug!(
        path = %path.display(),
        sheet = %name,
        sheets = names.len(),
        "Read worksheet"
    );
    Ok(DecodedTable::from_grid(grid))
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(text) if text.is_empty() => CellValue::Empty,
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Float(value) => CellValue::Number(*value),
        Data::Int(value) => CellValue::from(*value),
        Data::DateTime(value) => CellValue::Number(value.as_f64()),
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use calamine::{ExcelDateTime, ExcelDateTimeType};

    use super::*;

    #[test]
    fn cells_keep_their_numeric_value() {
        assert_eq!(cell_value(&Data::Int(34)).to_text(), "34");
        assert_eq!(cell_value(&Data::Float(29.0)).to_text(), "29");
        let date = ExcelDateTime::new(45292.0, ExcelDateTimeType::DateTime, false);
        assert_eq!(cell_value(&Data::DateTime(date)).to_text(), "45292");
        assert_eq!(cell_value(&Data::String(String::new())), CellValue::Empty);
        assert_eq!(cell_value(&Data::Bool(true)).to_text(), "true");
    }
}
