//! Upload validation: size, signature, encoding and table shape.

use std::path::Path;

use crate::decode::DecodedTable;
use crate::error::{IngestError, Result};
use crate::options::{InputFormat, IngestOptions};

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Rejects uploads larger than the configured limit.
pub fn check_size(path: &Path, size: u64, options: &IngestOptions) -> Result<()> {
    if size > options.max_file_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: options.max_file_size,
        });
    }
    Ok(())
}

/// Checks that a workbook starts with the ZIP container signature.
pub fn check_workbook_signature(path: &Path, bytes: &[u8]) -> Result<()> {
    if !bytes.starts_with(ZIP_MAGIC) {
        return Err(IngestError::InvalidSignature {
            path: path.to_path_buf(),
            format: "XLSX",
        });
    }
    Ok(())
}

/// Validates a text upload and returns it as UTF-8 without a BOM.
///
/// Rejects UTF-16 byte order marks, NUL bytes and invalid UTF-8.
pub fn decode_text<'a>(path: &Path, bytes: &'a [u8]) -> Result<&'a str> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 BE",
        });
    }
    if bytes.contains(&0) {
        return Err(IngestError::ContainsNul {
            path: path.to_path_buf(),
        });
    }
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    std::str::from_utf8(bytes).map_err(|_| IngestError::UnsupportedEncoding {
        path: path.to_path_buf(),
        encoding: "a non-UTF-8 encoding",
    })
}

/// Signature check for any format.
pub fn check_signature(path: &Path, bytes: &[u8], format: InputFormat) -> Result<()> {
    match format {
        InputFormat::Xlsx => check_workbook_signature(path, bytes),
        InputFormat::Csv | InputFormat::Json => decode_text(path, bytes).map(|_| ()),
    }
}

/// Enforces the header, row count and cell length limits on a decoded table.
pub fn check_shape(path: &Path, table: &DecodedTable, options: &IngestOptions) -> Result<()> {
    if table.headers.is_empty() {
        return Err(IngestError::MissingHeader {
            path: path.to_path_buf(),
        });
    }
    if table.rows.len() > options.max_rows {
        return Err(IngestError::TooManyRows {
            path: path.to_path_buf(),
            rows: table.rows.len(),
            max_rows: options.max_rows,
        });
    }

    let header_lengths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    let row_lengths = table
        .rows
        .iter()
        .map(|row| row.iter().map(|cell| cell.to_text().chars().count()).collect::<Vec<_>>());
    for (row, lengths) in std::iter::once(header_lengths).chain(row_lengths).enumerate() {
        if let Some((column, length)) = lengths
            .into_iter()
            .enumerate()
            .find(|(_, length)| *length > options.max_field_len)
        {
            return Err(IngestError::FieldTooLong {
                path: path.to_path_buf(),
                row,
                column: column + 1,
                length,
                max_length: options.max_field_len,
            });
        }
    }

    if table.headers.len() > 200 {
        tracing::warn!(
            path = %path.display(),
            columns = table.headers.len(),
            "Upload has more than 200 columns"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use vrs_model::CellValue;

    use super::*;

    fn path() -> &'static Path {
        Path::new("upload.csv")
    }

    #[test]
    fn size_limit_is_inclusive() {
        let options = IngestOptions::new().with_max_file_size(10);
        assert!(check_size(path(), 10, &options).is_ok());
        assert!(matches!(
            check_size(path(), 11, &options),
            Err(IngestError::FileTooLarge { size: 11, .. })
        ));
    }

    #[test]
    fn text_encoding_checks() {
        assert_eq!(decode_text(path(), b"\xEF\xBB\xBFname").unwrap(), "name");
        assert!(matches!(
            decode_text(path(), b"\xFF\xFEn\0a\0"),
            Err(IngestError::UnsupportedEncoding { encoding: "UTF-16 LE", .. })
        ));
        assert!(matches!(
            decode_text(path(), b"na\0me"),
            Err(IngestError::ContainsNul { .. })
        ));
        assert!(matches!(
            decode_text(path(), b"\xC3\x28"),
            Err(IngestError::UnsupportedEncoding { .. })
        ));
    }

    #[test]
    fn workbook_needs_zip_magic() {
        assert!(check_workbook_signature(Path::new("a.xlsx"), b"PK\x03\x04rest").is_ok());
        assert!(matches!(
            check_signature(Path::new("a.xlsx"), b"name,age\n", InputFormat::Xlsx),
            Err(IngestError::InvalidSignature { format: "XLSX", .. })
        ));
    }

    #[test]
    fn shape_limits() {
        let table = DecodedTable {
            headers: vec!["नाम".into()],
            rows: vec![vec![CellValue::from("Ram")], vec![CellValue::from("Sita")]],
            ..DecodedTable::default()
        };
        assert!(check_shape(path(), &table, &IngestOptions::default()).is_ok());
        assert!(matches!(
            check_shape(path(), &table, &IngestOptions::new().with_max_rows(1)),
            Err(IngestError::TooManyRows { rows: 2, .. })
        ));
        assert!(matches!(
            check_shape(path(), &table, &IngestOptions::new().with_max_field_len(3)),
            Err(IngestError::FieldTooLong { row: 2, column: 1, length: 4, .. })
        ));

        let empty = DecodedTable::default();
        assert!(matches!(
            check_shape(path(), &empty, &IngestOptions::default()),
            Err(IngestError::MissingHeader { .. })
        ));
    }
}
