//! JSON decoding.
//!
//! Two shapes are accepted: an array of objects, whose keys become the
//! header row in first-seen order, and an array of arrays, whose first
//! element is the header row.

use std::path::Path;

use serde_json::Value;
use vrs_model::CellValue;

use super::DecodedTable;
use crate::error::{IngestError, Result};

pub fn decode_json(path: &Path, text: &str) -> Result<DecodedTable> {
    let value: Value = serde_json::from_str(text).map_err(|e| IngestError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let Value::Array(items) = value else {
        return Err(shape_error(path, "top level must be an array"));
    };

    match items.first() {
        None => Ok(DecodedTable::default()),
        Some(Value::Object(_)) => decode_objects(path, items),
        Some(Value::Array(_)) => {
            let mut grid = Vec::with_capacity(items.len());
            for item in items {
                let Value::Array(cells) = item else {
                    return Err(shape_error(path, "rows must all be arrays"));
                };
                grid.push(cells.iter().map(cell_value).collect());
            }
            Ok(DecodedTable::from_grid(grid))
        }
        Some(_) => Err(shape_error(path, "rows must be objects or arrays")),
    }
}

fn decode_objects(path: &Path, items: Vec<Value>) -> Result<DecodedTable> {
    let mut raw_keys: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(items.len());
    for item in items {
        let Value::Object(map) = item else {
            return Err(shape_error(path, "rows must all be objects"));
        };
        for key in map.keys() {
            if !raw_keys.contains(key) {
                raw_keys.push(key.clone());
            }
        }
        objects.push(map);
    }

    let mut table = DecodedTable {
        headers: raw_keys.clone(),
        keyed: true,
        ..DecodedTable::default()
    };
    for map in objects {
        let row: Vec<CellValue> = raw_keys
            .iter()
            .map(|key| map.get(key).map_or(CellValue::Empty, cell_value))
            .collect();
        if row.iter().all(CellValue::is_empty) {
            table.skipped_blank_rows += 1;
        } else {
            table.rows.push(row);
        }
    }
    Ok(table)
}

fn cell_value(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::String(text) if text.is_empty() => CellValue::Empty,
        Value::String(text) => CellValue::Text(text.clone()),
        Value::Number(number) => number
            .as_f64()
            .map_or_else(|| CellValue::Text(number.to_string()), CellValue::Number),
        Value::Bool(flag) => CellValue::Text(flag.to_string()),
        Value::Array(_) | Value::Object(_) => CellValue::Text(value.to_string()),
    }
}

fn shape_error(path: &Path, message: &str) -> IngestError {
    IngestError::JsonParse {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn objects_keep_first_seen_key_order() {
        let text = r#"[
            {"voterName": "Ram Shrestha", "age": 34},
            {"gender": "पुरुष", "voterName": "Hari", "age": null},
            {}
        ]"#;
        let table = decode_json(Path::new("a.json"), text).unwrap();
        assert!(table.keyed);
        assert_eq!(table.headers, vec!["voterName", "age", "gender"]);
        assert_eq!(
            table.rows[0],
            vec![CellValue::from("Ram Shrestha"), CellValue::Number(34.0), CellValue::Empty]
        );
        assert_eq!(table.rows[1][2], CellValue::from("पुरुष"));
        assert_eq!(table.skipped_blank_rows, 1);
    }

    #[test]
    fn arrays_use_first_row_as_headers() {
        let text = r#"[["नाम", "उमेर"], ["Ram", "34"]]"#;
        let table = decode_json(Path::new("a.json"), text).unwrap();
        assert!(!table.keyed);
        assert_eq!(table.headers, vec!["नाम", "उमेर"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(decode_json(Path::new("a.json"), r#"{"a": 1}"#).is_err());
        assert!(decode_json(Path::new("a.json"), r#"[1, 2]"#).is_err());
        assert!(decode_json(Path::new("a.json"), r#"[{"a": 1}, [1]]"#).is_err());
        assert!(decode_json(Path::new("a.json"), "[").is_err());
    }
}
