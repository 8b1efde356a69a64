//! Decoded spreadsheet cells.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One cell as produced by a file decoder: text, a number, or nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    #[default]
    Empty,
}

impl CellValue {
    /// Returns true for empty cells and for text that is only whitespace.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) => false,
            Self::Empty => true,
        }
    }

    /// Renders the cell as the string a user would see in the sheet.
    ///
    /// Whole numbers drop the fractional part (`34`, not `34.0`).
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(value) => format_number(*value),
            Self::Empty => String::new(),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_render_without_fraction() {
        assert_eq!(CellValue::Number(34.0).to_text(), "34");
        assert_eq!(CellValue::Number(-2.0).to_text(), "-2");
        assert_eq!(CellValue::Number(2.5).to_text(), "2.5");
    }

    #[test]
    fn blank_text_counts_as_empty() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::from("   ").is_empty());
        assert!(!CellValue::from("x").is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }

    #[test]
    fn none_becomes_empty() {
        let value: CellValue = Option::<String>::None.into();
        assert_eq!(value, CellValue::Empty);
    }
}
