//! Ingestion options.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default upload size limit (25 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 25 * 1024 * 1024;
/// Default limit on data rows per upload.
pub const DEFAULT_MAX_ROWS: usize = 100_000;
/// Default limit on characters per cell.
pub const DEFAULT_MAX_FIELD_LEN: usize = 1_000;

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Csv,
    Xlsx,
    Json,
}

impl InputFormat {
    /// Format implied by a file extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            "json" => Ok(Self::Json),
            other => Err(format!("unsupported format '{other}'")),
        }
    }
}

/// Options for validating and decoding an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    pub max_file_size: u64,
    pub max_rows: usize,
    pub max_field_len: usize,
    /// Fill voter name, age and gender from fixed column positions when the
    /// header row does not name them.
    pub positional_fallback: bool,
    /// Worksheet to read from a workbook. Defaults to the first one.
    pub worksheet: Option<String>,
    /// Overrides format detection by extension.
    pub format: Option<InputFormat>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_rows: DEFAULT_MAX_ROWS,
            max_field_len: DEFAULT_MAX_FIELD_LEN,
            positional_fallback: true,
            worksheet: None,
            format: None,
        }
    }
}

impl IngestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn with_max_rows(mut self, rows: usize) -> Self {
        self.max_rows = rows;
        self
    }

    pub fn with_max_field_len(mut self, chars: usize) -> Self {
        self.max_field_len = chars;
        self
    }

    pub fn with_positional_fallback(mut self, enable: bool) -> Self {
        self.positional_fallback = enable;
        self
    }

    pub fn with_worksheet(mut self, name: impl Into<String>) -> Self {
        self.worksheet = Some(name.into());
        self
    }

    pub fn with_format(mut self, format: InputFormat) -> Self {
        self.format = Some(format);
        self
    }
}
