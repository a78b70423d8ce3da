//! Loading analyzer exports into a [`ResultTable`].
//!
//! Exports come straight off the analyzer workstation, so the text encoding
//! is configurable (Windows stations often write `windows-1251`). The bytes
//! are decoded to UTF-8 before Polars parses them.

use std::io::Cursor;
use std::path::Path;

use encoding_rs::Encoding;
use polars::prelude::{CsvParseOptions, CsvReadOptions, SerReader};

use crate::error::{IngestError, Result};
use crate::table::ResultTable;

/// Maximum file size for export loading (100 MB default).
pub const MAX_EXPORT_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Encoding used when none is configured.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Options for reading an export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// `encoding_rs` label of the file encoding (e.g. `utf-8`, `windows-1251`).
    pub encoding: String,
    /// Field separator byte.
    pub separator: u8,
    /// Files above this size are rejected.
    pub max_file_size: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            separator: b',',
            max_file_size: MAX_EXPORT_FILE_SIZE,
        }
    }
}

impl LoadOptions {
    /// Set the encoding label.
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = label.into();
        self
    }

    /// Set the field separator.
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    /// Set the maximum accepted file size.
    pub fn with_max_file_size(mut self, max_size: u64) -> Self {
        self.max_file_size = max_size;
        self
    }
}

/// Resolves an `encoding_rs` label.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| IngestError::UnknownEncoding {
        label: label.to_string(),
    })
}

/// Reads an export file into a [`ResultTable`].
pub fn load_result_table(path: &Path, options: &LoadOptions) -> Result<ResultTable> {
    let encoding = resolve_encoding(&options.encoding)?;
    check_file_size(path, options.max_file_size)?;

    let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
    let (text, actual, had_errors) = encoding.decode(&bytes);
    if had_errors {
        return Err(IngestError::Decode {
            path: path.to_path_buf(),
            encoding: actual.name(),
        });
    }
    if text.trim().is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let separator = options.separator;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .map_parse_options(|parse: CsvParseOptions| parse.with_separator(separator))
        .into_reader_with_file_handle(Cursor::new(text.into_owned().into_bytes()))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::info!(
        path = %path.display(),
        encoding = actual.name(),
        rows = df.height(),
        columns = df.width(),
        "loaded results table"
    );
    Ok(ResultTable::new(df))
}

fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

fn io_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}
