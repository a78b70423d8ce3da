//! Lab-result export loading.
//!
//! This crate loads the delimited export written by the lab analyzer into a
//! Polars-backed [`ResultTable`] and exposes the two row filters autofill
//! needs: numeric equality on a column and substring containment.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use labfill_ingest::{LoadOptions, load_result_table};
//!
//! let options = LoadOptions::default().with_encoding("windows-1251");
//! let table = load_result_table(Path::new("exports/biochemistry.csv"), &options)?;
//! let petrov = table.filter_contains("ID", "PETROV")?;
//! ```

mod error;
mod reader;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === Loading ===
pub use reader::{
    DEFAULT_ENCODING, LoadOptions, MAX_EXPORT_FILE_SIZE, load_result_table, resolve_encoding,
};

// === Table Access ===
pub use table::{ColumnAccess, ResultTable};
