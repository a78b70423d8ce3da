//! Data model for lab-result autofill.
//!
//! - [`AnalysisProfile`]: which form fields map to which export columns, and how
//!   an analysis kind is searched.
//! - [`ProfileRegistry`]: built-in profiles, or profiles loaded from TOML.
//! - [`CellValue`]: a value read from the loaded results table.

mod analysis;
mod error;
mod registry;
mod value;

pub use analysis::{AnalysisKind, AnalysisProfile, SearchMode, TargetColumn, TargetColumnList};
pub use error::{ProfileError, Result};
pub use registry::{DEFAULT_IDENTITY_COLUMN, ProfileRegistry};
pub use value::CellValue;
