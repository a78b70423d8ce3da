//! Values read from the results table.

use labfill_common::{format_numeric, parse_decimal};

/// A single cell of the loaded results table.
///
/// Empty cells are read as `Number(0.0)`; an empty form field and a zero
/// are the same thing to the operator. Exports written with `,` decimals
/// load as `Text`, so `"0,0"` is zero too.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Value used when the export lacks a column.
    pub const ZERO: CellValue = CellValue::Number(0.0);

    pub fn is_zero(&self) -> bool {
        match self {
            Self::Number(v) => *v == 0.0,
            Self::Text(s) => s.trim().is_empty() || parse_decimal(s) == Some(0.0),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(s) => parse_decimal(s),
        }
    }

    /// Text written into the form field. Zero renders as an empty field.
    pub fn render(&self) -> String {
        if self.is_zero() {
            return String::new();
        }
        match self {
            Self::Number(v) => format_numeric(*v),
            Self::Text(s) => s.trim().to_string(),
        }
    }
}
