//! The loaded results table and typed column access.
//!
//! A malformed or partial export may lack a column the profile expects.
//! That is a normal, recoverable condition, so lookups return
//! [`ColumnAccess::Missing`] instead of an error. Errors are reserved for
//! failures the caller cannot recover from.

use polars::prelude::{AnyValue, BooleanChunked, Column, DataFrame, NewChunkedArray};

use labfill_common::{any_to_f64, any_to_string};
use labfill_model::CellValue;

use crate::error::{IngestError, Result};

/// Outcome of addressing a column by name.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnAccess<T> {
    Found(T),
    Missing(String),
}

impl<T> ColumnAccess<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Missing(_) => None,
        }
    }
}

/// Rows × named columns of one analyzer export.
///
/// Cloning is cheap: Polars shares column buffers between frames.
#[derive(Debug, Clone)]
pub struct ResultTable {
    df: DataFrame,
}

impl ResultTable {
    pub fn new(df: DataFrame) -> Self {
        Self { df }
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df
            .get_column_names()
            .iter()
            .any(|column| column.as_str() == name)
    }

    fn column(&self, name: &str) -> Result<ColumnAccess<&Column>> {
        if !self.has_column(name) {
            return Ok(ColumnAccess::Missing(name.to_string()));
        }
        Ok(ColumnAccess::Found(self.df.column(name)?))
    }

    /// Reads one cell. Empty cells read as zero.
    pub fn cell(&self, column: &str, row: usize) -> Result<ColumnAccess<CellValue>> {
        let col = match self.column(column)? {
            ColumnAccess::Found(col) => col,
            ColumnAccess::Missing(name) => return Ok(ColumnAccess::Missing(name)),
        };
        let value = col.get(row)?;
        to_cell_value(column, value).map(ColumnAccess::Found)
    }

    /// Keeps the rows whose `column` equals `value` numerically.
    ///
    /// Text cells are parsed as decimals (`.` or `,`); null and unparsable
    /// cells never match.
    pub fn filter_eq(&self, column: &str, value: f64) -> Result<ColumnAccess<ResultTable>> {
        self.filter_by(column, |cell| any_to_f64(cell) == Some(value))
    }

    /// Keeps the rows whose `column`, rendered as text, contains `needle`.
    pub fn filter_contains(&self, column: &str, needle: &str) -> Result<ColumnAccess<ResultTable>> {
        self.filter_by(column, |cell| {
            !matches!(cell, AnyValue::Null) && any_to_string(cell).contains(needle)
        })
    }

    fn filter_by(
        &self,
        column: &str,
        predicate: impl Fn(AnyValue<'_>) -> bool,
    ) -> Result<ColumnAccess<ResultTable>> {
        let col = match self.column(column)? {
            ColumnAccess::Found(col) => col,
            ColumnAccess::Missing(name) => return Ok(ColumnAccess::Missing(name)),
        };
        let mut keep = Vec::with_capacity(self.df.height());
        for idx in 0..self.df.height() {
            keep.push(predicate(col.get(idx)?));
        }
        let mask = BooleanChunked::from_slice("matches".into(), &keep);
        let filtered = self.df.filter(&mask)?;
        Ok(ColumnAccess::Found(ResultTable::new(filtered)))
    }
}

impl PartialEq for ResultTable {
    fn eq(&self, other: &Self) -> bool {
        self.df.equals_missing(&other.df)
    }
}

impl From<DataFrame> for ResultTable {
    fn from(df: DataFrame) -> Self {
        Self::new(df)
    }
}

fn to_cell_value(column: &str, value: AnyValue<'_>) -> Result<CellValue> {
    match value {
        AnyValue::Null => Ok(CellValue::ZERO),
        AnyValue::String(s) => Ok(CellValue::Text(s.to_string())),
        AnyValue::StringOwned(ref s) => Ok(CellValue::Text(s.to_string())),
        AnyValue::Boolean(b) => Ok(CellValue::Number(if b { 1.0 } else { 0.0 })),
        other => match any_to_f64(other.clone()) {
            Some(v) => Ok(CellValue::Number(v)),
            None => Err(IngestError::UnsupportedValue {
                column: column.to_string(),
                dtype: other.dtype().to_string(),
            }),
        },
    }
}
