//! Round outcomes.

use labfill_model::CellValue;

use crate::error::SearchError;

/// Result of one search round.
///
/// `NotFound` and `Ambiguous` are ordinary outcomes, not failures.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// No row matched.
    NotFound,
    /// More than one row matched; the operator must supply more input.
    Ambiguous {
        candidates: usize,
        /// Field whose value the next sequential round expects.
        next_field: Option<String>,
    },
    /// Exactly one row matched and its values were extracted.
    Resolved(ResolvedRecord),
    Error(SearchError),
}

impl SearchOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::NotFound => OutcomeKind::NotFound,
            Self::Ambiguous { .. } => OutcomeKind::Ambiguous,
            Self::Resolved(_) => OutcomeKind::Resolved,
            Self::Error(_) => OutcomeKind::Error,
        }
    }

    pub fn resolved(&self) -> Option<&ResolvedRecord> {
        match self {
            Self::Resolved(record) => Some(record),
            _ => None,
        }
    }
}

/// Discriminant of [`SearchOutcome`], for callers that only branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    NotFound,
    Ambiguous,
    Resolved,
    Error,
}

/// One field extracted from the matched row.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    pub field: String,
    pub column: String,
    pub value: CellValue,
    /// The export lacked `column`; `value` is the zero default.
    pub missing: bool,
}

impl ResolvedField {
    /// Text for the form entry; zero renders as empty.
    pub fn rendered(&self) -> String {
        self.value.render()
    }
}

/// All target fields of the single matched row, in target order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedRecord {
    pub fields: Vec<ResolvedField>,
}

impl ResolvedRecord {
    pub fn get(&self, field: &str) -> Option<&ResolvedField> {
        self.fields.iter().find(|f| f.field == field)
    }

    /// Value of a field by its source column.
    pub fn value_of_column(&self, column: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|f| f.column == column)
            .map(|f| &f.value)
    }

    /// Columns that were absent from the export.
    pub fn missing_columns(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.missing)
            .map(|f| f.column.as_str())
            .collect()
    }

    /// (field, text) pairs as they are written into the form.
    pub fn rendered(&self) -> Vec<(&str, String)> {
        self.fields
            .iter()
            .map(|f| (f.field.as_str(), f.rendered()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
