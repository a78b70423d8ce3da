//! Error types for search rounds and entry validation.

use thiserror::Error;

use labfill_ingest::IngestError;

/// Failures reported through [`SearchOutcome::Error`](crate::SearchOutcome::Error).
///
/// None of these escape the engine as a panic or an `Err`; they are data
/// carried by the round outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The export lacks the column the round needed.
    #[error("missing column: \"{column}\"")]
    MissingColumn { column: String },

    /// Sequential search ran past the last searchable column.
    #[error("no searchable field left (position {cursor}, {available} available)")]
    ColumnsExhausted { cursor: usize, available: usize },

    /// The profile has no column with a source in the export.
    #[error("no target columns to search")]
    NoTargets,

    /// Table access failed for a reason other than a missing column.
    #[error("unexpected error: \"{message}\"")]
    Unexpected { message: String },
}

impl From<IngestError> for SearchError {
    fn from(err: IngestError) -> Self {
        Self::Unexpected {
            message: err.to_string(),
        }
    }
}

/// Operator input rejected before any table access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The field to search by is empty.
    #[error("search by field \"{field}\": enter a value first")]
    Empty { field: String },

    /// Not a decimal with `.` or `,` as separator.
    #[error("values must be decimals separated by a point or a comma (field \"{field}\")")]
    Malformed { field: String, value: String },

    /// A zero-equivalent value cannot identify a record.
    #[error("field \"{field}\" must not be zero")]
    Zero { field: String },
}

impl ValidationError {
    pub fn field(&self) -> &str {
        match self {
            Self::Empty { field } | Self::Malformed { field, .. } | Self::Zero { field } => field,
        }
    }

    /// Whether the offending entry is overwritten with the error token.
    pub fn marks_entry(&self) -> bool {
        matches!(self, Self::Malformed { .. } | Self::Zero { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SearchError::MissingColumn {
            column: "UREA".to_string(),
        };
        assert_eq!(err.to_string(), "missing column: \"UREA\"");
    }

    #[test]
    fn empty_entries_are_not_marked() {
        let empty = ValidationError::Empty {
            field: "WBC".to_string(),
        };
        let zero = ValidationError::Zero {
            field: "WBC".to_string(),
        };
        assert!(!empty.marks_entry());
        assert!(zero.marks_entry());
        assert_eq!(zero.field(), "WBC");
    }

    #[test]
    fn ingest_errors_become_unexpected() {
        let err: SearchError = IngestError::DataFrame {
            message: "boom".to_string(),
        }
        .into();
        assert!(matches!(err, SearchError::Unexpected { .. }));
    }
}
