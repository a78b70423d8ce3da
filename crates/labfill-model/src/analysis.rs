//! Analysis kinds and the target-column configuration of their forms.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of analysis a form captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisKind {
    /// Biochemical blood analysis. Exports carry a patient identity column.
    Biochemistry,
    /// Complete blood count. Exports carry no patient identity.
    BloodCount,
}

impl AnalysisKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Biochemistry => "biochemistry",
            Self::BloodCount => "blood-count",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How autofill locates the record for an analysis kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    /// One round: free text matched as a substring of the identity column.
    Substring,
    /// Several rounds: one column value per round until a single row remains.
    SequentialValue,
}

/// One form field and the export column that fills it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetColumn {
    /// Display name of the input field.
    pub field: String,
    /// Source column in the export; `None` for manual-entry fields.
    #[serde(default)]
    pub column: Option<String>,
}

impl TargetColumn {
    pub fn new(field: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            column: Some(column.into()),
        }
    }

    /// A field the analyzer does not export.
    pub fn manual(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            column: None,
        }
    }

    /// Source column, if the field is eligible for search and fill.
    pub fn source_column(&self) -> Option<&str> {
        self.column.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// Ordered (field, column) pairs for one analysis kind.
///
/// Order defines both the fill order and the sequential search order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetColumnList {
    targets: Vec<TargetColumn>,
}

impl TargetColumnList {
    pub fn new(targets: Vec<TargetColumn>) -> Self {
        Self { targets }
    }

    /// Builds a list where every field is named after its column.
    pub fn from_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            columns
                .into_iter()
                .map(|c| TargetColumn::new(c.as_ref(), c.as_ref()))
                .collect(),
        )
    }

    /// All targets, manual-entry fields included.
    pub fn all(&self) -> &[TargetColumn] {
        &self.targets
    }

    /// Targets that have a source column, in order.
    pub fn eligible(&self) -> impl Iterator<Item = &TargetColumn> {
        self.targets.iter().filter(|t| t.source_column().is_some())
    }

    /// Number of targets with a source column.
    pub fn eligible_len(&self) -> usize {
        self.eligible().count()
    }

    /// Eligible target at `cursor` (the sequential search position).
    pub fn eligible_at(&self, cursor: usize) -> Option<&TargetColumn> {
        self.eligible().nth(cursor)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Everything autofill needs to know about one analysis kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisProfile {
    pub kind: AnalysisKind,
    /// Human-readable title of the form.
    pub title: String,
    pub mode: SearchMode,
    /// Column holding "SURNAME INITIALS YEAR" for substring search.
    #[serde(default)]
    pub identity_column: Option<String>,
    pub targets: TargetColumnList,
}
