//! In-memory form of input fields for one analysis.

use labfill_model::{AnalysisKind, AnalysisProfile};

use crate::outcome::ResolvedRecord;

/// Written into an entry that failed validation.
pub const ERROR_TOKEN: &str = "ERROR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub value: String,
}

/// Ordered input fields of an analysis tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    analysis: AnalysisKind,
    entries: Vec<Entry>,
}

impl EntryForm {
    /// One empty entry per target, manual-entry fields included.
    pub fn for_profile(profile: &AnalysisProfile) -> Self {
        let entries = profile
            .targets
            .all()
            .iter()
            .map(|t| Entry {
                name: t.field.clone(),
                value: String::new(),
            })
            .collect();
        Self {
            analysis: profile.kind,
            entries,
        }
    }

    pub fn analysis(&self) -> AnalysisKind {
        self.analysis
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.entry(name).map(|e| e.value.as_str())
    }

    /// Overwrites an entry. Returns false if the form has no such entry.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn mark_error(&mut self, name: &str) -> bool {
        self.set(name, ERROR_TOKEN)
    }

    /// Writes resolved values into their entries; zero becomes an empty entry.
    ///
    /// Returns the number of entries written.
    pub fn apply(&mut self, record: &ResolvedRecord) -> usize {
        let mut written = 0;
        for (field, text) in record.rendered() {
            if self.set(field, text) {
                written += 1;
            } else {
                tracing::debug!(field = %field, "resolved field has no entry on the form");
            }
        }
        written
    }

    fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::ResolvedField;
    use labfill_model::{CellValue, ProfileRegistry};

    fn cbc_form() -> EntryForm {
        let registry = ProfileRegistry::builtin();
        EntryForm::for_profile(registry.get(AnalysisKind::BloodCount).unwrap())
    }

    #[test]
    fn builds_entries_in_profile_order() {
        let form = cbc_form();
        assert_eq!(form.entries().len(), 9);
        assert_eq!(form.entries()[0].name, "WBC");
        assert_eq!(form.entries()[8].name, "ESR");
        assert_eq!(form.value("HGB"), Some(""));
    }

    #[test]
    fn apply_renders_zero_as_empty() {
        let mut form = cbc_form();
        form.set("HGB", "stale");
        form.set("ESR", "12");
        let record = ResolvedRecord {
            fields: vec![
                ResolvedField {
                    field: "WBC".to_string(),
                    column: "WBC".to_string(),
                    value: CellValue::Number(6.25),
                    missing: false,
                },
                ResolvedField {
                    field: "HGB".to_string(),
                    column: "HGB".to_string(),
                    value: CellValue::ZERO,
                    missing: true,
                },
            ],
        };

        assert_eq!(form.apply(&record), 2);
        assert_eq!(form.value("WBC"), Some("6.25"));
        assert_eq!(form.value("HGB"), Some(""));
        assert_eq!(form.value("ESR"), Some("12"));
    }

    #[test]
    fn mark_error_writes_token() {
        let mut form = cbc_form();
        assert!(form.mark_error("WBC"));
        assert_eq!(form.value("WBC"), Some(ERROR_TOKEN));
        assert!(!form.mark_error("Nope"));
    }
}
