//! Autofill controller: wires form entries, validation and the engine.

use std::sync::Arc;

use tracing::{debug, info};

use labfill_ingest::ResultTable;
use labfill_model::{AnalysisProfile, DEFAULT_IDENTITY_COLUMN};

use crate::engine::{search_by_sequential_value, search_by_substring};
use crate::error::{SearchError, ValidationError};
use crate::form::EntryForm;
use crate::operator::{Notice, Operator};
use crate::outcome::SearchOutcome;
use crate::session::SearchSession;
use crate::validate::{validate_entry, validate_query};

/// What an autofill action came to.
#[derive(Debug, Clone, PartialEq)]
pub enum AutofillOutcome {
    /// Input was refused before the table was touched.
    Rejected(ValidationError),
    /// A search round ran.
    Searched(SearchOutcome),
}

impl AutofillOutcome {
    pub fn search(&self) -> Option<&SearchOutcome> {
        match self {
            Self::Searched(outcome) => Some(outcome),
            Self::Rejected(_) => None,
        }
    }
}

/// Autofill for one analysis over one loaded export.
#[derive(Debug, Clone)]
pub struct Autofill {
    source: Arc<ResultTable>,
    profile: AnalysisProfile,
    session: SearchSession,
}

impl Autofill {
    pub fn new(source: Arc<ResultTable>, profile: AnalysisProfile) -> Self {
        let session =
            SearchSession::new(Arc::clone(&source), profile.targets.clone(), profile.mode);
        Self {
            source,
            profile,
            session,
        }
    }

    pub fn profile(&self) -> &AnalysisProfile {
        &self.profile
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Looks the patient up by identity text and fills `form` on a match.
    pub fn fill_patient(
        &self,
        form: &mut EntryForm,
        query: &str,
        operator: &mut dyn Operator,
    ) -> AutofillOutcome {
        let identity = self
            .profile
            .identity_column
            .as_deref()
            .unwrap_or(DEFAULT_IDENTITY_COLUMN);
        let query = match validate_query(identity, query) {
            Ok(query) => query,
            Err(err) => return reject(form, operator, err),
        };

        let outcome = search_by_substring(
            &self.source,
            &self.profile.targets,
            identity,
            &query,
            operator,
        );
        apply_resolved(form, &outcome);
        AutofillOutcome::Searched(outcome)
    }

    /// Runs the next sequential round using the entry of the current field.
    pub fn fill_next(
        &mut self,
        form: &mut EntryForm,
        operator: &mut dyn Operator,
    ) -> AutofillOutcome {
        let Some(field) = self.session.current_target().map(|t| t.field.clone()) else {
            return AutofillOutcome::Searched(SearchOutcome::Error(SearchError::NoTargets));
        };
        let raw = form.value(&field).unwrap_or_default().to_string();
        let value = match validate_entry(&field, &raw) {
            Ok(value) => value,
            Err(err) => return reject(form, operator, err),
        };

        let (session, outcome) = search_by_sequential_value(self.session.clone(), value, operator);
        self.session = session;
        apply_resolved(form, &outcome);
        AutofillOutcome::Searched(outcome)
    }
}

fn reject(
    form: &mut EntryForm,
    operator: &mut dyn Operator,
    err: ValidationError,
) -> AutofillOutcome {
    debug!(field = %err.field(), error = %err, "entry rejected");
    if err.marks_entry() {
        form.mark_error(err.field());
    }
    operator.notify(&Notice::warning(err.to_string()));
    AutofillOutcome::Rejected(err)
}

fn apply_resolved(form: &mut EntryForm, outcome: &SearchOutcome) {
    if let Some(record) = outcome.resolved() {
        let written = form.apply(record);
        info!(analysis = %form.analysis(), written, "form filled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::ERROR_TOKEN;
    use crate::operator::RecordingOperator;
    use labfill_model::{AnalysisKind, ProfileRegistry};
    use polars::prelude::*;

    fn blood_count() -> (Autofill, EntryForm) {
        let table = Arc::new(ResultTable::new(
            df! {
                "WBC" => &[6.2, 6.2],
                "RBC" => &[4.5, 4.9],
                "HGB" => &[140.0, 131.0],
            }
            .unwrap(),
        ));
        let registry = ProfileRegistry::builtin();
        let profile = registry.get(AnalysisKind::BloodCount).unwrap().clone();
        let form = EntryForm::for_profile(&profile);
        (Autofill::new(table, profile), form)
    }

    #[test]
    fn zero_entry_is_marked_and_rejected() {
        let (mut autofill, mut form) = blood_count();
        form.set("WBC", "0,0");
        let mut operator = RecordingOperator::new();

        let outcome = autofill.fill_next(&mut form, &mut operator);

        assert!(matches!(
            outcome,
            AutofillOutcome::Rejected(ValidationError::Zero { .. })
        ));
        assert_eq!(form.value("WBC"), Some(ERROR_TOKEN));
        assert!(autofill.session().is_reset());
    }

    #[test]
    fn empty_entry_is_left_alone() {
        let (mut autofill, mut form) = blood_count();
        let mut operator = RecordingOperator::new();

        let outcome = autofill.fill_next(&mut form, &mut operator);

        assert!(matches!(
            outcome,
            AutofillOutcome::Rejected(ValidationError::Empty { .. })
        ));
        assert_eq!(form.value("WBC"), Some(""));
        assert_eq!(operator.notices().len(), 1);
    }

    #[test]
    fn rounds_narrow_then_fill() {
        let (mut autofill, mut form) = blood_count();
        let mut operator = RecordingOperator::new();

        form.set("WBC", "6,2");
        let outcome = autofill.fill_next(&mut form, &mut operator);
        assert_eq!(
            outcome,
            AutofillOutcome::Searched(SearchOutcome::Ambiguous {
                candidates: 2,
                next_field: Some("RBC".to_string()),
            })
        );

        form.set("RBC", "4.9");
        let outcome = autofill.fill_next(&mut form, &mut operator);
        assert!(outcome.search().and_then(SearchOutcome::resolved).is_some());
        assert_eq!(form.value("HGB"), Some("131"));
        assert!(autofill.session().is_reset());
    }
}
