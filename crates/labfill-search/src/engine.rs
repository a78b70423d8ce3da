//! The incremental disambiguating search engine.
//!
//! Two modes share one engine:
//!
//! - **Substring mode** matches free text against the identity column of a
//!   biochemistry export in a single, stateless round.
//! - **Sequential mode** matches one entered value per round against the
//!   next eligible column, narrowing the session's active table until a
//!   single row remains.
//!
//! Every exit path yields a [`SearchOutcome`]; table problems never escape
//! as errors or panics.

use tracing::{debug, error, info, warn};

use labfill_ingest::{ColumnAccess, IngestError, ResultTable};
use labfill_model::TargetColumnList;

use crate::error::SearchError;
use crate::materialize::materialize_fields;
use crate::operator::{CONTINUE_PROMPT, Notice, Operator};
use crate::outcome::SearchOutcome;
use crate::session::SearchSession;

const NOT_FOUND_MESSAGE: &str = "Record not found";

/// Finds the patient whose identity column contains `query`.
///
/// The query is trimmed and uppercased. Each call is independent.
pub fn search_by_substring(
    table: &ResultTable,
    targets: &TargetColumnList,
    identity_column: &str,
    query: &str,
    operator: &mut dyn Operator,
) -> SearchOutcome {
    if targets.eligible_len() == 0 {
        return SearchOutcome::Error(SearchError::NoTargets);
    }
    let query = query.trim().to_uppercase();
    debug!(
        column = %identity_column,
        query_len = query.chars().count(),
        rows = table.height(),
        "substring search"
    );

    let matched = match table.filter_contains(identity_column, &query) {
        Ok(ColumnAccess::Found(matched)) => matched,
        Ok(ColumnAccess::Missing(column)) => return missing_column(operator, column),
        Err(err) => return unexpected(operator, &err),
    };

    match matched.height() {
        0 => {
            info!("no record matched the identity query");
            operator.notify(&Notice::info(NOT_FOUND_MESSAGE));
            SearchOutcome::NotFound
        }
        1 => resolve(&matched, targets, operator),
        candidates => {
            info!(candidates, "identity query is ambiguous");
            operator.notify(&Notice::info(
                "Multiple matches. Enter more identifying characters",
            ));
            SearchOutcome::Ambiguous {
                candidates,
                next_field: None,
            }
        }
    }
}

/// Runs one sequential round with an already validated `value`.
///
/// Returns the next session state along with the round outcome.
pub fn search_by_sequential_value(
    mut session: SearchSession,
    value: f64,
    operator: &mut dyn Operator,
) -> (SearchSession, SearchOutcome) {
    if session.targets().eligible_len() == 0 {
        return (session, SearchOutcome::Error(SearchError::NoTargets));
    }
    let Some((field, column)) = session
        .current_target()
        .and_then(|t| Some((t.field.clone(), t.source_column()?.to_string())))
    else {
        return exhausted(session, operator);
    };
    debug!(
        cursor = session.column_cursor(),
        field = %field,
        column = %column,
        rows = session.active_table().height(),
        "sequential round"
    );

    let matched = match session.active_table().filter_eq(&column, value) {
        Ok(ColumnAccess::Found(matched)) => matched,
        Ok(ColumnAccess::Missing(name)) => {
            let outcome = missing_column(operator, name);
            return offer_continue(session, operator, outcome);
        }
        Err(err) => return (session, unexpected(operator, &err)),
    };

    match matched.height() {
        0 => {
            info!(field = %field, "no record matched the entered value");
            operator.notify(&Notice::info(NOT_FOUND_MESSAGE));
            offer_continue(session, operator, SearchOutcome::NotFound)
        }
        1 => {
            let outcome = resolve(&matched, session.targets(), operator);
            session.reset();
            (session, outcome)
        }
        candidates => {
            session.narrow(matched);
            if !session.advance() {
                return exhausted(session, operator);
            }
            let next_field = session.current_target().map(|t| t.field.clone());
            info!(
                candidates,
                cursor = session.column_cursor(),
                "multiple records matched, narrowing"
            );
            operator.notify(&Notice::info(format!(
                "Multiple matches. Fill the next field: {}",
                next_field.as_deref().unwrap_or_default()
            )));
            (
                session,
                SearchOutcome::Ambiguous {
                    candidates,
                    next_field,
                },
            )
        }
    }
}

fn resolve(
    matched: &ResultTable,
    targets: &TargetColumnList,
    operator: &mut dyn Operator,
) -> SearchOutcome {
    match materialize_fields(matched, targets, operator) {
        Ok(record) => {
            info!(
                fields = record.len(),
                missing = record.missing_columns().len(),
                "record resolved"
            );
            SearchOutcome::Resolved(record)
        }
        Err(err) => SearchOutcome::Error(err),
    }
}

/// Asks whether to go on with the next column after a fruitless round.
///
/// On yes the session drops its narrowing and searches the full table by
/// the next column; a miss on one column does not mean the patient is absent.
fn offer_continue(
    mut session: SearchSession,
    operator: &mut dyn Operator,
    outcome: SearchOutcome,
) -> (SearchSession, SearchOutcome) {
    if !operator.confirm_continue(CONTINUE_PROMPT) {
        debug!("operator stopped the search");
        session.reset();
        return (session, outcome);
    }
    session.restore_source();
    if !session.advance() {
        return exhausted(session, operator);
    }
    (session, outcome)
}

fn exhausted(
    mut session: SearchSession,
    operator: &mut dyn Operator,
) -> (SearchSession, SearchOutcome) {
    let err = SearchError::ColumnsExhausted {
        cursor: session.column_cursor(),
        available: session.targets().eligible_len(),
    };
    warn!(error = %err, "search ran out of fields, resetting");
    operator.notify(
        &Notice::error("Ran past the fields available for search")
            .with_detail("Search was reset to the first field."),
    );
    session.reset();
    (session, SearchOutcome::Error(err))
}

fn missing_column(operator: &mut dyn Operator, column: String) -> SearchOutcome {
    let err = SearchError::MissingColumn { column };
    warn!(error = %err, "search column missing from export");
    operator.notify(&Notice::warning(err.to_string()));
    SearchOutcome::Error(err)
}

fn unexpected(operator: &mut dyn Operator, err: &IngestError) -> SearchOutcome {
    error!(error = %err, "table access failed");
    let err = SearchError::Unexpected {
        message: err.to_string(),
    };
    operator.notify(&Notice::error(err.to_string()));
    SearchOutcome::Error(err)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::operator::{RecordingOperator, Severity};
    use labfill_model::SearchMode;
    use polars::prelude::*;

    fn cbc_table() -> Arc<ResultTable> {
        Arc::new(ResultTable::new(
            df! {
                "GLUCOSE" => &[5.5, 5.5, 4.8],
                "UREA" => &[8.5, 6.1, 8.5],
            }
            .unwrap(),
        ))
    }

    fn session() -> SearchSession {
        SearchSession::new(
            cbc_table(),
            TargetColumnList::from_columns(["GLUCOSE", "UREA"]),
            SearchMode::SequentialValue,
        )
    }

    #[test]
    fn missing_identity_column_is_an_error_outcome() {
        let table = cbc_table();
        let targets = TargetColumnList::from_columns(["UREA"]);
        let mut operator = RecordingOperator::new();

        let outcome = search_by_substring(&table, &targets, "ID", "PETR", &mut operator);

        assert_eq!(
            outcome,
            SearchOutcome::Error(SearchError::MissingColumn {
                column: "ID".to_string()
            })
        );
        assert_eq!(operator.notices_of(Severity::Warning).count(), 1);
    }

    #[test]
    fn missing_search_column_offers_to_continue() {
        let table = cbc_table();
        let targets = TargetColumnList::from_columns(["HGB", "UREA"]);
        let session = SearchSession::new(table, targets, SearchMode::SequentialValue);
        let mut operator = RecordingOperator::with_answers([true]);

        let (session, outcome) = search_by_sequential_value(session, 140.0, &mut operator);

        assert!(matches!(
            outcome,
            SearchOutcome::Error(SearchError::MissingColumn { .. })
        ));
        assert_eq!(session.column_cursor(), 1);
        assert_eq!(operator.prompts().len(), 1);
    }

    #[test]
    fn declined_continue_resets() {
        let mut operator = RecordingOperator::new();
        let (session, outcome) = search_by_sequential_value(session(), 9.9, &mut operator);

        assert_eq!(outcome, SearchOutcome::NotFound);
        assert!(session.is_reset());
    }

    #[test]
    fn accepted_continue_searches_full_table_by_next_column() {
        let mut operator = RecordingOperator::with_answers([true]);
        let (session, outcome) = search_by_sequential_value(session(), 9.9, &mut operator);

        assert_eq!(outcome, SearchOutcome::NotFound);
        assert_eq!(session.column_cursor(), 1);
        assert_eq!(session.active_table(), session.source().as_ref());

        let (session, outcome) = search_by_sequential_value(session, 6.1, &mut operator);
        let record = outcome.resolved().unwrap();
        assert_eq!(record.value_of_column("GLUCOSE").unwrap().as_f64(), Some(5.5));
        assert!(session.is_reset());
    }

    #[test]
    fn ambiguous_on_last_column_forces_reset() {
        let table = Arc::new(ResultTable::new(
            df! { "GLUCOSE" => &[5.5, 5.5] }.unwrap(),
        ));
        let session = SearchSession::new(
            table,
            TargetColumnList::from_columns(["GLUCOSE"]),
            SearchMode::SequentialValue,
        );
        let mut operator = RecordingOperator::new();

        let (session, outcome) = search_by_sequential_value(session, 5.5, &mut operator);

        assert_eq!(
            outcome,
            SearchOutcome::Error(SearchError::ColumnsExhausted {
                cursor: 1,
                available: 1
            })
        );
        assert!(session.is_reset());
        assert_eq!(operator.notices_of(Severity::Error).count(), 1);
    }

    #[test]
    fn no_targets_is_reported() {
        let table = cbc_table();
        let mut operator = RecordingOperator::new();
        let outcome = search_by_substring(
            &table,
            &TargetColumnList::default(),
            "ID",
            "X",
            &mut operator,
        );
        assert_eq!(outcome, SearchOutcome::Error(SearchError::NoTargets));
    }
}
