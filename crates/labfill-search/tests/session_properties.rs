use std::sync::Arc;

use labfill_ingest::ResultTable;
use labfill_model::{SearchMode, TargetColumnList};
use labfill_search::{RecordingOperator, SearchSession, search_by_sequential_value};
use polars::prelude::*;
use proptest::prelude::*;

fn arb_rows() -> impl Strategy<Value = Vec<(u8, u8, u8)>> {
    prop::collection::vec((1u8..=3, 1u8..=3, 1u8..=3), 1..10)
}

fn arb_rounds() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..=3, 1..8)
}

fn session_over(rows: &[(u8, u8, u8)]) -> SearchSession {
    let a: Vec<f64> = rows.iter().map(|r| f64::from(r.0)).collect();
    let b: Vec<f64> = rows.iter().map(|r| f64::from(r.1)).collect();
    let c: Vec<f64> = rows.iter().map(|r| f64::from(r.2)).collect();
    let table = ResultTable::new(df! { "A" => &a, "B" => &b, "C" => &c }.unwrap());
    SearchSession::new(
        Arc::new(table),
        TargetColumnList::from_columns(["A", "B", "C"]),
        SearchMode::SequentialValue,
    )
}

proptest! {
    /// Without continuation a round either narrows or resets.
    #[test]
    fn active_rows_never_grow_within_a_session(rows in arb_rows(), rounds in arb_rounds()) {
        let mut session = session_over(&rows);
        let mut operator = RecordingOperator::new();
        for value in rounds {
            let before = session.active_table().height();
            let (next, _) = search_by_sequential_value(session, f64::from(value), &mut operator);
            prop_assert!(next.is_reset() || next.active_table().height() <= before);
            session = next;
        }
    }

    #[test]
    fn cursor_only_moves_back_on_reset(
        rows in arb_rows(),
        rounds in arb_rounds(),
        accept in any::<bool>(),
    ) {
        let mut session = session_over(&rows);
        let mut operator = RecordingOperator::new().answering(accept);
        for value in rounds {
            let before = session.column_cursor();
            let (next, _) = search_by_sequential_value(session, f64::from(value), &mut operator);
            if next.column_cursor() < before {
                prop_assert!(next.is_reset());
            }
            prop_assert!(next.column_cursor() < 3);
            session = next;
        }
    }

    #[test]
    fn reset_restores_the_full_table(rows in arb_rows(), rounds in arb_rounds()) {
        let mut session = session_over(&rows);
        let mut operator = RecordingOperator::new().answering(true);
        for value in rounds {
            let (next, _) = search_by_sequential_value(session, f64::from(value), &mut operator);
            session = next;
        }
        session.reset();
        prop_assert_eq!(session.column_cursor(), 0);
        prop_assert_eq!(session.active_table(), session.source().as_ref());
    }
}
