//! Sequential search session state.
//!
//! A session is a plain value. Each sequential round takes it by value and
//! returns the next state, so every transition can be tested without a UI.

use std::sync::Arc;

use labfill_ingest::ResultTable;
use labfill_model::{SearchMode, TargetColumn, TargetColumnList};

/// State carried between rounds of one autofill invocation.
#[derive(Debug, Clone)]
pub struct SearchSession {
    source: Arc<ResultTable>,
    active: ResultTable,
    cursor: usize,
    mode: SearchMode,
    targets: TargetColumnList,
}

impl SearchSession {
    /// Starts at round 0 over the full table.
    pub fn new(source: Arc<ResultTable>, targets: TargetColumnList, mode: SearchMode) -> Self {
        let active = source.as_ref().clone();
        Self {
            source,
            active,
            cursor: 0,
            mode,
            targets,
        }
    }

    /// Rows still in play.
    pub fn active_table(&self) -> &ResultTable {
        &self.active
    }

    /// The full table the session was created over.
    pub fn source(&self) -> &Arc<ResultTable> {
        &self.source
    }

    /// Index into the eligible target columns.
    pub fn column_cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn targets(&self) -> &TargetColumnList {
        &self.targets
    }

    /// Eligible target the next round filters on.
    pub fn current_target(&self) -> Option<&TargetColumn> {
        self.targets.eligible_at(self.cursor)
    }

    /// True when the session is at round 0 over the full table.
    pub fn is_reset(&self) -> bool {
        self.cursor == 0 && self.active == *self.source
    }

    /// Back to round 0 over the full table.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.active = self.source.as_ref().clone();
        tracing::debug!("search session reset");
    }

    pub(crate) fn narrow(&mut self, matched: ResultTable) {
        debug_assert!(matched.height() <= self.active.height());
        self.active = matched;
    }

    /// Drops any narrowing but keeps the cursor.
    pub(crate) fn restore_source(&mut self) {
        self.active = self.source.as_ref().clone();
    }

    /// Moves to the next eligible column; false if none is left.
    pub(crate) fn advance(&mut self) -> bool {
        self.cursor += 1;
        self.cursor < self.targets.eligible_len()
    }
}
