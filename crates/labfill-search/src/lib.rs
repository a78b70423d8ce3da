//! Incremental disambiguating search for lab-result autofill.
//!
//! Given a loaded [`ResultTable`](labfill_ingest::ResultTable) and an analysis
//! profile, the engine narrows the table until exactly one row remains and
//! then extracts the profile's target fields from it.
//!
//! - [`search_by_substring`]: one-shot identity lookup (biochemistry).
//! - [`search_by_sequential_value`]: one round of value-by-value narrowing
//!   over a [`SearchSession`] (blood count).
//! - [`Autofill`]: validates form entries, drives rounds and fills an
//!   [`EntryForm`] on resolution.
//!
//! Operator interaction goes through the [`Operator`] trait so the engine can
//! be driven by a terminal, a GUI or a scripted test.

mod autofill;
mod engine;
mod error;
mod form;
mod materialize;
mod operator;
mod outcome;
mod session;
mod validate;

// === Error Types ===
pub use error::{SearchError, ValidationError};

// === Engine ===
pub use engine::{search_by_sequential_value, search_by_substring};
pub use materialize::materialize_fields;
pub use outcome::{OutcomeKind, ResolvedField, ResolvedRecord, SearchOutcome};
pub use session::SearchSession;

// === Operator Boundary ===
pub use operator::{CONTINUE_PROMPT, Notice, Operator, RecordingOperator, Severity};

// === Validation ===
pub use validate::{validate_entry, validate_query};

// === Form & Autofill ===
pub use autofill::{Autofill, AutofillOutcome};
pub use form::{ERROR_TOKEN, Entry, EntryForm};
