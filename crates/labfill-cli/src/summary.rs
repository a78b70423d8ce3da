//! Terminal rendering of filled forms and profiles.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use labfill_interpret::Conclusion;
use labfill_model::{AnalysisProfile, ProfileRegistry, SearchMode};
use labfill_search::{AutofillOutcome, EntryForm, ERROR_TOKEN, SearchOutcome};

/// What an autofill command produced.
#[derive(Debug)]
pub struct FillReport {
    pub title: String,
    pub form: EntryForm,
    pub outcome: AutofillOutcome,
    /// Findings, for biochemistry only.
    pub conclusion: Option<Conclusion>,
}

/// Process exit code for an autofill outcome.
///
/// 0 when a record was filled, 2 when the operator must refine the input,
/// 1 on errors.
pub fn exit_code(outcome: &AutofillOutcome) -> i32 {
    match outcome {
        AutofillOutcome::Searched(SearchOutcome::Resolved(_)) => 0,
        AutofillOutcome::Searched(SearchOutcome::Error(_)) => 1,
        AutofillOutcome::Searched(SearchOutcome::NotFound | SearchOutcome::Ambiguous { .. })
        | AutofillOutcome::Rejected(_) => 2,
    }
}

pub fn print_report(report: &FillReport) {
    println!("Analysis: {}", report.title);
    println!("{}", form_table(&report.form));
    if let Some(record) = report.outcome.search().and_then(SearchOutcome::resolved) {
        let missing = record.missing_columns();
        if !missing.is_empty() {
            println!("Missing columns: {}", missing.join(", "));
        }
    }
    if let Some(conclusion) = &report.conclusion
        && !conclusion.is_empty()
    {
        println!("Conclusion: {conclusion}");
    }
}

pub fn form_table(form: &EntryForm) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for entry in form.entries() {
        table.add_row(vec![Cell::new(&entry.name), value_cell(&entry.value)]);
    }
    table
}

pub fn profiles_table(registry: &ProfileRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Analysis"),
        header_cell("Title"),
        header_cell("Mode"),
        header_cell("Identity"),
        header_cell("Targets"),
    ]);
    apply_table_style(&mut table);
    for profile in registry.iter() {
        table.add_row(vec![
            Cell::new(profile.kind.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&profile.title),
            Cell::new(mode_label(profile)),
            match &profile.identity_column {
                Some(column) => Cell::new(column),
                None => dim_cell("-"),
            },
            Cell::new(targets_label(profile)),
        ]);
    }
    table
}

fn mode_label(profile: &AnalysisProfile) -> &'static str {
    match profile.mode {
        SearchMode::Substring => "substring",
        SearchMode::SequentialValue => "sequential",
    }
}

/// `field=column` pairs; manual-entry fields show as `field (manual)`.
fn targets_label(profile: &AnalysisProfile) -> String {
    profile
        .targets
        .all()
        .iter()
        .map(|t| match t.source_column() {
            Some(column) if column == t.field => column.to_string(),
            Some(column) => format!("{}={column}", t.field),
            None => format!("{} (manual)", t.field),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn value_cell(value: &str) -> Cell {
    match value {
        "" => dim_cell("-"),
        ERROR_TOKEN => Cell::new(value).fg(Color::Red).add_attribute(Attribute::Bold),
        _ => Cell::new(value),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
