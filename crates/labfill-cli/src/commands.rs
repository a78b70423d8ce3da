use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use tracing::info_span;

use labfill_cli::logging::redact_value;
use labfill_cli::summary::{FillReport, profiles_table};
use labfill_cli::terminal::{NoticePrinter, TerminalOperator, run_rounds};
use labfill_ingest::{LoadOptions, ResultTable, load_result_table};
use labfill_interpret::{BiochemistryPanel, interpret};
use labfill_model::{AnalysisKind, AnalysisProfile, ProfileRegistry, SearchMode};
use labfill_search::{Autofill, EntryForm, SearchOutcome};

use crate::cli::{Cli, PatientArgs, SequentialArgs};

pub fn run_profiles(cli: &Cli) -> Result<()> {
    let registry = load_registry(cli)?;
    println!("{}", profiles_table(&registry));
    Ok(())
}

pub fn run_patient(cli: &Cli, args: &PatientArgs) -> Result<FillReport> {
    let span = info_span!("patient", query = %redact_value(&args.query));
    let _guard = span.enter();

    let profile = select_profile(cli, AnalysisKind::Biochemistry, SearchMode::Substring)?;
    let table = load_table(cli, &args.export)?;
    let mut form = EntryForm::for_profile(&profile);
    let autofill = Autofill::new(table, profile.clone());
    let mut operator = NoticePrinter::new(io::stdout());

    let outcome = autofill.fill_patient(&mut form, &args.query, &mut operator);

    let conclusion = outcome
        .search()
        .and_then(SearchOutcome::resolved)
        .map(|record| {
            let panel = BiochemistryPanel::from_columns(
                record.fields.iter().map(|f| (f.column.as_str(), &f.value)),
            );
            interpret(args.sex.into(), &panel)
        });
    Ok(FillReport {
        title: profile.title,
        form,
        outcome,
        conclusion,
    })
}

pub fn run_sequential(cli: &Cli, args: &SequentialArgs) -> Result<FillReport> {
    let kind = AnalysisKind::from(args.analysis);
    let span = info_span!("sequential", analysis = %kind);
    let _guard = span.enter();

    let profile = select_profile(cli, kind, SearchMode::SequentialValue)?;
    let table = load_table(cli, &args.export)?;
    let mut form = EntryForm::for_profile(&profile);
    let mut autofill = Autofill::new(table, profile.clone());
    let stdin = io::stdin();
    let mut operator = TerminalOperator::new(stdin.lock(), io::stdout());
    let outcome = run_rounds(&mut autofill, &mut form, &mut operator).context("read entry")?;
    Ok(FillReport {
        title: profile.title,
        form,
        outcome,
        conclusion: None,
    })
}

fn load_registry(cli: &Cli) -> Result<ProfileRegistry> {
    match &cli.profiles {
        Some(path) => ProfileRegistry::load(path)
            .with_context(|| format!("load profiles from {}", path.display())),
        None => Ok(ProfileRegistry::builtin()),
    }
}

fn select_profile(cli: &Cli, kind: AnalysisKind, mode: SearchMode) -> Result<AnalysisProfile> {
    let registry = load_registry(cli)?;
    let profile = registry
        .get(kind)
        .ok_or_else(|| anyhow!("no profile for analysis {kind}"))?;
    if profile.mode != mode {
        bail!("profile for {kind} is not searched in {mode:?} mode");
    }
    Ok(profile.clone())
}

fn load_table(cli: &Cli, path: &Path) -> Result<Arc<ResultTable>> {
    if !cli.separator.is_ascii() {
        bail!("separator must be a single ASCII character");
    }
    let options = LoadOptions::default()
        .with_encoding(cli.encoding.clone())
        .with_separator(cli.separator as u8);
    let table = load_result_table(path, &options)
        .with_context(|| format!("load export {}", path.display()))?;
    Ok(Arc::new(table))
}
