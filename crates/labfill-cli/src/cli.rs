//! CLI argument definitions for labfill.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use labfill_ingest::DEFAULT_ENCODING;
use labfill_interpret::Sex;
use labfill_model::AnalysisKind;

#[derive(Parser)]
#[command(
    name = "labfill",
    version,
    about = "Autofill lab results from analyzer exports",
    long_about = "Find a patient's row in a lab analyzer export and fill the analysis form.\n\n\
                  Biochemistry is searched by identity text; the blood count is narrowed\n\
                  one entered value at a time until a single row remains."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient identity text in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Text encoding of the export (any WHATWG label, e.g. windows-1251).
    #[arg(long, default_value = DEFAULT_ENCODING, global = true)]
    pub encoding: String,

    /// Field separator of the export.
    #[arg(long, default_value_t = ',', global = true)]
    pub separator: char,

    /// Analysis profiles to use instead of the built-in ones.
    #[arg(long, value_name = "TOML", global = true)]
    pub profiles: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fill the biochemistry form for the patient matching QUERY.
    Patient(PatientArgs),

    /// Narrow the export value by value until one row remains.
    Sequential(SequentialArgs),

    /// List analysis profiles and their target columns.
    Profiles,
}

#[derive(Parser)]
pub struct PatientArgs {
    /// Analyzer export (CSV).
    #[arg(value_name = "CSV")]
    pub export: PathBuf,

    /// Part of the patient's identity text, e.g. a surname.
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Patient sex, for sex-specific reference limits.
    #[arg(long, value_enum, default_value = "male")]
    pub sex: SexArg,
}

#[derive(Parser)]
pub struct SequentialArgs {
    /// Analyzer export (CSV).
    #[arg(value_name = "CSV")]
    pub export: PathBuf,

    /// Analysis whose fields are entered.
    #[arg(long, value_enum, default_value = "blood-count")]
    pub analysis: AnalysisArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SexArg {
    Male,
    Female,
}

impl From<SexArg> for Sex {
    fn from(arg: SexArg) -> Self {
        match arg {
            SexArg::Male => Sex::Male,
            SexArg::Female => Sex::Female,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AnalysisArg {
    Biochemistry,
    BloodCount,
}

impl From<AnalysisArg> for AnalysisKind {
    fn from(arg: AnalysisArg) -> Self {
        match arg {
            AnalysisArg::Biochemistry => AnalysisKind::Biochemistry,
            AnalysisArg::BloodCount => AnalysisKind::BloodCount,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
