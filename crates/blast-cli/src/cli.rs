//! CLI argument definitions.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "blast-prep",
    version,
    about = "Prepare Viber, SMS and email blast upload files",
    long_about = "Turn raw collection-agency exports into upload-ready workbooks.\n\n\
                  Each section (recipe) validates the upload, filters and deduplicates rows,\n\
                  optionally joins a collector lookup file, and writes a named .xlsx file."
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

    /// Allow customer values (names, numbers, emails) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a recipe over an uploaded file and write the blast workbook.
    Run(RunArgs),

    /// Write the sample-only workbook a recipe offers when nothing is uploaded.
    Sample(SampleArgs),

    /// List the available recipes.
    Recipes,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Recipe id (see `blast-prep recipes`).
    #[arg(value_name = "RECIPE")]
    pub recipe: String,

    /// Main upload (.csv or .xlsx).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Lookup file joined into the main table (collector assignments).
    #[arg(long = "lookup", value_name = "PATH")]
    pub lookup: Option<PathBuf>,

    /// Directory the workbook is written to.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Transform and report without writing the workbook.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Number of output rows to preview in the summary.
    #[arg(long = "preview-rows", value_name = "N", default_value_t = 5)]
    pub preview_rows: usize,

    /// Also write the transform report as JSON.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,

    /// Fix the current time (RFC 3339) used for timestamps and file names.
    #[arg(long = "now", value_name = "TIMESTAMP", value_parser = parse_now)]
    pub now: Option<DateTime<FixedOffset>>,
}

#[derive(Parser)]
pub struct SampleArgs {
    /// Recipe id (see `blast-prep recipes`).
    #[arg(value_name = "RECIPE")]
    pub recipe: String,

    /// Directory the workbook is written to.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Report without writing the workbook.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Fix the current time (RFC 3339) used for timestamps and file names.
    #[arg(long = "now", value_name = "TIMESTAMP", value_parser = parse_now)]
    pub now: Option<DateTime<FixedOffset>>,
}

fn parse_now(value: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(value).map_err(|error| format!("expected RFC 3339: {error}"))
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
    Json,
}
