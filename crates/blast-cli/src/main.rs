//! Blast upload preparation CLI.

use std::io::{self, IsTerminal};

use blast_cli::logging::{LogConfig, LogFormat, init_logging};
use blast_model::BlastError;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_blast, run_recipes, run_sample};
use crate::summary::{print_empty_result, print_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Run(args) => run_blast(args).map(|outcome| print_summary(&outcome)),
        Command::Sample(args) => run_sample(args).map(|outcome| print_summary(&outcome)),
        Command::Recipes => run_recipes(),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => report_error(&error),
    };
    std::process::exit(exit_code);
}

/// Prints the error and picks the exit code. Empty uploads and empty results
/// are guidance for the operator, so they exit cleanly.
fn report_error(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<BlastError>() {
        Some(blast) if blast.is_informational() => {
            print_empty_result(&informational_message(blast), blast.report());
            0
        }
        _ => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

fn informational_message(error: &BlastError) -> String {
    match error {
        BlastError::EmptyTable => {
            "The uploaded file has no data rows. Check the sheet and upload again.".to_string()
        }
        _ => format!("No rows left to export ({error}). Review the filter counts below."),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config.log_data = cli.log_data;
    config
}
