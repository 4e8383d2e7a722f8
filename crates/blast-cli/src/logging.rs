//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! The library crates emit spans and events; this module decides where they
//! go and how they look.
//!
//! # Log Levels
//!
//! - `error`: fatal failures
//! - `warn`: unmatched lookups, ignored lookup files
//! - `info`: stage progress and row counts
//! - `debug`: renamed columns, duplicate lookup keys
//! - `trace`: row values (requires `--log-data`; customer data is redacted otherwise)

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when row-level logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Crates whose events follow the configured level; everything else stays at `warn`.
const BLAST_CRATES: [&str; 6] = [
    "blast_cli",
    "blast_ingest",
    "blast_model",
    "blast_output",
    "blast_recipes",
    "blast_transform",
];

/// Returns true if row-level logging is explicitly enabled.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns the input value when row logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter` when set.
    pub use_env_filter: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// When set, logs are appended to this file instead of stderr.
    pub log_file: Option<PathBuf>,
    /// Whether customer values (names, numbers, emails) may be logged.
    pub log_data: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Untimed human-readable lines on the terminal.
    #[default]
    Pretty,
    /// One JSON object per event, with span close events and targets.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
            log_data: false,
        }
    }
}

/// Installs the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let writer = match &config.log_file {
        Some(path) => file_writer(path)?,
        None => BoxMakeWriter::new(io::stderr),
    };
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);
    let filter = build_env_filter(config.level_filter, config.use_env_filter);
    tracing_subscriber::registry()
        .with(output_layer(config, writer).with_filter(filter))
        .init();
    Ok(())
}

/// Appends to `path`, creating it when missing.
fn file_writer(path: &Path) -> io::Result<BoxMakeWriter> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(BoxMakeWriter::new(Mutex::new(file)))
}

fn output_layer(
    config: &LogConfig,
    writer: BoxMakeWriter,
) -> Box<dyn Layer<Registry> + Send + Sync> {
    match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(writer)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_writer(writer)
            .with_ansi(config.with_ansi)
            .with_target(false)
            .without_time()
            .boxed(),
    }
}

/// Default directives: `warn` for dependencies, `level` for the blast crates.
fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    let mut directives = vec!["warn".to_string()];
    directives.extend(BLAST_CRATES.iter().map(|krate| format!("{krate}={level}")));
    directives.join(",")
}

/// Build an `EnvFilter`, letting `RUST_LOG` win when allowed.
fn build_env_filter(level: LevelFilter, use_env: bool) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directives(level));
    if use_env {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_redacted_by_default() {
        assert_eq!(redact_value("09171234567"), REDACTED_VALUE);
    }

    #[test]
    fn directives_cover_every_blast_crate() {
        let directives = default_directives(LevelFilter::DEBUG);
        assert!(directives.starts_with("warn,"));
        for krate in BLAST_CRATES {
            assert!(directives.contains(&format!("{krate}=debug")));
        }
    }

    #[test]
    fn log_file_is_appended_not_truncated() {
        use std::io::Write;

        use tracing_subscriber::fmt::MakeWriter;

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("blast.log");
        std::fs::write(&path, "earlier run\n").expect("seed log");
        let writer = file_writer(&path).expect("open log");
        writer
            .make_writer()
            .write_all(b"next run\n")
            .expect("write log");
        assert_eq!(
            std::fs::read_to_string(&path).expect("read log"),
            "earlier run\nnext run\n"
        );
    }

    #[test]
    fn off_level_silences_blast_crates() {
        assert!(default_directives(LevelFilter::OFF).contains("blast_cli=off"));
    }
}
