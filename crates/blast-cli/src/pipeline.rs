//! Run stages with explicit inputs and outputs.
//!
//! 1. **Ingest**: read the main upload (and lookup, if any) after checking the
//!    recipe accepts the file type
//! 2. **Transform**: run the recipe, or build its sample-only export
//! 3. **Output**: write the workbook and the optional JSON report atomically

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::{debug, info, info_span, trace};

use blast_ingest::read_table;
use blast_model::{BlastError, SourceFormat, TransformReport};
use blast_transform::{Export, Recipe, RunContext, RunInput};

use crate::logging::redact_value;

/// Checks that `recipe` accepts the file type of `path`.
pub fn accepted_format(recipe: &Recipe, path: &Path) -> Result<SourceFormat, BlastError> {
    let format = SourceFormat::from_path(path).ok_or_else(|| BlastError::Format {
        format: SourceFormat::Csv,
        message: format!(
            "unsupported file extension for {} (expected .csv or .xlsx)",
            path.display()
        ),
    })?;
    if recipe.accepts_format(format) {
        Ok(format)
    } else {
        let accepted: Vec<String> = recipe
            .accepts
            .iter()
            .map(ToString::to_string)
            .collect();
        Err(BlastError::Format {
            format,
            message: format!("{} accepts {} uploads only", recipe.id, accepted.join(" or ")),
        })
    }
}

/// Reads the main upload and the optional lookup file.
pub fn ingest(recipe: &Recipe, input: &Path, lookup: Option<&Path>) -> Result<RunInput> {
    let span = info_span!("ingest", recipe = recipe.id);
    let _guard = span.enter();
    let start = Instant::now();

    accepted_format(recipe, input)?;
    let main = read_table(input).with_context(|| format!("read {}", input.display()))?;
    let mut run_input = RunInput::new(main);
    if let Some(path) = lookup {
        let table = read_table(path).with_context(|| format!("read {}", path.display()))?;
        run_input = run_input.with_lookup(table);
    }
    info!(
        rows = run_input.main.len(),
        lookup_rows = run_input.lookup.as_ref().map(blast_model::Table::len),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(run_input)
}

/// Runs the recipe. Empty results come back as [`BlastError::EmptyResult`].
pub fn transform(recipe: &Recipe, input: RunInput, ctx: &RunContext) -> Result<Export> {
    let start = Instant::now();
    let export = blast_transform::run(recipe, input, ctx)?;
    if let Some(record) = export.sheets.first().and_then(|sheet| sheet.table.record(0)) {
        trace!(row = %redact_value(&record.values().join(" | ")), "first output row");
    }
    info!(
        recipe = recipe.id,
        rows = export.row_count(),
        duration_ms = start.elapsed().as_millis(),
        "transform complete"
    );
    Ok(export)
}

/// Writes `bytes` to `path` through a temporary file in the same directory,
/// so an interrupted run never leaves a partial file behind.
pub fn persist_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("create temporary file in {}", dir.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("write {}", path.display()))?;
    file.as_file()
        .sync_all()
        .with_context(|| format!("flush {}", path.display()))?;
    file.persist(path)
        .map_err(|error| error.error)
        .with_context(|| format!("persist {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "file persisted");
    Ok(())
}

/// Serialises the export's sheets and writes the workbook into `output_dir`.
pub fn write_workbook(export: &Export, output_dir: &Path) -> Result<PathBuf> {
    let span = info_span!("output", file_name = %export.file_name);
    let _guard = span.enter();
    let bytes = blast_output::write(&export.sheets)?;
    let path = output_dir.join(&export.file_name);
    persist_atomically(&path, &bytes)?;
    info!(path = %path.display(), "workbook written");
    Ok(path)
}

/// Writes the report as pretty-printed JSON.
pub fn write_report_json(report: &TransformReport, path: &Path) -> Result<()> {
    let json = serde_json::to_vec_pretty(report).context("serialize report")?;
    persist_atomically(path, &json)
}
