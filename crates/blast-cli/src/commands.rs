use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::info_span;

use blast_cli::pipeline::{ingest, transform, write_report_json, write_workbook};
use blast_transform::{Export, Recipe, RunContext};

use crate::cli::{RunArgs, SampleArgs};
use crate::summary::apply_table_style;
use crate::types::RunOutcome;

pub fn run_recipes() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Recipe", "Title", "Input", "Description"]);
    apply_table_style(&mut table);
    for recipe in blast_recipes::catalog() {
        let accepts: Vec<String> = recipe.accepts.iter().map(ToString::to_string).collect();
        let lookup = if recipe.join.is_some() {
            " + lookup"
        } else {
            ""
        };
        table.add_row(vec![
            recipe.id.to_string(),
            recipe.title.to_string(),
            format!("{}{lookup}", accepts.join("/")),
            recipe.description.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_blast(args: &RunArgs) -> Result<RunOutcome> {
    let recipe = blast_recipes::find(&args.recipe)?;
    let span = info_span!("run", recipe = recipe.id);
    let _guard = span.enter();
    let ctx = args.now.map_or_else(RunContext::current, RunContext::new);

    let input = ingest(recipe, &args.input, args.lookup.as_deref())?;
    let export = transform(recipe, input, &ctx)?;
    let report_json = match &args.report_json {
        Some(path) => {
            write_report_json(&export.report, path)?;
            Some(path.clone())
        }
        None => None,
    };
    finish(recipe, export, &args.output_dir, args.dry_run, report_json, args.preview_rows)
}

pub fn run_sample(args: &SampleArgs) -> Result<RunOutcome> {
    let recipe = blast_recipes::find(&args.recipe)?;
    let ctx = args.now.map_or_else(RunContext::current, RunContext::new);
    let Some(export) = blast_transform::sample(recipe, &ctx)
        .with_context(|| format!("build samples for {}", recipe.id))?
    else {
        bail!("{} has no sample rows; upload a file with `blast-prep run`", recipe.id);
    };
    let preview_rows = export.report.sample_rows;
    finish(recipe, export, &args.output_dir, args.dry_run, None, preview_rows)
}

fn finish(
    recipe: &Recipe,
    export: Export,
    output_dir: &Path,
    dry_run: bool,
    report_json: Option<PathBuf>,
    preview_rows: usize,
) -> Result<RunOutcome> {
    let workbook = if dry_run {
        None
    } else {
        Some(write_workbook(&export, output_dir)?)
    };
    Ok(RunOutcome {
        recipe_id: recipe.id,
        title: recipe.title,
        export,
        workbook,
        report_json,
        preview_rows,
    })
}
