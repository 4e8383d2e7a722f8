//! The recipe engine.
//!
//! `run` drives one upload through a recipe: column validation, row filters,
//! the optional lookup join, output derivation, must-have pruning, campaign
//! detection and sample rows, statistics, sheet partitioning and naming.

use tracing::{debug, info, info_span, warn};

use blast_model::{BlastError, Result, SheetSpec, SheetSummary, Table, TableRole, TransformReport};

use crate::context::RunContext;
use crate::derive::derive_outputs;
use crate::filters::require_columns;
use crate::grouping::partition;
use crate::join::join;
use crate::recipe::{CampaignRule, Recipe, SampleCell, SampleSet};
use crate::stats::summarize;

/// The uploaded tables for one run.
#[derive(Debug, Clone, Default)]
pub struct RunInput {
    pub main: Table,
    pub lookup: Option<Table>,
}

impl RunInput {
    pub fn new(main: Table) -> Self {
        Self { main, lookup: None }
    }

    #[must_use]
    pub fn with_lookup(mut self, lookup: Table) -> Self {
        self.lookup = Some(lookup);
        self
    }
}

/// A finished export: sheets ready for the writer, the file name, and the report.
#[derive(Debug, Clone)]
pub struct Export {
    pub file_name: String,
    pub sheets: Vec<SheetSpec>,
    pub report: TransformReport,
}

impl Export {
    pub fn row_count(&self) -> usize {
        self.report.output_rows + self.report.sample_rows
    }
}

/// Runs `recipe` over `input`.
///
/// Returns [`BlastError::EmptyResult`] with the partial report when filtering
/// and pruning leave no rows.
pub fn run(recipe: &Recipe, input: RunInput, ctx: &RunContext) -> Result<Export> {
    let span = info_span!("recipe", id = recipe.id);
    let _guard = span.enter();

    let RunInput { mut main, lookup } = input;
    for (from, to) in &recipe.aliases {
        if main.rename_column(from, to) {
            debug!(from, to, "renamed input column");
        }
    }
    require_columns(&main, &recipe.required, TableRole::Main)?;
    for column in &recipe.optional {
        if !main.has_column(column) {
            main.set_column(column, Vec::new());
        }
    }
    if let (Some(lookup), Some(spec)) = (&lookup, &recipe.join) {
        require_columns(lookup, &spec.lookup_required, TableRole::Lookup)?;
    }

    let mut report = TransformReport::new(recipe.id, main.len());
    info!(rows = main.len(), "validated input columns");

    let mut table = main;
    for filter in &recipe.filters {
        let (kept, outcome) = filter.apply(table)?;
        table = kept;
        report.filters.push(outcome);
    }

    let mut joined = false;
    match (lookup, &recipe.join) {
        (Some(lookup), Some(spec)) => {
            let (with_lookup, stats) = join(table, &lookup, spec)?;
            table = with_lookup;
            report.join = Some(stats);
            joined = true;
        }
        (Some(_), None) => warn!("recipe takes no lookup file; ignoring it"),
        (None, _) => {}
    }

    let timestamp = ctx.timestamp();
    let mut output = derive_outputs(&recipe.outputs, &table, joined, &timestamp);

    if joined && let Some(spec) = &recipe.join {
        report.unmatched_removed = drop_blank(&mut output, &spec.require_after_join);
    }
    report.must_have_removed = drop_blank(&mut output, &recipe.must_have);
    report.output_rows = output.len();
    if output.is_empty() {
        info!("no rows remain after filtering");
        return Err(BlastError::EmptyResult {
            report: Box::new(report),
        });
    }

    report.campaign = detect_campaign(&recipe.campaign, &output);
    if let Some(set) = recipe.sample_set(report.campaign.as_deref()) {
        report.sample_rows = append_samples(&mut output, set, ctx);
    }

    finish(recipe, output, report, ctx)
}

/// Builds the sample-only export offered when nothing is uploaded.
///
/// Returns `None` for recipes without sample rows.
pub fn sample(recipe: &Recipe, ctx: &RunContext) -> Result<Option<Export>> {
    let Some(set) = recipe.sample_set(None) else {
        return Ok(None);
    };
    let mut output = Table::new(recipe.output_names());
    let mut report = TransformReport::new(recipe.id, 0);
    report.campaign = recipe.campaign.fallback().map(str::to_string);
    report.sample_rows = append_samples(&mut output, set, ctx);
    finish(recipe, output, report, ctx).map(Some)
}

fn finish(
    recipe: &Recipe,
    output: Table,
    mut report: TransformReport,
    ctx: &RunContext,
) -> Result<Export> {
    report.columns = summarize(&output, &recipe.stats);
    let sheets = partition(&recipe.sheets, &output, &recipe.output_formats());
    report.sheets = sheets
        .iter()
        .map(|sheet| SheetSummary {
            name: sheet.name.clone(),
            rows: sheet.table.len(),
        })
        .collect();
    let file_name = recipe
        .file_name
        .render(report.campaign.as_deref(), ctx.now())?;
    info!(
        rows = report.output_rows,
        samples = report.sample_rows,
        sheets = sheets.len(),
        file_name = %file_name,
        "export prepared"
    );
    Ok(Export {
        file_name,
        sheets,
        report,
    })
}

/// Drops rows where any of `columns` is exactly empty; returns how many were dropped.
///
/// Whitespace-only values are kept.
fn drop_blank(table: &mut Table, columns: &[&str]) -> usize {
    if columns.is_empty() {
        return 0;
    }
    let removed = table.retain(|record| {
        columns
            .iter()
            .all(|column| !record.get_or_empty(column).is_empty())
    });
    if removed > 0 {
        info!(removed, columns = ?columns, "dropped rows with blank values");
    }
    removed
}

fn detect_campaign(rule: &CampaignRule, output: &Table) -> Option<String> {
    match rule {
        CampaignRule::None => None,
        CampaignRule::Detect {
            column,
            known,
            fallback,
        } => {
            let found = output.column_values(column).and_then(|values| {
                let values: Vec<&str> = values.collect();
                known
                    .iter()
                    .find(|candidate| values.contains(*candidate))
                    .copied()
            });
            Some(found.unwrap_or(*fallback).to_string())
        }
        CampaignRule::FirstValue {
            column,
            fallback,
            uppercase,
        } => {
            let found = output
                .column_values(column)
                .and_then(|mut values| values.find(|value| !value.trim().is_empty()))
                .map_or(*fallback, str::trim);
            Some(if *uppercase {
                found.to_uppercase()
            } else {
                found.to_string()
            })
        }
    }
}

fn append_samples(output: &mut Table, set: &SampleSet, ctx: &RunContext) -> usize {
    let today = ctx.today();
    for row in &set.rows {
        output.push_row(
            row.iter()
                .map(|cell| match cell {
                    SampleCell::Text(text) => (*text).to_string(),
                    SampleCell::Today => today.clone(),
                })
                .collect(),
        );
    }
    set.rows.len()
}
