use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use blast_model::{
    ColumnSummary, FilterKind, MessageLevel, ReportMessage, SheetSpec, TransformReport,
};

use crate::types::RunOutcome;

/// Number of distribution entries shown per column.
const TOP_VALUES: usize = 3;

/// One line of the stage table: what happened, and how many rows it touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRow {
    pub stage: String,
    pub detail: String,
    pub removed: usize,
    pub flagged: usize,
}

impl StageRow {
    fn new(stage: &str, detail: impl Into<String>, removed: usize, flagged: usize) -> Self {
        Self {
            stage: stage.to_string(),
            detail: detail.into(),
            removed,
            flagged,
        }
    }
}

/// Flattens a report into the rows of the stage table.
pub fn stage_rows(report: &TransformReport) -> Vec<StageRow> {
    let mut rows = Vec::new();
    for outcome in &report.filters {
        let stage = match outcome.kind {
            FilterKind::Clean => continue,
            FilterKind::Shape => "Shape",
            FilterKind::Exclusion => "Exclude",
            FilterKind::Dedup => "Dedup",
            FilterKind::LengthAudit => "Audit",
        };
        rows.push(StageRow::new(
            stage,
            outcome.description.as_str(),
            outcome.removed,
            outcome.flagged,
        ));
    }
    if let Some(join) = &report.join {
        rows.push(StageRow::new(
            "Lookup",
            format!(
                "{} of {} rows matched ({} lookup rows)",
                join.matched,
                join.total(),
                join.lookup_rows
            ),
            report.unmatched_removed,
            join.unmatched,
        ));
    }
    if report.must_have_removed > 0 {
        rows.push(StageRow::new(
            "Required",
            "blank required output values",
            report.must_have_removed,
            0,
        ));
    }
    rows
}

pub fn print_summary(outcome: &RunOutcome) {
    let export = &outcome.export;
    let report = &export.report;
    println!("Recipe: {} ({})", outcome.title, outcome.recipe_id);
    match &outcome.workbook {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: {} (dry run, not written)", export.file_name),
    }
    if let Some(path) = &outcome.report_json {
        println!("Report: {}", path.display());
    }
    println!(
        "Rows: {} in, {} out, {} sample",
        report.input_rows, report.output_rows, report.sample_rows
    );

    print_stage_table(report);
    print_messages(&report.messages());
    print_column_table(&report.columns);
    print_sheet_table(report);
    if let Some(sheet) = export.sheets.first() {
        print_preview(sheet, outcome.preview_rows);
    }
}

/// Reports an upload that produced nothing to export.
pub fn print_empty_result(message: &str, report: Option<&TransformReport>) {
    println!("{message}");
    if let Some(report) = report {
        print_stage_table(report);
        print_messages(&report.messages());
    }
}

fn print_stage_table(report: &TransformReport) {
    let rows = stage_rows(report);
    if rows.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Condition"),
        header_cell("Removed"),
        header_cell("Flagged"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.stage)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(row.detail),
            count_cell(row.removed, Color::Red),
            count_cell(row.flagged, Color::Yellow),
        ]);
    }
    println!("{table}");
}

fn print_messages(messages: &[ReportMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("- {}", message.text),
            MessageLevel::Warning => eprintln!("! {}", message.text),
        }
    }
}

fn print_column_table(columns: &[ColumnSummary]) {
    if columns.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Unique"),
        header_cell("Range"),
        header_cell("Top values"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for summary in columns {
        let range = match (&summary.min, &summary.max) {
            (Some(min), Some(max)) => Cell::new(format!("{min} to {max}")),
            _ => dim_cell("-"),
        };
        let top: Vec<String> = summary
            .distribution
            .iter()
            .take(TOP_VALUES)
            .map(|entry| format!("{} ({})", display_value(&entry.value), entry.count))
            .collect();
        let top = if top.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(top.join(", "))
        };
        table.add_row(vec![
            Cell::new(&summary.column),
            Cell::new(summary.unique),
            range,
            top,
        ]);
    }
    println!();
    println!("Columns:");
    println!("{table}");
}

fn print_sheet_table(report: &TransformReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Sheet"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for sheet in &report.sheets {
        table.add_row(vec![Cell::new(&sheet.name), Cell::new(sheet.rows)]);
    }
    println!();
    println!("Sheets:");
    println!("{table}");
}

fn print_preview(sheet: &SheetSpec, limit: usize) {
    if limit == 0 || sheet.table.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(
        sheet
            .table
            .columns()
            .iter()
            .map(|column| header_cell(column))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for row in sheet.table.rows().iter().take(limit) {
        table.add_row(row.iter().map(Cell::new).collect::<Vec<_>>());
    }
    println!();
    println!("Preview ({}, first {} rows):", sheet.name, limit.min(sheet.table.len()));
    println!("{table}");
}

fn display_value(value: &str) -> &str {
    if value.is_empty() { "(blank)" } else { value }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
