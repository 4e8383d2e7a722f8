use std::path::PathBuf;

use blast_transform::Export;

#[derive(Debug)]
pub struct RunOutcome {
    pub recipe_id: &'static str,
    pub title: &'static str,
    pub export: Export,
    /// `None` on dry runs.
    pub workbook: Option<PathBuf>,
    pub report_json: Option<PathBuf>,
    pub preview_rows: usize,
}
