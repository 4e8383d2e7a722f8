//! Reading uploaded CSV and XLSX files into string tables.
//!
//! Every cell is kept as text so that account numbers and phone numbers keep
//! their leading zeros. Whitespace-only rows are skipped, headers are trimmed
//! and made unique, and common missing-value markers read back as `""`.

mod csv_table;
mod normalize;
mod xlsx_table;

use std::fs;
use std::path::Path;

use tracing::info;

use blast_model::{BlastError, Result, SourceFormat, Table};

pub use csv_table::parse_csv;
pub use xlsx_table::parse_xlsx;

/// Decodes an upload in the declared format.
///
/// Returns [`BlastError::EmptyTable`] when the upload has a header but no data rows.
pub fn parse(bytes: &[u8], format: SourceFormat) -> Result<Table> {
    match format {
        SourceFormat::Csv => parse_csv(bytes),
        SourceFormat::Xlsx => parse_xlsx(bytes),
    }
}

/// Reads a file from disk, detecting the format from its extension.
pub fn read_table(path: &Path) -> Result<Table> {
    let format = SourceFormat::from_path(path).ok_or_else(|| BlastError::Format {
        format: SourceFormat::Csv,
        message: format!(
            "unsupported file extension for {} (expected .csv or .xlsx)",
            path.display()
        ),
    })?;
    let bytes = fs::read(path)?;
    let table = parse(&bytes, format)?;
    info!(
        path = %path.display(),
        format = %format,
        rows = table.len(),
        columns = table.columns().len(),
        "loaded table"
    );
    Ok(table)
}
