use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use tracing::debug;

use blast_model::{BlastError, Result, SourceFormat, Table};

use crate::normalize::{build_headers, is_blank_row, is_missing_marker};

fn format_error(message: impl Into<String>) -> BlastError {
    BlastError::Format {
        format: SourceFormat::Xlsx,
        message: message.into(),
    }
}

/// Renders one workbook cell as text.
///
/// Whole floats print without a fractional part, date cells as
/// `YYYY-MM-DD HH:MM:SS`, and error cells as `""`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(value) => {
            if is_missing_marker(value) {
                String::new()
            } else {
                value.clone()
            }
        }
        Data::Int(value) => value.to_string(),
        Data::Float(value) => value.to_string(),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        Data::DateTime(value) => match value.as_datetime() {
            Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => value.as_f64().to_string(),
        },
        Data::DateTimeIso(value) | Data::DurationIso(value) => value.clone(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

/// Parses the first worksheet of a workbook; its first non-blank row is the header.
pub fn parse_xlsx(bytes: &[u8]) -> Result<Table> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).map_err(|error| format_error(error.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| format_error("workbook has no worksheets"))?
        .map_err(|error| format_error(error.to_string()))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>())
        .filter(|row| !is_blank_row(row));
    let Some(header_row) = rows.next() else {
        return Err(BlastError::EmptyTable);
    };
    let headers = build_headers(&header_row);
    let body: Vec<Vec<String>> = rows.collect();
    if body.is_empty() {
        return Err(BlastError::EmptyTable);
    }
    debug!(columns = headers.len(), rows = body.len(), "parsed xlsx");
    Ok(Table::from_rows(headers, body))
}
