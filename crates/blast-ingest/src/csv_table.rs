use csv::ReaderBuilder;
use tracing::debug;

use blast_model::{BlastError, Result, SourceFormat, Table};

use crate::normalize::{build_headers, is_blank_row, normalize_cell};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn format_error(message: impl Into<String>) -> BlastError {
    BlastError::Format {
        format: SourceFormat::Csv,
        message: message.into(),
    }
}

const DELIMITER: u8 = b',';
const QUOTE: u8 = b'"';

/// Drops the spaces that open each field, outside quoted regions.
///
/// Runs before the csv reader sees the bytes, so that `a, "b, c"` still reads
/// `"b, c"` as one quoted field. Spaces inside quotes and after the first
/// character of a field are kept.
fn skip_initial_space(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut field_start = true;
    let mut in_quotes = false;
    let mut iter = bytes.iter().copied().peekable();
    while let Some(byte) = iter.next() {
        if in_quotes {
            out.push(byte);
            if byte == QUOTE {
                if iter.peek() == Some(&QUOTE) {
                    out.push(QUOTE);
                    iter.next();
                } else {
                    in_quotes = false;
                }
            }
            continue;
        }
        if field_start {
            if byte == b' ' {
                continue;
            }
            if byte == QUOTE {
                in_quotes = true;
                field_start = false;
            } else if !matches!(byte, DELIMITER | b'\n' | b'\r') {
                field_start = false;
            }
            out.push(byte);
            continue;
        }
        if matches!(byte, DELIMITER | b'\n' | b'\r') {
            field_start = true;
        }
        out.push(byte);
    }
    out
}

/// Parses comma-delimited UTF-8 text into a table.
///
/// The first non-blank row is the header. Spaces after a delimiter are
/// skipped before quote handling. Rows that are blank in every cell are
/// skipped; short rows are padded and long rows truncated to the header.
pub fn parse_csv(bytes: &[u8]) -> Result<Table> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let bytes = skip_initial_space(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes.as_slice());
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|error| format_error(format!("record {}: {error}", line + 1)))?;
        let row: Vec<String> = record.iter().map(str::to_string).collect();
        if is_blank_row(&row) {
            continue;
        }
        raw_rows.push(row);
    }
    let mut rows = raw_rows.into_iter();
    let Some(header_row) = rows.next() else {
        return Err(BlastError::EmptyTable);
    };
    let headers = build_headers(&header_row);
    let body: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(String::as_str).map(normalize_cell).collect())
        .collect();
    if body.is_empty() {
        return Err(BlastError::EmptyTable);
    }
    debug!(columns = headers.len(), rows = body.len(), "parsed csv");
    Ok(Table::from_rows(headers, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom_and_skips_initial_space() {
        let table = parse_csv(b"\xEF\xBB\xBFContact No., Account No.\n09274186327, 00123\n")
            .expect("parse csv");
        assert_eq!(table.columns(), ["Contact No.", "Account No."]);
        assert_eq!(table.rows()[0], vec!["09274186327", "00123"]);
    }

    #[test]
    fn initial_space_skip_respects_quotes() {
        assert_eq!(
            skip_initial_space(b"a,  \"x, \"\" y\", b\n  c,d"),
            b"a,\"x, \"\" y\",b\nc,d"
        );
        assert_eq!(skip_initial_space(b"\"a\nb\", c\r\n d"), b"\"a\nb\",c\r\nd");
        assert_eq!(skip_initial_space(b"a b, ,c"), b"a b,,c");
    }

    #[test]
    fn invalid_utf8_is_a_format_error() {
        let error = parse_csv(b"Name\n\xFF\xFE\n").expect_err("invalid utf8");
        assert!(matches!(
            error,
            BlastError::Format {
                format: SourceFormat::Csv,
                ..
            }
        ));
    }
}
