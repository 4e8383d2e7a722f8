//! XLSX serialisation.

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet, XlsxError};
use tracing::{debug, info};

use blast_model::{BlastError, ColumnFormat, Result, SheetSpec};

use crate::names::unique_sheet_names;

/// Number format for an amount written with `decimals` fraction digits.
pub fn numeric_format(decimals: usize) -> String {
    if decimals == 0 {
        "#,##0".to_string()
    } else {
        format!("#,##0.{}", "0".repeat(decimals))
    }
}

/// Parses a grouped amount such as `1,234.50` into its value and decimal count.
fn parse_amount(text: &str) -> Option<(f64, usize)> {
    let plain = text.trim().replace(',', "");
    if plain.is_empty() {
        return None;
    }
    let value: f64 = plain.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let decimals = plain
        .rsplit_once('.')
        .map_or(0, |(_, fraction)| fraction.chars().count());
    Some((value, decimals))
}

fn workbook_error(error: XlsxError) -> BlastError {
    BlastError::Workbook(error.to_string())
}

fn row_num(index: usize) -> Result<RowNum> {
    RowNum::try_from(index)
        .map_err(|_| BlastError::Workbook(format!("row {index} exceeds the sheet limit")))
}

fn col_num(index: usize) -> Result<ColNum> {
    ColNum::try_from(index)
        .map_err(|_| BlastError::Workbook(format!("column {index} exceeds the sheet limit")))
}

struct Formats {
    header: Format,
    text: Format,
}

/// Serialises `sheets` into an XLSX workbook, one worksheet per spec in order.
///
/// Text columns are written as strings with the `@` format so hosts keep
/// account and phone numbers verbatim. Numeric columns are written as numbers
/// with thousands separators; cells that do not parse stay text.
pub fn write(sheets: &[SheetSpec]) -> Result<Vec<u8>> {
    let formats = Formats {
        header: Format::new().set_bold(),
        text: Format::new().set_num_format("@"),
    };
    let names = unique_sheet_names(sheets.iter().map(|sheet| sheet.name.as_str()));

    let mut workbook = Workbook::new();
    for (sheet, name) in sheets.iter().zip(&names) {
        if *name != sheet.name {
            debug!(from = %sheet.name, to = %name, "renamed worksheet");
        }
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name).map_err(workbook_error)?;
        write_sheet(worksheet, sheet, &formats)?;
    }
    if sheets.is_empty() {
        workbook.add_worksheet();
    }

    let bytes = workbook.save_to_buffer().map_err(workbook_error)?;
    info!(sheets = sheets.len(), bytes = bytes.len(), "workbook written");
    Ok(bytes)
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &SheetSpec, formats: &Formats) -> Result<()> {
    for (index, header) in sheet.table.columns().iter().enumerate() {
        worksheet
            .write_string_with_format(0, col_num(index)?, header.as_str(), &formats.header)
            .map_err(workbook_error)?;
    }

    for (row_index, values) in sheet.table.rows().iter().enumerate() {
        let row = row_num(row_index + 1)?;
        for (index, value) in values.iter().enumerate() {
            let col = col_num(index)?;
            let amount = match sheet.format_of(index) {
                ColumnFormat::NumericWithCommas => parse_amount(value),
                ColumnFormat::Text => None,
            };
            match amount {
                Some((number, decimals)) => {
                    let format = Format::new().set_num_format(numeric_format(decimals));
                    worksheet
                        .write_number_with_format(row, col, number, &format)
                        .map_err(workbook_error)?;
                }
                None => {
                    worksheet
                        .write_string_with_format(row, col, value.as_str(), &formats.text)
                        .map_err(workbook_error)?;
                }
            }
        }
    }
    Ok(())
}
