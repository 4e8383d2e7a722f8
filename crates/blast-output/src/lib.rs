//! Workbook output for blast exports.
//!
//! The engine hands over finished [`SheetSpec`](blast_model::SheetSpec)s; this
//! crate only serialises them:
//!
//! - **names**: worksheet names made safe for spreadsheet hosts
//! - **workbook**: XLSX bytes with per-column cell formats

mod names;
mod workbook;

pub use names::{sanitize_sheet_name, unique_sheet_names};
pub use workbook::{numeric_format, write};
