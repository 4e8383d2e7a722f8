use serde::{Deserialize, Serialize};

use crate::table::Table;

/// Spreadsheet host limit on worksheet name length.
pub const SHEET_NAME_LIMIT: usize = 31;

/// How the cells of one column are written to the workbook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnFormat {
    /// Literal text; the host must not reinterpret numeric-looking strings.
    #[default]
    Text,
    /// A number shown with thousands separators and the source decimal count.
    NumericWithCommas,
}

/// One named worksheet of an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSpec {
    pub name: String,
    pub table: Table,
    pub formats: Vec<ColumnFormat>,
}

impl SheetSpec {
    /// Creates a sheet with every column formatted as text.
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        let formats = vec![ColumnFormat::Text; table.columns().len()];
        Self {
            name: name.into(),
            table,
            formats,
        }
    }

    #[must_use]
    pub fn with_formats(mut self, formats: Vec<ColumnFormat>) -> Self {
        self.formats = formats;
        self
    }

    pub fn format_of(&self, column: usize) -> ColumnFormat {
        self.formats.get(column).copied().unwrap_or_default()
    }
}

/// Truncates a sheet name to [`SHEET_NAME_LIMIT`] characters.
pub fn truncate_sheet_name(name: &str) -> String {
    name.chars().take(SHEET_NAME_LIMIT).collect()
}
