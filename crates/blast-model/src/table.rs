use serde::{Deserialize, Serialize};

/// An in-memory table of string cells.
///
/// Every row holds exactly one value per column; an empty string is the
/// missing-value marker. Column order is fixed by the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table, padding short rows with `""` and truncating long ones.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Returns the requested columns that are absent, in request order.
    pub fn missing_columns(&self, names: &[&str]) -> Vec<String> {
        names
            .iter()
            .filter(|name| !self.has_column(name))
            .map(|name| (*name).to_string())
            .collect()
    }

    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        self.rows.get(index).map(|values| Record {
            columns: &self.columns,
            values,
        })
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(|values| Record {
            columns: &self.columns,
            values,
        })
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows
            .get(row)
            .and_then(|values| values.get(index))
            .map(String::as_str)
    }

    /// Iterates over the values of one column, or `None` if it does not exist.
    pub fn column_values(&self, column: &str) -> Option<impl Iterator<Item = &str>> {
        let index = self.column_index(column)?;
        Some(
            self.rows
                .iter()
                .map(move |values| values.get(index).map_or("", String::as_str)),
        )
    }

    /// Keeps rows for which `keep` returns true and reports how many were removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(Record<'_>) -> bool,
    {
        let before = self.rows.len();
        let columns = &self.columns;
        self.rows.retain(|values| keep(Record { columns, values }));
        before - self.rows.len()
    }

    /// Rewrites every value of a column in place. Returns false if the column is absent.
    pub fn map_column<F>(&mut self, column: &str, mut map: F) -> bool
    where
        F: FnMut(&str) -> String,
    {
        let Some(index) = self.column_index(column) else {
            return false;
        };
        for row in &mut self.rows {
            if let Some(cell) = row.get_mut(index) {
                *cell = map(cell);
            }
        }
        true
    }

    /// Appends a column, or overwrites it when a column with the same name exists.
    ///
    /// `values` is aligned to rows; missing trailing values become `""`.
    pub fn set_column(&mut self, column: &str, values: Vec<String>) {
        let index = match self.column_index(column) {
            Some(index) => index,
            None => {
                self.columns.push(column.to_string());
                for row in &mut self.rows {
                    row.push(String::new());
                }
                self.columns.len() - 1
            }
        };
        let mut values = values.into_iter();
        for row in &mut self.rows {
            row[index] = values.next().unwrap_or_default();
        }
    }

    /// Renames a column. Returns false if `from` is absent or `to` already exists.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        if self.has_column(to) {
            return false;
        }
        match self.column_index(from) {
            Some(index) => {
                self.columns[index] = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Builds a table holding only the rows at `indices`, in that order.
    pub fn subset(&self, indices: &[usize]) -> Self {
        let rows = indices
            .iter()
            .filter_map(|&index| self.rows.get(index).cloned())
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }
}

/// A borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    values: &'a [String],
}

impl<'a> Record<'a> {
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let index = self.columns.iter().position(|name| name == column)?;
        self.values.get(index).map(String::as_str)
    }

    pub fn get_or_empty(&self, column: &str) -> &'a str {
        self.get(column).unwrap_or("")
    }

    pub fn at(&self, index: usize) -> Option<&'a str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn values(&self) -> &'a [String] {
        self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.columns
            .iter()
            .zip(self.values.iter())
            .map(|(column, value)| (column.as_str(), value.as_str()))
    }
}
