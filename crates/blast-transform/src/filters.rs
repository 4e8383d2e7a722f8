//! Row filters and cleaners.
//!
//! Each filter takes a table by value and returns the kept rows together with
//! a [`FilterOutcome`] describing what it removed or flagged. Filters run in the
//! order a recipe declares them.

use std::collections::HashSet;

use regex::{NoExpand, Regex};
use tracing::{debug, info, warn};

use blast_model::{BlastError, FilterKind, FilterOutcome, Result, Table, TableRole};

/// Textual shape a column value must have for its row to be kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Contains `@`.
    Email,
    /// A local mobile number: starts with `09` and has at least 11 digits
    /// once cleaned with [`clean_phone`]. The cleaned value replaces the cell.
    Phone,
    /// Exactly equal to a marker value.
    Literal(&'static str),
}

impl Shape {
    /// Decides whether `value` is kept. Total and deterministic.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Self::Email => value.contains('@'),
            Self::Phone => is_mobile_number(&clean_phone(value)),
            Self::Literal(marker) => value == *marker,
        }
    }
}

/// Trims a phone number, drops a trailing `.0` left by spreadsheet floats and
/// keeps ASCII digits only.
pub fn clean_phone(value: &str) -> String {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    trimmed.chars().filter(char::is_ascii_digit).collect()
}

fn is_mobile_number(cleaned: &str) -> bool {
    cleaned.starts_with("09") && cleaned.len() >= 11
}

/// A single row filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFilter {
    /// Regex replacement over a column; never drops rows.
    Clean {
        column: &'static str,
        pattern: &'static str,
        replacement: &'static str,
    },
    Shape {
        column: &'static str,
        shape: Shape,
    },
    /// Drops rows whose column contains `needle`, ignoring case.
    Exclude {
        column: &'static str,
        needle: &'static str,
    },
    /// Drops later rows repeating the key tuple; the first occurrence is kept.
    Dedup(Vec<&'static str>),
    /// Trims the column and counts values whose length differs; never drops rows.
    LengthAudit {
        column: &'static str,
        length: usize,
    },
}

impl RowFilter {
    pub fn kind(&self) -> FilterKind {
        match self {
            Self::Clean { .. } => FilterKind::Clean,
            Self::Shape { .. } => FilterKind::Shape,
            Self::Exclude { .. } => FilterKind::Exclusion,
            Self::Dedup(_) => FilterKind::Dedup,
            Self::LengthAudit { .. } => FilterKind::LengthAudit,
        }
    }

    pub fn columns(&self) -> Vec<&'static str> {
        match self {
            Self::Clean { column, .. }
            | Self::Shape { column, .. }
            | Self::Exclude { column, .. }
            | Self::LengthAudit { column, .. } => vec![*column],
            Self::Dedup(columns) => columns.clone(),
        }
    }

    /// The condition this filter removes or flags, phrased for the report.
    pub fn description(&self) -> String {
        match self {
            Self::Clean { column, pattern, .. } => format!("{column} matches '{pattern}'"),
            Self::Shape {
                column,
                shape: Shape::Email,
            } => format!("{column} does not contain '@'"),
            Self::Shape {
                column,
                shape: Shape::Phone,
            } => format!("{column} does not start with 09 or has fewer than 11 digits"),
            Self::Shape {
                column,
                shape: Shape::Literal(marker),
            } => format!("{column} is not '{marker}'"),
            Self::Exclude { column, needle } => format!("{column} contains '{needle}'"),
            Self::Dedup(columns) => columns
                .iter()
                .map(|column| format!("'{column}'"))
                .collect::<Vec<_>>()
                .join(" and "),
            Self::LengthAudit { column, length } => {
                format!("{column} is not {length} digits")
            }
        }
    }

    /// Applies the filter, returning the kept rows and the outcome.
    pub fn apply(&self, mut table: Table) -> Result<(Table, FilterOutcome)> {
        require_columns(&table, &self.columns(), TableRole::Main)?;
        let mut removed = 0;
        let mut flagged = 0;
        match self {
            Self::Clean {
                column,
                pattern,
                replacement,
            } => {
                let regex = Regex::new(pattern).map_err(|error| BlastError::InvalidPattern {
                    pattern: (*pattern).to_string(),
                    message: error.to_string(),
                })?;
                table.map_column(column, |value| {
                    regex.replace_all(value, NoExpand(*replacement)).into_owned()
                });
            }
            Self::Shape { column, shape } => {
                if *shape == Shape::Phone {
                    table.map_column(column, clean_phone);
                }
                removed = table.retain(|record| shape.accepts(record.get_or_empty(column)));
            }
            Self::Exclude { column, needle } => {
                let needle = needle.to_lowercase();
                removed = table.retain(|record| {
                    !record.get_or_empty(column).to_lowercase().contains(&needle)
                });
            }
            Self::Dedup(columns) => {
                let mut seen: HashSet<Vec<String>> = HashSet::new();
                removed = table.retain(|record| {
                    let key = columns
                        .iter()
                        .map(|column| record.get_or_empty(column).to_string())
                        .collect();
                    seen.insert(key)
                });
            }
            Self::LengthAudit { column, length } => {
                table.map_column(column, |value| value.trim().to_string());
                flagged = table
                    .column_values(column)
                    .map_or(0, |values| {
                        values
                            .filter(|value| value.chars().count() != *length)
                            .count()
                    });
            }
        }
        let outcome = FilterOutcome {
            kind: self.kind(),
            description: self.description(),
            columns: self.columns().iter().map(|column| (*column).to_string()).collect(),
            removed,
            flagged,
        };
        if flagged > 0 {
            warn!(filter = ?outcome.kind, flagged, "{}", outcome.description);
        } else if removed > 0 {
            info!(filter = ?outcome.kind, removed, remaining = table.len(), "filter removed rows");
        } else {
            debug!(filter = ?outcome.kind, remaining = table.len(), "filter kept all rows");
        }
        Ok((table, outcome))
    }
}

/// Fails with [`BlastError::MissingColumns`] listing every absent column.
pub fn require_columns(table: &Table, columns: &[&str], role: TableRole) -> Result<()> {
    let missing = table.missing_columns(columns);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(BlastError::MissingColumns {
            role,
            columns: missing,
        })
    }
}
