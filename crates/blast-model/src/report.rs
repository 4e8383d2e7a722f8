//! Counts and statistics handed back to the caller alongside an export.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Regex cleanup of a column; never drops rows.
    Clean,
    /// Keeps rows whose value has the expected textual shape.
    Shape,
    /// Drops rows containing a forbidden substring.
    Exclusion,
    /// Drops later rows that repeat a key.
    Dedup,
    /// Counts rows of unexpected length without dropping them.
    LengthAudit,
}

/// Result of one row filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOutcome {
    pub kind: FilterKind,
    /// Human-readable condition, e.g. `Email does not contain '@'`.
    pub description: String,
    pub columns: Vec<String>,
    pub removed: usize,
    pub flagged: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinStats {
    pub lookup_rows: usize,
    pub matched: usize,
    pub unmatched: usize,
}

impl JoinStats {
    pub fn total(&self) -> usize {
        self.matched + self.unmatched
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Per-column statistics over the exported rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub column: String,
    pub unique: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub distribution: Vec<ValueCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSummary {
    pub name: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMessage {
    pub level: MessageLevel,
    pub text: String,
}

impl ReportMessage {
    fn info(text: String) -> Self {
        Self {
            level: MessageLevel::Info,
            text,
        }
    }

    fn warning(text: String) -> Self {
        Self {
            level: MessageLevel::Warning,
            text,
        }
    }
}

/// Everything the presentation layer needs to explain a transform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformReport {
    pub recipe: String,
    pub input_rows: usize,
    pub filters: Vec<FilterOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join: Option<JoinStats>,
    /// Rows dropped because a joined field stayed blank.
    pub unmatched_removed: usize,
    /// Rows dropped because a must-have output column was blank.
    pub must_have_removed: usize,
    pub output_rows: usize,
    pub sample_rows: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    pub columns: Vec<ColumnSummary>,
    pub sheets: Vec<SheetSummary>,
}

impl TransformReport {
    pub fn new(recipe: impl Into<String>, input_rows: usize) -> Self {
        Self {
            recipe: recipe.into(),
            input_rows,
            ..Self::default()
        }
    }

    /// Rows removed by every stage combined.
    pub fn rows_removed(&self) -> usize {
        self.filters.iter().map(|outcome| outcome.removed).sum::<usize>()
            + self.unmatched_removed
            + self.must_have_removed
    }

    pub fn removed_by(&self, kind: FilterKind) -> usize {
        self.filters
            .iter()
            .filter(|outcome| outcome.kind == kind)
            .map(|outcome| outcome.removed)
            .sum()
    }

    pub fn summary(&self, column: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|summary| summary.column == column)
    }

    /// Renders the report as caller-facing informational and warning lines.
    pub fn messages(&self) -> Vec<ReportMessage> {
        let mut messages = Vec::new();
        for outcome in &self.filters {
            match outcome.kind {
                FilterKind::Clean => {}
                FilterKind::LengthAudit if outcome.flagged > 0 => {
                    messages.push(ReportMessage::warning(format!(
                        "Found {} rows where {}. These rows are still included but may need review.",
                        outcome.flagged, outcome.description
                    )));
                }
                FilterKind::LengthAudit => {}
                FilterKind::Dedup if outcome.removed > 0 => {
                    messages.push(ReportMessage::info(format!(
                        "Removed {} duplicate rows based on {}.",
                        outcome.removed, outcome.description
                    )));
                }
                _ if outcome.removed > 0 => {
                    messages.push(ReportMessage::info(format!(
                        "Removed {} rows where {}.",
                        outcome.removed, outcome.description
                    )));
                }
                _ => {}
            }
        }
        if let Some(join) = &self.join {
            messages.push(ReportMessage::info(format!(
                "Lookup completed. {} out of {} rows matched.",
                join.matched,
                join.total()
            )));
            if join.unmatched > 0 {
                messages.push(ReportMessage::warning(format!(
                    "{} rows did not find a match in the lookup file. Check the key column for formatting issues.",
                    join.unmatched
                )));
            }
        }
        if self.unmatched_removed > 0 {
            messages.push(ReportMessage::info(format!(
                "Removed {} rows whose lookup value was blank.",
                self.unmatched_removed
            )));
        }
        if self.must_have_removed > 0 {
            messages.push(ReportMessage::info(format!(
                "Removed {} rows with blank required output values.",
                self.must_have_removed
            )));
        }
        if let Some(campaign) = &self.campaign {
            messages.push(ReportMessage::info(format!(
                "Detected campaign '{campaign}'."
            )));
        }
        if self.sample_rows > 0 {
            messages.push(ReportMessage::info(format!(
                "Appended {} sample rows.",
                self.sample_rows
            )));
        }
        messages
    }
}
