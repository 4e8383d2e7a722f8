//! Per-row evaluation of output derivations.

use blast_model::{Record, Table};

use crate::numeric::format_amount;
use crate::recipe::{Derivation, OutputColumn, Source, TemplatePart};

/// Converts a cleaned local mobile number to the international form: the first
/// 11 digits, with a leading `09` replaced by `639`.
pub fn mobile_number(cleaned: &str) -> String {
    let local: String = cleaned.chars().take(11).collect();
    match local.strip_prefix("09") {
        Some(rest) => format!("639{rest}"),
        None => local,
    }
}

/// Everything a derivation can read while one output row is being built.
struct RowScope<'a> {
    input: Record<'a>,
    joined: bool,
    outputs: &'a [OutputColumn],
    row: &'a [String],
    timestamp: &'a str,
}

impl<'a> RowScope<'a> {
    fn resolve(&self, source: &Source) -> Option<&'a str> {
        match source {
            Source::Input(column) => self.input.get(column),
            Source::Joined(column) if self.joined => self.input.get(column),
            Source::Joined(_) => None,
            Source::Output(column) => self
                .outputs
                .iter()
                .zip(self.row)
                .find(|(output, _)| output.name == *column)
                .map(|(_, value)| value.as_str()),
        }
    }

    fn value(&self, source: &Source) -> &'a str {
        self.resolve(source).unwrap_or("")
    }
}

impl Derivation {
    fn evaluate(&self, scope: &RowScope<'_>) -> String {
        match self {
            Self::Copy(source) => scope.value(source).to_string(),
            Self::Prefer(primary, fallback) => scope
                .resolve(primary)
                .or_else(|| scope.resolve(fallback))
                .unwrap_or("")
                .to_string(),
            Self::Constant(value) => (*value).to_string(),
            Self::Amount { source, factor } => format_amount(scope.value(source), *factor),
            Self::Template(parts) => parts
                .iter()
                .map(|part| match part {
                    TemplatePart::Literal(text) => *text,
                    TemplatePart::Timestamp => scope.timestamp,
                    TemplatePart::Field(source) => scope.value(source),
                })
                .collect(),
            Self::Substitute { source, pairs } => {
                let value = scope.value(source);
                pairs
                    .iter()
                    .find(|(from, _)| *from == value)
                    .map_or(value, |(_, to)| *to)
                    .to_string()
            }
            Self::Code {
                source,
                table,
                default,
                blank,
            } => {
                let value = scope.value(source);
                if value.is_empty() {
                    (*blank).to_string()
                } else {
                    table
                        .iter()
                        .find(|(from, _)| *from == value)
                        .map_or(*default, |(_, code)| *code)
                        .to_string()
                }
            }
            Self::MobileNumber(source) => mobile_number(scope.value(source)),
        }
    }
}

/// Builds the output table, one row per input row, evaluating derivations in
/// declared order so later columns may read earlier ones.
pub fn derive_outputs(
    outputs: &[OutputColumn],
    input: &Table,
    joined: bool,
    timestamp: &str,
) -> Table {
    let names = outputs
        .iter()
        .map(|column| column.name.to_string())
        .collect();
    let mut table = Table::new(names);
    for record in input.records() {
        let mut row: Vec<String> = Vec::with_capacity(outputs.len());
        for column in outputs {
            let value = column.derivation.evaluate(&RowScope {
                input: record,
                joined,
                outputs,
                row: &row,
                timestamp,
            });
            row.push(value);
        }
        table.push_row(row);
    }
    table
}
