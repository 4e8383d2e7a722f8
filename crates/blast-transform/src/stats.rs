//! Column statistics for the caller-facing report.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};

use blast_model::{ColumnSummary, Table, ValueCount};

use crate::recipe::StatsSpec;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d-%b-%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%m/%d/%Y %H:%M:%S"];

fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Smallest and largest non-blank value.
///
/// Values compare as dates when every one of them parses as a date, and as
/// text otherwise.
fn value_range<'a>(values: &[&'a str]) -> Option<(&'a str, &'a str)> {
    let present: Vec<&str> = values
        .iter()
        .copied()
        .filter(|value| !value.trim().is_empty())
        .collect();
    let dates: Option<Vec<NaiveDateTime>> = present.iter().map(|value| parse_date(value)).collect();
    let order = |left: &(usize, &&str), right: &(usize, &&str)| -> Ordering {
        match &dates {
            Some(dates) => dates[left.0].cmp(&dates[right.0]),
            None => left.1.cmp(right.1),
        }
    };
    let min = present.iter().enumerate().min_by(order)?;
    let max = present.iter().enumerate().max_by(order)?;
    Some((*min.1, *max.1))
}

fn distribution(values: &[&str]) -> Vec<ValueCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(*value).or_default() += 1;
    }
    let mut counts: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|left, right| right.count.cmp(&left.count));
    counts
}

/// Summarizes the columns named in `spec`; columns absent from `table` are skipped.
pub fn summarize(table: &Table, spec: &StatsSpec) -> Vec<ColumnSummary> {
    let mut columns: Vec<&str> = Vec::new();
    for column in spec
        .unique
        .iter()
        .chain(&spec.distribution)
        .chain(&spec.range)
    {
        if !columns.contains(column) {
            columns.push(*column);
        }
    }
    columns
        .into_iter()
        .filter_map(|column| {
            let values: Vec<&str> = table.column_values(column)?.collect();
            let unique = values.iter().collect::<HashSet<_>>().len();
            let (min, max) = if spec.range.contains(&column) {
                value_range(&values).map_or((None, None), |(min, max)| {
                    (Some(min.to_string()), Some(max.to_string()))
                })
            } else {
                (None, None)
            };
            let distribution = if spec.distribution.contains(&column) {
                distribution(&values)
            } else {
                Vec::new()
            };
            Some(ColumnSummary {
                column: column.to_string(),
                unique,
                min,
                max,
                distribution,
            })
        })
        .collect()
}
