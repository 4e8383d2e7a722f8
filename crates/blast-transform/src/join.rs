//! Left outer join against an uploaded lookup table.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use blast_model::{JoinStats, Result, Table, TableRole};

use crate::filters::require_columns;

/// Copies `lookup_column` of the matched lookup row into `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinField {
    pub lookup_column: &'static str,
    pub target: &'static str,
}

impl JoinField {
    pub fn new(lookup_column: &'static str, target: &'static str) -> Self {
        Self {
            lookup_column,
            target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSpec {
    /// Key column of the primary table.
    pub primary_key: &'static str,
    /// Key column of the lookup table.
    pub lookup_key: &'static str,
    /// Columns the lookup table must carry.
    pub lookup_required: Vec<&'static str>,
    pub fields: Vec<JoinField>,
    /// Output columns that must be non-blank once a join ran; other rows are dropped.
    pub require_after_join: Vec<&'static str>,
}

/// Left-joins `lookup` onto `primary`.
///
/// Every primary row is kept and each [`JoinField`] target is appended (or
/// overwritten) with the matched value, `""` when no lookup row matches. Keys
/// compare as trimmed, case-sensitive strings; the first lookup row with a key
/// wins and blank keys never match.
pub fn join(primary: Table, lookup: &Table, spec: &JoinSpec) -> Result<(Table, JoinStats)> {
    require_columns(lookup, &spec.lookup_required, TableRole::Lookup)?;
    let mut lookup_columns = vec![spec.lookup_key];
    lookup_columns.extend(spec.fields.iter().map(|field| field.lookup_column));
    require_columns(lookup, &lookup_columns, TableRole::Lookup)?;
    require_columns(&primary, &[spec.primary_key], TableRole::Main)?;

    let mut index: HashMap<&str, usize> = HashMap::new();
    if let Some(keys) = lookup.column_values(spec.lookup_key) {
        for (row, key) in keys.enumerate() {
            let key = key.trim();
            if !key.is_empty() {
                index.entry(key).or_insert(row);
            }
        }
    }
    let duplicates = lookup.len() - index.len();
    if duplicates > 0 {
        debug!(
            duplicates,
            "lookup keys repeat or are blank; first match is used"
        );
    }

    let matches: Vec<Option<usize>> = primary
        .column_values(spec.primary_key)
        .map(|keys| keys.map(|key| index.get(key.trim()).copied()).collect())
        .unwrap_or_default();
    let matched = matches.iter().filter(|row| row.is_some()).count();
    let stats = JoinStats {
        lookup_rows: lookup.len(),
        matched,
        unmatched: matches.len() - matched,
    };

    let mut joined = primary;
    for field in &spec.fields {
        let values = matches
            .iter()
            .map(|row| {
                row.and_then(|row| lookup.value(row, field.lookup_column))
                    .unwrap_or("")
                    .to_string()
            })
            .collect();
        joined.set_column(field.target, values);
    }

    info!(
        matched = stats.matched,
        unmatched = stats.unmatched,
        lookup_rows = stats.lookup_rows,
        "lookup join completed"
    );
    if stats.unmatched > 0 {
        warn!(
            unmatched = stats.unmatched,
            key = spec.primary_key,
            "rows without a lookup match"
        );
    }
    Ok((joined, stats))
}
