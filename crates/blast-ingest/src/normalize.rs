//! Header and cell normalization shared by the CSV and XLSX readers.

use std::collections::BTreeSet;

/// Cell texts that uploads use to mean "no value".
///
/// These are the default missing-value markers of the spreadsheet tooling the
/// upload templates were built around; they read back as `""`.
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub(crate) fn is_missing_marker(value: &str) -> bool {
    MISSING_MARKERS.contains(&value)
}

pub(crate) fn normalize_header(raw: &str) -> String {
    raw.trim().trim_start_matches('\u{feff}').trim().to_string()
}

/// Normalizes one data cell: missing-value markers become `""`. Everything
/// else is kept verbatim.
pub(crate) fn normalize_cell(raw: &str) -> String {
    if is_missing_marker(raw) {
        String::new()
    } else {
        raw.to_string()
    }
}

/// Turns raw header cells into unique, non-empty column names.
///
/// Blank headers become `Unnamed: <index>`; repeats get `.1`, `.2`, ... suffixes.
pub(crate) fn build_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = BTreeSet::new();
    let mut headers = Vec::new();
    for (index, value) in raw.into_iter().enumerate() {
        let mut name = normalize_header(value.as_ref());
        if name.is_empty() {
            name = format!("Unnamed: {index}");
        }
        if seen.contains(&name) {
            let mut suffix = 1usize;
            while seen.contains(&format!("{name}.{suffix}")) {
                suffix += 1;
            }
            name = format!("{name}.{suffix}");
        }
        seen.insert(name.clone());
        headers.push(name);
    }
    headers
}

pub(crate) fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|value| value.trim().is_empty())
}
