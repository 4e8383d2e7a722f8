//! Worksheet naming.

use blast_model::{SHEET_NAME_LIMIT, truncate_sheet_name};

const FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Replaces characters spreadsheet hosts reject in sheet names with `_` and
/// truncates to the host limit.
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|ch| if FORBIDDEN.contains(&ch) { '_' } else { ch })
        .collect();
    let cleaned = cleaned.trim_matches('\'');
    if cleaned.is_empty() {
        return "Sheet".to_string();
    }
    truncate_sheet_name(cleaned)
}

/// Sanitises every name and resolves collisions, which hosts compare without
/// case, by appending ` (2)`, ` (3)`, ... within the length limit.
pub fn unique_sheet_names<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut taken: Vec<String> = Vec::new();
    let mut result = Vec::new();
    for name in names {
        let base = sanitize_sheet_name(name);
        let mut candidate = base.clone();
        let mut counter = 2;
        while taken.contains(&candidate.to_lowercase()) {
            let suffix = format!(" ({counter})");
            let room = SHEET_NAME_LIMIT.saturating_sub(suffix.chars().count());
            let stem: String = base.chars().take(room).collect();
            candidate = format!("{}{suffix}", stem.trim_end());
            counter += 1;
        }
        taken.push(candidate.to_lowercase());
        result.push(candidate);
    }
    result
}
