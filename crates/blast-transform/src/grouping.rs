//! Partitioning an output table into worksheets.

use std::collections::BTreeMap;

use blast_model::{ColumnFormat, SheetSpec, Table, truncate_sheet_name};

use crate::recipe::{GroupPlan, SheetPlan};

/// Splits `table` into sheets according to `plan`.
///
/// Grouped plans emit the optional reference sheet first, then one sheet per
/// distinct group value in sorted order. Members of the combined group share a
/// single sheet placed where its first member sorts.
pub fn partition(plan: &SheetPlan, table: &Table, formats: &[ColumnFormat]) -> Vec<SheetSpec> {
    let sheet = |name: &str, table: Table| {
        SheetSpec::new(truncate_sheet_name(name), table).with_formats(formats.to_vec())
    };
    match plan {
        SheetPlan::Single(name) => vec![sheet(*name, table.clone())],
        SheetPlan::Grouped(group) => grouped(group, table)
            .into_iter()
            .map(|(name, table)| sheet(&name, table))
            .collect(),
    }
}

fn grouped(plan: &GroupPlan, table: &Table) -> Vec<(String, Table)> {
    let mut sheets = Vec::new();
    if let Some(reference) = plan.reference_sheet {
        sheets.push((reference.to_string(), table.clone()));
    }

    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    if let Some(values) = table.column_values(plan.column) {
        for (row, value) in values.enumerate() {
            groups.entry(value).or_default().push(row);
        }
    }

    let mut combined_rows: Vec<usize> = Vec::new();
    let mut combined_slot: Option<usize> = None;
    for (value, rows) in groups {
        let name = match value.trim() {
            "" => plan.blank_name,
            trimmed => trimmed,
        };
        match &plan.combined {
            Some(combined) if combined.members.iter().any(|member| *member == name) => {
                if combined_slot.is_none() {
                    combined_slot = Some(sheets.len());
                    sheets.push((combined.name.to_string(), Table::default()));
                }
                combined_rows.extend(rows);
            }
            _ => sheets.push((name.to_string(), table.subset(&rows))),
        }
    }

    if let (Some(slot), Some(combined)) = (combined_slot, &plan.combined) {
        let mut rows = table.subset(&combined_rows);
        for (column, value) in &combined.overrides {
            rows.set_column(column, vec![(*value).to_string(); rows.len()]);
        }
        sheets[slot].1 = rows;
    }
    sheets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::CombinedSheet;

    fn plan() -> SheetPlan {
        SheetPlan::Grouped(GroupPlan {
            column: "Client Name",
            reference_sheet: Some("ML REFERENCE"),
            combined: Some(CombinedSheet {
                name: "SBC Combined",
                members: vec!["SBC CARDS RECOV L1", "SBC PL RECOV L1"],
                overrides: vec![("{{agentcode}}", "FRBALBIRAN")],
            }),
            blank_name: "Blank Client Name",
        })
    }

    fn table(rows: &[[&str; 2]]) -> Table {
        Table::from_rows(
            vec!["Client Name".to_string(), "{{agentcode}}".to_string()],
            rows.iter()
                .map(|row| row.iter().map(|value| (*value).to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn groups_sorted_with_combined_and_blank_sheets() {
        let table = table(&[
            ["SBC PL RECOV L1", "A1"],
            ["ZETA", "A2"],
            ["", "A3"],
            ["SBC CARDS RECOV L1", "A4"],
            ["ALPHA", "A5"],
        ]);
        let sheets = partition(&plan(), &table, &[]);
        let names: Vec<&str> = sheets.iter().map(|sheet| sheet.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["ML REFERENCE", "Blank Client Name", "ALPHA", "SBC Combined", "ZETA"]
        );
        assert_eq!(sheets[0].table.len(), 5);
        assert_eq!(sheets[0].table.value(0, "{{agentcode}}"), Some("A1"));
        let combined = &sheets[3].table;
        assert_eq!(combined.len(), 2);
        assert_eq!(combined.value(0, "Client Name"), Some("SBC CARDS RECOV L1"));
        assert!(
            combined
                .column_values("{{agentcode}}")
                .expect("agent column")
                .all(|value| value == "FRBALBIRAN")
        );
    }

    #[test]
    fn long_group_values_truncate_to_31_characters() {
        let long = "SBC CARDS AND PERSONAL LOANS RECOVERY LEVEL ONE";
        let table = table(&[[long, "A1"]]);
        let sheets = partition(&plan(), &table, &[]);
        assert_eq!(sheets[1].name.chars().count(), 31);
        assert_eq!(sheets[1].name, "SBC CARDS AND PERSONAL LOANS RE");
    }

    #[test]
    fn single_plan_keeps_every_row() {
        let table = table(&[["A", "1"], ["B", "2"]]);
        let sheets = partition(&SheetPlan::Single("Summary"), &table, &[ColumnFormat::Text]);
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].name, "Summary");
        assert_eq!(sheets[0].table, table);
        assert_eq!(sheets[0].formats, vec![ColumnFormat::Text]);
    }
}
