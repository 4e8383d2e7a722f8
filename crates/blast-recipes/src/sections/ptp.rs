//! MC4 promise-to-pay workbook, one sheet per client.

use blast_model::SourceFormat;
use blast_transform::{
    CombinedSheet, FileNamePattern, GroupPlan, OutputColumn, Recipe, RowFilter, Shape, SheetPlan,
    StatsSpec,
};

pub const ID: &str = "mc4-ptp";

/// Clients whose rows share the `SBC Combined` sheet.
const COMBINED_CLIENTS: [&str; 3] = [
    "SBC CARDS RECOV L1",
    "SBC CARDS & LOAN L6",
    "SBC PL RECOV L1",
];

const COLUMNS: [&str; 7] = [
    "Email",
    "{{chname}}",
    "Account No.",
    "{{agentcode}}",
    "Financing/Card No.",
    "Client Name",
    "Product Type",
];

pub fn recipe() -> Recipe {
    let mut recipe = Recipe::new(
        ID,
        "MC4 PTP",
        SheetPlan::Grouped(GroupPlan {
            column: "Client Name",
            reference_sheet: Some("ML REFERENCE"),
            combined: Some(CombinedSheet {
                name: "SBC Combined",
                members: COMBINED_CLIENTS.to_vec(),
                overrides: vec![("{{agentcode}}", "FRBALBIRAN")],
            }),
            blank_name: "Blank Client Name",
        }),
        FileNamePattern::new("MC4_PTP_%B %d %Y"),
    )
    .describe("Promise-to-pay list split into one sheet per client")
    .accepts(&[SourceFormat::Xlsx])
    .alias("Name", "{{chname}}")
    .alias("Collector", "{{agentcode}}")
    .require(&COLUMNS)
    .filter(RowFilter::Shape {
        column: "Email",
        shape: Shape::Email,
    });
    for column in COLUMNS {
        recipe = recipe.output(OutputColumn::passthrough(column));
    }
    recipe.stats(StatsSpec {
        unique: vec!["Email", "Account No."],
        distribution: vec!["Client Name"],
        range: Vec::new(),
    })
}
