//! SMS blast upload file.

use blast_transform::{
    CampaignRule, Derivation, FileNamePattern, OutputColumn, Recipe, RowFilter, Shape, SheetPlan,
    Source, StatsSpec,
};

pub const ID: &str = "sms-blast";

pub fn recipe() -> Recipe {
    Recipe::new(
        ID,
        "SMS Blast",
        SheetPlan::Single("SMS Blast"),
        FileNamePattern::new("SMS BLAST {campaign} %b %d %Y %I_%M %p PST").uppercase(),
    )
    .describe("Mobile numbers converted to the 639 form for the SMS gateway")
    .require(&["Contact No.", "Account No.", "Debtor Name", "Client"])
    .filter(RowFilter::Shape {
        column: "Contact No.",
        shape: Shape::Phone,
    })
    .output(OutputColumn::new(
        "Campaign",
        Derivation::Copy(Source::Input("Client")),
    ))
    .output(OutputColumn::passthrough("Account No."))
    .output(OutputColumn::new("First Name", Derivation::Constant("")))
    .output(OutputColumn::new(
        "Name",
        Derivation::Copy(Source::Input("Debtor Name")),
    ))
    .output(OutputColumn::new("Last Name", Derivation::Constant("")))
    .output(OutputColumn::new(
        "Mobile Number",
        Derivation::MobileNumber(Source::Input("Contact No.")),
    ))
    .output(OutputColumn::new("OB", Derivation::Constant("")))
    .campaign(CampaignRule::FirstValue {
        column: "Campaign",
        fallback: "GENERIC",
        uppercase: true,
    })
    .stats(StatsSpec {
        unique: vec!["Account No.", "Mobile Number"],
        distribution: vec!["Campaign"],
        range: Vec::new(),
    })
}
