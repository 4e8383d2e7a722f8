//! Auto-statistics remark uploads for negative-account email blasts.

use blast_model::SourceFormat;
use blast_transform::{
    Derivation, FileNamePattern, OutputColumn, Recipe, RowFilter, SheetPlan, Source, StatsSpec,
    TemplatePart,
};

pub const SBF_NEGATIVE_ID: &str = "autostats-sbf-negative";
pub const L1_L6_NEGATIVE_ID: &str = "autostats-l1-l6-negative";

const STATUS_CODE: &str = "EMAIL BLAST SENT - WAITING FOR REPLY";
const REMARKS_BY: &str = "ZMJEPOLLO";

fn recipe(
    id: &'static str,
    title: &'static str,
    sheet: &'static str,
    file_name: &'static str,
    remarks: Vec<TemplatePart>,
) -> Recipe {
    Recipe::new(
        id,
        title,
        SheetPlan::Single(sheet),
        FileNamePattern::new(file_name),
    )
    .accepts(&[SourceFormat::Xlsx])
    .require(&["Account No.", "Name", "Financing/Card No."])
    .optional(&["Email"])
    .filter(RowFilter::Dedup(vec!["Account No."]))
    .output(OutputColumn::new(
        "ACCOUNT NUMBER",
        Derivation::Copy(Source::Input("Account No.")),
    ))
    .output(OutputColumn::new(
        "NAME",
        Derivation::Copy(Source::Input("Name")),
    ))
    .output(OutputColumn::new(
        "CARD NUMBER",
        Derivation::Copy(Source::Input("Financing/Card No.")),
    ))
    .output(OutputColumn::new(
        "STATUS CODE",
        Derivation::Constant(STATUS_CODE),
    ))
    .output(OutputColumn::new("REMARKS", Derivation::Template(remarks)))
    .output(OutputColumn::new(
        "REMARKS BY",
        Derivation::Constant(REMARKS_BY),
    ))
    .output(OutputColumn::new(
        "REMARKS DATE",
        Derivation::Template(vec![TemplatePart::Timestamp]),
    ))
    .stats(StatsSpec {
        unique: vec!["ACCOUNT NUMBER", "NAME", "CARD NUMBER"],
        distribution: vec!["STATUS CODE"],
        range: Vec::new(),
    })
}

pub fn sbf_negative() -> Recipe {
    recipe(
        SBF_NEGATIVE_ID,
        "SBF Negative Autostats",
        "SBF_NEGATIVE_AUTOSTATS",
        "SBF_NEGATIVE_AUTOSTATS %B %d %Y",
        vec![
            TemplatePart::Literal("EMAIL_SP MADRID_"),
            TemplatePart::Timestamp,
            TemplatePart::Literal("_ZMJEPOLLO - "),
            TemplatePart::Field(Source::Input("Email")),
            TemplatePart::Literal(" NEGATIVE TEMPLATE"),
        ],
    )
    .describe("Remarks for SBF negative accounts after an email blast")
}

pub fn l1_l6_negative() -> Recipe {
    recipe(
        L1_L6_NEGATIVE_ID,
        "L1-L6 Negative Autostats",
        "L1-L6_NEGATIVE_AUTOSTATS",
        "L1-L6_NEGATIVE_AUTOSTATS %B %d %Y",
        vec![
            TemplatePart::Literal("SPMA | 08 With SMS / email / DL without response - "),
            TemplatePart::Field(Source::Input("Email")),
            TemplatePart::Literal(" EMAIL SENT"),
        ],
    )
    .describe("Remarks for level 1 to 6 negative accounts after an email blast")
}
