//! Email blast upload files.
//!
//! Every variant keeps only rows whose `Email` contains `@` and writes the
//! placeholder columns (`{{chname}}`, `{{agentcode}}`, ...) the mailer merges.

use blast_model::SourceFormat;
use blast_transform::{
    Derivation, FileNamePattern, JoinField, JoinSpec, OutputColumn, Recipe, RowFilter,
    SampleCell, SampleSet, Shape, SheetPlan, Source, StatsSpec,
};

use super::AGENT_REMAP;

pub const BUCKET2_ID: &str = "email-bucket2";
pub const BUCKET4_ID: &str = "email-bucket4";
pub const LEVEL6_ID: &str = "email-level6";
pub const SBF_NEW_ENDO_ID: &str = "email-sbf-new-endo";

/// Collection-fee markup applied to the `+CF` amount columns.
const COLLECTION_FEE: f64 = 1.11;

const TEMPLATE_COLUMNS: [&str; 12] = [
    "TEMPLATE 1 D1",
    "TEMPLATE 1 D2",
    "TEMPLATE 2 D1",
    "TEMPLATE 2 D2",
    "TEMPLATE 3 D1",
    "TEMPLATE 3 D2",
    "TEMPLATE 4 D1",
    "TEMPLATE 4 D2",
    "TEMPLATE 5 D1",
    "TEMPLATE 5 D2",
    "TEMPLATE 6 D1",
    "TEMPLATE 6 D2",
];

fn email_filter() -> RowFilter {
    RowFilter::Shape {
        column: "Email",
        shape: Shape::Email,
    }
}

fn copy(name: &'static str, column: &'static str) -> OutputColumn {
    OutputColumn::new(name, Derivation::Copy(Source::Input(column)))
}

fn amount(name: &'static str, column: &'static str, factor: Option<f64>) -> OutputColumn {
    OutputColumn::new(
        name,
        Derivation::Amount {
            source: Source::Input(column),
            factor,
        },
    )
    .numeric()
}

/// Bucket 2 sequence-template file, enriched from the collector assignment list.
pub fn bucket2() -> Recipe {
    const OB: &str = "Statement Balance (OB)";
    const MYP: &str = "Statement Overdue Amount (MYP)";
    const MAD: &str = "Statement Minimum Payment (MAD)";

    let mut recipe = Recipe::new(
        BUCKET2_ID,
        "Bucket 2 Email Blast",
        SheetPlan::Single("Summary"),
        FileNamePattern::new("B2 Email blasting %B %d %Y"),
    )
    .describe("Bucket 2 sequence template with amounts, collection-fee markups and collector codes")
    .require(&["Contract Number", "Email", "{{chname}}", OB, MYP, MAD, "Assignment Date"])
    .require(&TEMPLATE_COLUMNS)
    .filter(email_filter())
    .filter(RowFilter::Dedup(vec!["Contract Number"]))
    .join(JoinSpec {
        primary_key: "Contract Number",
        lookup_key: "Financing/Card No.",
        lookup_required: vec!["Financing/Card No.", "Collector", "Assign Date"],
        fields: vec![
            JoinField::new("Collector", "Collector"),
            JoinField::new("Assign Date", "Assign Date"),
        ],
        require_after_join: vec!["{{agentcode}}"],
    })
    .output(OutputColumn::passthrough("Contract Number"))
    .output(OutputColumn::passthrough("Email"))
    .output(OutputColumn::passthrough("{{chname}}"))
    .output(OutputColumn::new(
        "{{agentcode}}",
        Derivation::Substitute {
            source: Source::Joined("Collector"),
            pairs: vec![AGENT_REMAP],
        },
    ))
    .output(OutputColumn::new(
        "{{ID}}",
        Derivation::Code {
            source: Source::Output("{{agentcode}}"),
            table: vec![("PJHA", "BDCO")],
            default: "BCCO",
            blank: "",
        },
    ))
    .output(amount("{{OB}}", OB, None))
    .output(amount("{{MYP}}", MYP, None))
    .output(amount("{{MAD}}", MAD, None))
    .output(amount("{{OB+CF}}", OB, Some(COLLECTION_FEE)))
    .output(amount("{{MAD+CF}}", MAD, Some(COLLECTION_FEE)))
    .output(amount("{{MYP+CF}}", MYP, Some(COLLECTION_FEE)));
    for column in TEMPLATE_COLUMNS {
        recipe = recipe.output(OutputColumn::passthrough(column));
    }
    recipe
        .output(OutputColumn::new(
            "Assignment Date",
            Derivation::Prefer(
                Source::Joined("Assign Date"),
                Source::Input("Assignment Date"),
            ),
        ))
        .must_have(&[
            "Email",
            "{{chname}}",
            "{{OB}}",
            "{{MYP}}",
            "{{MAD}}",
            "{{OB+CF}}",
            "{{MAD+CF}}",
            "{{MYP+CF}}",
        ])
        .stats(StatsSpec {
            unique: vec!["Contract Number", "Email", "{{agentcode}}"],
            distribution: vec!["{{ID}}"],
            range: vec!["Assignment Date"],
        })
}

/// Bucket 4 generic template.
pub fn bucket4() -> Recipe {
    Recipe::new(
        BUCKET4_ID,
        "Bucket 4 Email Blast",
        SheetPlan::Single("Summary"),
        FileNamePattern::new("B4 Email blasting %B %d %Y"),
    )
    .describe("Bucket 4 generic template with product names and desk codes")
    .accepts(&[SourceFormat::Xlsx])
    .require(&[
        "Email",
        "Name",
        "Collector",
        "Product Type",
        "Financing/Card No.",
        "Account No.",
        "Assign Date",
    ])
    .filter(email_filter())
    .output(OutputColumn::passthrough("Email"))
    .output(copy("{{chname}}", "Name"))
    .output(OutputColumn::new(
        "{{agentcode}}",
        Derivation::Substitute {
            source: Source::Input("Collector"),
            pairs: vec![AGENT_REMAP],
        },
    ))
    .output(OutputColumn::new(
        "{{product}}",
        Derivation::Substitute {
            source: Source::Input("Product Type"),
            pairs: vec![("MC", "CARD"), ("BEL", "BUSINESS EXPRESS LOAN")],
        },
    ))
    .output(OutputColumn::passthrough("Financing/Card No."))
    .output(OutputColumn::passthrough("Account No."))
    .output(OutputColumn::passthrough("Assign Date"))
    .output(OutputColumn::new(
        "{{ID}}",
        Derivation::Code {
            source: Source::Output("{{agentcode}}"),
            table: vec![("PJHA", "4DCO")],
            default: "4CCO",
            blank: "4CCO",
        },
    ))
    .samples(SampleSet {
        campaign: None,
        rows: vec![vec![
            SampleCell::Text("JDBenbinuto@securitybank.com.ph"),
            SampleCell::Text("Janica d Benbinuto"),
            SampleCell::Text("PJHA"),
            SampleCell::Text("CARD"),
            SampleCell::Text("123456789"),
            SampleCell::Text("987654321"),
            SampleCell::Today,
            SampleCell::Text("4DCO"),
        ]],
    })
    .stats(StatsSpec {
        unique: vec![
            "Email",
            "{{chname}}",
            "{{agentcode}}",
            "{{product}}",
            "Account No.",
            "{{ID}}",
        ],
        distribution: Vec::new(),
        range: vec!["Assign Date"],
    })
}

/// Level 6 negative accounts, all handled by desk `PJND`.
pub fn level6() -> Recipe {
    Recipe::new(
        LEVEL6_ID,
        "Level 6 Negative Accounts Email Blast",
        SheetPlan::Single("Summary"),
        FileNamePattern::new("Level 6 Negative Accounts Email blasting %B %d %Y"),
    )
    .describe("Level 6 negative accounts with the fixed agent code PJND")
    .accepts(&[SourceFormat::Xlsx])
    .require(&[
        "Email",
        "Name",
        "Product Type",
        "Client Name",
        "Account No.",
        "Financing/Card No.",
    ])
    .filter(email_filter())
    .output(OutputColumn::passthrough("Email"))
    .output(copy("{{chname}}", "Name"))
    .output(copy("{{product}}", "Product Type"))
    .output(OutputColumn::new(
        "{{agentcode}}",
        Derivation::Constant("PJND"),
    ))
    .output(OutputColumn::passthrough("Client Name"))
    .output(OutputColumn::passthrough("Account No."))
    .output(OutputColumn::passthrough("Financing/Card No."))
    .stats(StatsSpec {
        unique: vec![
            "Email",
            "{{chname}}",
            "{{product}}",
            "{{agentcode}}",
            "Client Name",
            "Account No.",
            "Financing/Card No.",
        ],
        distribution: Vec::new(),
        range: Vec::new(),
    })
}

/// SBF new endorsements.
pub fn sbf_new_endo() -> Recipe {
    Recipe::new(
        SBF_NEW_ENDO_ID,
        "SBF New Endorsement Email Blast",
        SheetPlan::Single("SBF NEW ENDO"),
        FileNamePattern::new("SBF NEW ENDO %b %d %Y %I_%M %p PST").uppercase(),
    )
    .describe("SBF new endorsements with the fixed ID SCCO")
    .accepts(&[SourceFormat::Xlsx])
    .require(&[
        "Account No.",
        "Name",
        "Email",
        "Collector",
        "Financing/Card No.",
    ])
    .filter(email_filter())
    .output(copy("{{email}}", "Email"))
    .output(copy("{{chname}}", "Name"))
    .output(copy("{{agentcode}}", "Collector"))
    .output(OutputColumn::new("{{ID}}", Derivation::Constant("SCCO")))
    .output(OutputColumn::passthrough("Account No."))
    .output(OutputColumn::passthrough("Financing/Card No."))
    .stats(StatsSpec {
        unique: vec!["{{email}}", "Account No."],
        distribution: vec!["{{agentcode}}"],
        range: Vec::new(),
    })
}
