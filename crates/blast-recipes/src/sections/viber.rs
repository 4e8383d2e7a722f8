//! Viber blast upload file.

use blast_model::SourceFormat;
use blast_transform::{
    CampaignRule, Derivation, FileNamePattern, JoinField, JoinSpec, OutputColumn, Recipe,
    RowFilter, SampleCell, SampleSet, Shape, SheetPlan, Source, StatsSpec,
};

use super::FORMULA_WRAPPER;

pub const ID: &str = "viber-blast";

const CURING_B4: &str = "SBC CURING B4";
const CARDS_CURING_B2: &str = "SBC CARDS CURING B2";

fn sample_row(cells: [&'static str; 7]) -> Vec<SampleCell> {
    cells.into_iter().map(SampleCell::Text).collect()
}

fn default_samples() -> SampleSet {
    SampleSet {
        campaign: None,
        rows: vec![
            sample_row([
                "SAMPLE",
                "12345",
                "",
                "Richard Arenas",
                "Collector A",
                "09274186327",
                "",
            ]),
            sample_row([
                "SAMPLE",
                "123456",
                "",
                "Jinnggoy Dela Cruz",
                "Collector B",
                "09760368821",
                "",
            ]),
            sample_row([
                "SAMPLE",
                "1234567",
                "",
                "Roman Dalisay",
                "PJHA",
                "09088925110",
                "",
            ]),
            sample_row([
                "SAMPLE",
                "12345678",
                "",
                "Edwin Paras",
                "Collector D",
                "09175791122",
                "",
            ]),
        ],
    }
}

fn curing_b4_samples() -> SampleSet {
    SampleSet {
        campaign: Some(CURING_B4),
        rows: vec![sample_row([
            "TEST",
            "1234",
            "",
            "Janica d Benbinuto",
            "TEST",
            "09655669672",
            "",
        ])],
    }
}

pub fn recipe() -> Recipe {
    Recipe::new(
        ID,
        "Viber Blast",
        SheetPlan::Single("Viber Blast"),
        FileNamePattern::new("VIBER BLAST {campaign} %b %d %Y %I_%M %p PST").uppercase(),
    )
    .describe("Raw dialer export to Viber upload sheet, with the collector taken from an optional lookup")
    .accepts(&[SourceFormat::Csv])
    .require(&[
        "Contact No.",
        "Debtor Name",
        "Account No.",
        "Client",
        "Validity",
    ])
    .filter(RowFilter::Clean {
        column: "Contact No.",
        pattern: FORMULA_WRAPPER,
        replacement: "",
    })
    .filter(RowFilter::Clean {
        column: "Account No.",
        pattern: FORMULA_WRAPPER,
        replacement: "",
    })
    .filter(RowFilter::Shape {
        column: "Validity",
        shape: Shape::Literal("Valid"),
    })
    .filter(RowFilter::LengthAudit {
        column: "Contact No.",
        length: 11,
    })
    .filter(RowFilter::Exclude {
        column: "Account No.",
        needle: "BEL",
    })
    .filter(RowFilter::Dedup(vec!["Account No.", "Contact No."]))
    .join(JoinSpec {
        primary_key: "Account No.",
        lookup_key: "Account No.",
        lookup_required: vec!["Account No.", "Collector"],
        fields: vec![JoinField::new("Collector", "Collector")],
        require_after_join: Vec::new(),
    })
    .output(OutputColumn::new(
        "Campaign",
        Derivation::Copy(Source::Input("Client")),
    ))
    .output(OutputColumn::new(
        "CH Code",
        Derivation::Copy(Source::Input("Account No.")),
    ))
    .output(OutputColumn::new("First Name", Derivation::Constant("")))
    .output(OutputColumn::new(
        "Full Name",
        Derivation::Copy(Source::Input("Debtor Name")),
    ))
    .output(OutputColumn::new(
        "Last Name",
        Derivation::Copy(Source::Joined("Collector")),
    ))
    .output(OutputColumn::new(
        "Mobile Number",
        Derivation::Copy(Source::Input("Contact No.")),
    ))
    .output(OutputColumn::new("OB", Derivation::Constant("")))
    .campaign(CampaignRule::Detect {
        column: "Campaign",
        known: vec![CURING_B4, CARDS_CURING_B2],
        fallback: "GENERIC",
    })
    .samples(curing_b4_samples())
    .samples(default_samples())
    .stats(StatsSpec {
        unique: vec!["CH Code", "Mobile Number", "Last Name"],
        distribution: vec!["Campaign"],
        range: Vec::new(),
    })
}
