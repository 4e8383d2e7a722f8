use blast_model::{BlastError, ColumnFormat, FilterKind, Table};
use blast_recipes::{catalog, find};
use blast_transform::{RunContext, RunInput, run, sample};
use chrono::{TimeZone, Utc};

fn ctx() -> RunContext {
    let now = Utc
        .with_ymd_and_hms(2025, 3, 10, 1, 15, 0)
        .single()
        .expect("valid instant");
    RunContext::new(now)
}

fn table(columns: &[&str], rows: &[Vec<&str>]) -> Table {
    Table::from_rows(
        columns.iter().map(|column| (*column).to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|value| (*value).to_string()).collect())
            .collect(),
    )
}

fn messages(report: &blast_model::TransformReport) -> String {
    report
        .messages()
        .into_iter()
        .map(|message| message.text)
        .collect::<Vec<_>>()
        .join("\n")
}

fn column<'a>(table: &'a Table, name: &str) -> Vec<&'a str> {
    table
        .column_values(name)
        .expect("column present")
        .collect()
}

#[test]
fn catalog_lists_every_section() {
    let ids: Vec<&str> = catalog().iter().map(|recipe| recipe.id).collect();
    assert_eq!(
        ids,
        vec![
            "viber-blast",
            "email-bucket2",
            "email-bucket4",
            "email-level6",
            "email-sbf-new-endo",
            "sms-blast",
            "autostats-sbf-negative",
            "autostats-l1-l6-negative",
            "mc4-ptp",
        ]
    );
}

#[test]
fn viber_cleans_filters_joins_and_appends_campaign_samples() {
    let recipe = find("viber-blast").expect("recipe");
    let main = table(
        &["Contact No.", "Debtor Name", "Account No.", "Client", "Validity"],
        &[
            vec!["=\"09171234567\"", "Ana Cruz", "=\"1001\"", "SBC CURING B4", "Valid"],
            vec!["=\"09171234567\"", "Ana Cruz", "=\"1001\"", "SBC CURING B4", "Valid"],
            vec!["0917123", "Ben Reyes", "1002", "SBC CURING B4", "Valid"],
            vec!["09170000000", "Carl Lim", "BEL-1003", "SBC CURING B4", "Valid"],
            vec!["09179999999", "Dan Sy", "1004", "SBC CURING B4", "Invalid"],
        ],
    );
    let lookup = table(
        &["Account No.", "Collector"],
        &[vec!["1001", "Collector A"], vec!["1001", "Collector Z"]],
    );

    let export = run(recipe, RunInput::new(main).with_lookup(lookup), &ctx()).expect("run");
    let report = &export.report;
    assert_eq!(report.output_rows, 2);
    assert_eq!(report.sample_rows, 1);
    assert_eq!(report.campaign.as_deref(), Some("SBC CURING B4"));
    assert_eq!(
        export.file_name,
        "VIBER BLAST SBC CURING B4 MAR 10 2025 09_15 AM PST.xlsx"
    );

    let sheet = &export.sheets[0];
    assert_eq!(sheet.name, "Viber Blast");
    assert_eq!(
        sheet.table.columns(),
        [
            "Campaign",
            "CH Code",
            "First Name",
            "Full Name",
            "Last Name",
            "Mobile Number",
            "OB"
        ]
    );
    assert_eq!(column(&sheet.table, "CH Code"), ["1001", "1002", "1234"]);
    assert_eq!(
        column(&sheet.table, "Mobile Number"),
        ["09171234567", "0917123", "09655669672"]
    );
    assert_eq!(column(&sheet.table, "Last Name"), ["Collector A", "", "TEST"]);

    insta::assert_snapshot!(messages(report), @r"
    Removed 1 rows where Validity is not 'Valid'.
    Found 1 rows where Contact No. is not 11 digits. These rows are still included but may need review.
    Removed 1 rows where Account No. contains 'BEL'.
    Removed 1 duplicate rows based on 'Account No.' and 'Contact No.'.
    Lookup completed. 1 out of 2 rows matched.
    1 rows did not find a match in the lookup file. Check the key column for formatting issues.
    Detected campaign 'SBC CURING B4'.
    Appended 1 sample rows.
    ");
}

#[test]
fn viber_without_known_campaign_uses_default_samples() {
    let recipe = find("viber-blast").expect("recipe");
    let main = table(
        &["Contact No.", "Debtor Name", "Account No.", "Client", "Validity"],
        &[vec!["09171234567", "Ana Cruz", "1001", "RCBC", "Valid"]],
    );
    let export = run(recipe, RunInput::new(main), &ctx()).expect("run");
    assert_eq!(export.report.campaign.as_deref(), Some("GENERIC"));
    assert_eq!(export.report.sample_rows, 4);
    assert_eq!(export.row_count(), 5);
    assert!(export.file_name.starts_with("VIBER BLAST GENERIC MAR 10 2025"));
    assert_eq!(column(&export.sheets[0].table, "Last Name")[0], "");
}

#[test]
fn viber_sample_export_without_upload() {
    let recipe = find("viber-blast").expect("recipe");
    let export = sample(recipe, &ctx()).expect("sample").expect("has samples");
    assert_eq!(export.report.output_rows, 0);
    assert_eq!(export.report.sample_rows, 4);
    assert_eq!(
        export.file_name,
        "VIBER BLAST GENERIC MAR 10 2025 09_15 AM PST.xlsx"
    );
}

#[test]
fn sms_converts_numbers_and_names_file_after_first_client() {
    let recipe = find("sms-blast").expect("recipe");
    let main = table(
        &["Contact No.", "Account No.", "Debtor Name", "Client"],
        &[
            vec!["09274186327.0", "A1", "Ana Cruz", " sbc cards "],
            vec!["9274186327", "A2", "Ben Reyes", "SBC CARDS"],
            vec!["0917-123-4567", "A3", "Carl Lim", "SBC CARDS"],
        ],
    );
    let export = run(recipe, RunInput::new(main), &ctx()).expect("run");
    assert_eq!(export.report.removed_by(FilterKind::Shape), 1);
    assert_eq!(export.report.campaign.as_deref(), Some("SBC CARDS"));
    assert_eq!(
        export.file_name,
        "SMS BLAST SBC CARDS MAR 10 2025 09_15 AM PST.xlsx"
    );
    let sheet = &export.sheets[0];
    assert_eq!(
        column(&sheet.table, "Mobile Number"),
        ["639274186327", "639171234567"]
    );
    assert_eq!(column(&sheet.table, "Account No."), ["A1", "A3"]);
    assert_eq!(column(&sheet.table, "Name"), ["Ana Cruz", "Carl Lim"]);
}

fn bucket2_table(rows: &[Vec<&str>]) -> Table {
    let mut columns = vec![
        "Contract Number".to_string(),
        "Email".to_string(),
        "{{chname}}".to_string(),
        "Statement Balance (OB)".to_string(),
        "Statement Overdue Amount (MYP)".to_string(),
        "Statement Minimum Payment (MAD)".to_string(),
        "Assignment Date".to_string(),
    ];
    for template in 1..=6 {
        for day in ["D1", "D2"] {
            columns.push(format!("TEMPLATE {template} {day}"));
        }
    }
    let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
    table(&columns, rows)
}

fn bucket2_row<'a>(contract: &'a str, email: &'a str, ob: &'a str) -> Vec<&'a str> {
    let mut row = vec![contract, email, "Name", ob, "100", "50.5", "2025-01-01"];
    row.extend(std::iter::repeat_n("Hello", 12));
    row
}

#[test]
fn bucket2_joins_collectors_and_marks_up_amounts() {
    let recipe = find("email-bucket2").expect("recipe");
    let main = bucket2_table(&[
        bucket2_row("C1", "a@x.com", "1000.00"),
        bucket2_row("C1", "a2@x.com", "1000.00"),
        bucket2_row("C2", "not-an-email", "1000.00"),
        bucket2_row("C3", "c@x.com", "2000"),
        bucket2_row("C4", "d@x.com", ""),
    ]);
    let lookup = table(
        &["Financing/Card No.", "Collector", "Assign Date"],
        &[
            vec!["C1", "SPMADRID", "2025-02-01"],
            vec!["C4", "RDELACRUZ", "2025-02-02"],
        ],
    );

    let export = run(recipe, RunInput::new(main).with_lookup(lookup), &ctx()).expect("run");
    let report = &export.report;
    assert_eq!(report.removed_by(FilterKind::Shape), 1);
    assert_eq!(report.removed_by(FilterKind::Dedup), 1);
    assert_eq!(report.unmatched_removed, 1);
    assert_eq!(report.must_have_removed, 1);
    assert_eq!(report.output_rows, 1);
    assert_eq!(export.file_name, "B2 Email blasting March 10 2025.xlsx");

    let sheet = &export.sheets[0];
    assert_eq!(sheet.name, "Summary");
    let row = sheet.table.record(0).expect("row");
    assert_eq!(row.get("{{agentcode}}"), Some("PJHA"));
    assert_eq!(row.get("{{ID}}"), Some("BDCO"));
    assert_eq!(row.get("{{OB}}"), Some("1,000.00"));
    assert_eq!(row.get("{{OB+CF}}"), Some("1,110.00"));
    assert_eq!(row.get("{{MYP+CF}}"), Some("111"));
    assert_eq!(row.get("{{MAD+CF}}"), Some("56.1"));
    assert_eq!(row.get("TEMPLATE 6 D2"), Some("Hello"));
    assert_eq!(row.get("Assignment Date"), Some("2025-02-01"));

    let ob = sheet
        .table
        .column_index("{{OB}}")
        .expect("amount column");
    assert_eq!(sheet.format_of(ob), ColumnFormat::NumericWithCommas);
    assert_eq!(sheet.format_of(0), ColumnFormat::Text);
}

#[test]
fn bucket2_without_lookup_keeps_input_assignment_date() {
    let recipe = find("email-bucket2").expect("recipe");
    let main = bucket2_table(&[bucket2_row("C1", "a@x.com", "1000")]);
    let export = run(recipe, RunInput::new(main), &ctx()).expect("run");
    let row = export.sheets[0].table.record(0).expect("row");
    assert_eq!(row.get("{{agentcode}}"), Some(""));
    assert_eq!(row.get("{{ID}}"), Some(""));
    assert_eq!(row.get("Assignment Date"), Some("2025-01-01"));
}

#[test]
fn bucket2_reports_missing_lookup_columns() {
    let recipe = find("email-bucket2").expect("recipe");
    let main = bucket2_table(&[bucket2_row("C1", "a@x.com", "1000")]);
    let lookup = table(&["Financing/Card No.", "Agent"], &[vec!["C1", "X"]]);
    let error = run(recipe, RunInput::new(main).with_lookup(lookup), &ctx()).unwrap_err();
    insta::assert_snapshot!(
        error.to_string(),
        @"the following required columns are missing in the lookup file: Collector, Assign Date"
    );
}

#[test]
fn bucket4_maps_products_and_desk_codes() {
    let recipe = find("email-bucket4").expect("recipe");
    let main = table(
        &[
            "Email",
            "Name",
            "Collector",
            "Product Type",
            "Financing/Card No.",
            "Account No.",
            "Assign Date",
        ],
        &[
            vec!["a@x.com", "Ana", "SPMADRID", "MC", "F1", "A1", "2025-01-05"],
            vec!["b@x.com", "Ben", "", "BEL", "F2", "A2", "2025-01-03"],
            vec!["c@x.com", "Cid", "RDELA", "PL", "F3", "A3", "2025-01-04"],
        ],
    );
    let export = run(recipe, RunInput::new(main), &ctx()).expect("run");
    let table = &export.sheets[0].table;
    assert_eq!(
        column(table, "{{product}}"),
        ["CARD", "BUSINESS EXPRESS LOAN", "PL", "CARD"]
    );
    assert_eq!(column(table, "{{ID}}"), ["4DCO", "4CCO", "4CCO", "4DCO"]);
    assert_eq!(column(table, "Assign Date")[3], "2025-03-10");

    let range = export.report.summary("Assign Date").expect("range");
    assert_eq!(range.min.as_deref(), Some("2025-01-03"));
    assert_eq!(range.max.as_deref(), Some("2025-03-10"));
}

#[test]
fn level6_assigns_fixed_agent() {
    let recipe = find("email-level6").expect("recipe");
    let main = table(
        &[
            "Email",
            "Name",
            "Product Type",
            "Client Name",
            "Account No.",
            "Financing/Card No.",
        ],
        &[
            vec!["a@x.com", "Ana", "MC", "SBC", "00012", "5555"],
            vec!["none", "Ben", "MC", "SBC", "00013", "5556"],
        ],
    );
    let export = run(recipe, RunInput::new(main), &ctx()).expect("run");
    let table = &export.sheets[0].table;
    assert_eq!(column(table, "{{agentcode}}"), ["PJND"]);
    assert_eq!(column(table, "Account No."), ["00012"]);
    assert_eq!(
        export.file_name,
        "Level 6 Negative Accounts Email blasting March 10 2025.xlsx"
    );
}

#[test]
fn sbf_new_endo_sets_id() {
    let recipe = find("email-sbf-new-endo").expect("recipe");
    let main = table(
        &["Account No.", "Name", "Email", "Collector", "Financing/Card No."],
        &[vec!["A1", "Ana", "a@x.com", "PJHA", "F1"]],
    );
    let export = run(recipe, RunInput::new(main), &ctx()).expect("run");
    let sheet = &export.sheets[0];
    assert_eq!(sheet.name, "SBF NEW ENDO");
    assert_eq!(
        sheet.table.columns(),
        [
            "{{email}}",
            "{{chname}}",
            "{{agentcode}}",
            "{{ID}}",
            "Account No.",
            "Financing/Card No."
        ]
    );
    assert_eq!(column(&sheet.table, "{{ID}}"), ["SCCO"]);
    assert_eq!(export.file_name, "SBF NEW ENDO MAR 10 2025 09_15 AM PST.xlsx");
}

#[test]
fn autostats_dedups_accounts_and_writes_remarks() {
    let recipe = find("autostats-sbf-negative").expect("recipe");
    let main = table(
        &["Account No.", "Name", "Financing/Card No.", "Email"],
        &[
            vec!["001", "Ana Cruz", "5555", "ana@x.com"],
            vec!["001", "Ana Cruz", "5556", "ana2@x.com"],
            vec!["002", "Ben Reyes", "7777", ""],
        ],
    );
    let export = run(recipe, RunInput::new(main), &ctx()).expect("run");
    assert_eq!(export.report.removed_by(FilterKind::Dedup), 1);
    assert_eq!(export.file_name, "SBF_NEGATIVE_AUTOSTATS March 10 2025.xlsx");

    let table = &export.sheets[0].table;
    assert_eq!(
        column(table, "STATUS CODE"),
        [
            "EMAIL BLAST SENT - WAITING FOR REPLY",
            "EMAIL BLAST SENT - WAITING FOR REPLY"
        ]
    );
    assert_eq!(
        column(table, "REMARKS"),
        [
            "EMAIL_SP MADRID_2025-03-10 09:15:00_ZMJEPOLLO - ana@x.com NEGATIVE TEMPLATE",
            "EMAIL_SP MADRID_2025-03-10 09:15:00_ZMJEPOLLO -  NEGATIVE TEMPLATE",
        ]
    );
    assert_eq!(column(table, "REMARKS DATE")[0], "2025-03-10 09:15:00");

    let status = export.report.summary("STATUS CODE").expect("status");
    assert_eq!(status.distribution.len(), 1);
    assert_eq!(status.distribution[0].count, 2);
}

#[test]
fn autostats_email_column_is_optional() {
    let recipe = find("autostats-l1-l6-negative").expect("recipe");
    let main = table(
        &["Account No.", "Name", "Financing/Card No."],
        &[vec!["001", "Ana Cruz", "5555"]],
    );
    let export = run(recipe, RunInput::new(main), &ctx()).expect("run");
    assert_eq!(
        column(&export.sheets[0].table, "REMARKS"),
        ["SPMA | 08 With SMS / email / DL without response -  EMAIL SENT"]
    );
    assert_eq!(export.sheets[0].name, "L1-L6_NEGATIVE_AUTOSTATS");
}

#[test]
fn mc4_splits_clients_into_sheets() {
    let recipe = find("mc4-ptp").expect("recipe");
    let main = table(
        &[
            "Email",
            "Name",
            "Account No.",
            "Collector",
            "Financing/Card No.",
            "Client Name",
            "Product Type",
        ],
        &[
            vec!["a@x.com", "Ana", "A1", "AG1", "F1", "SBC CARDS RECOV L1", "MC"],
            vec!["b@x.com", "Ben", "A2", "AG2", "F2", "RCBC", "MC"],
            vec!["c@x.com", "Cid", "A3", "AG3", "F3", "SBC PL RECOV L1", "PL"],
            vec!["d@x.com", "Dee", "A4", "AG4", "F4", "", "PL"],
            vec!["bad", "Eve", "A5", "AG5", "F5", "RCBC", "MC"],
        ],
    );
    let export = run(recipe, RunInput::new(main), &ctx()).expect("run");
    let names: Vec<&str> = export
        .sheets
        .iter()
        .map(|sheet| sheet.name.as_str())
        .collect();
    assert_eq!(
        names,
        ["ML REFERENCE", "Blank Client Name", "RCBC", "SBC Combined"]
    );
    assert_eq!(export.sheets[0].table.len(), 4);

    let combined = &export.sheets[3].table;
    assert_eq!(column(combined, "Account No."), ["A1", "A3"]);
    assert_eq!(
        column(combined, "{{agentcode}}"),
        ["FRBALBIRAN", "FRBALBIRAN"]
    );
    assert_eq!(column(&export.sheets[2].table, "{{agentcode}}"), ["AG2"]);
    assert_eq!(export.file_name, "MC4_PTP_March 10 2025.xlsx");
}

#[test]
fn everything_filtered_is_informational() {
    let recipe = find("email-level6").expect("recipe");
    let main = table(
        &[
            "Email",
            "Name",
            "Product Type",
            "Client Name",
            "Account No.",
            "Financing/Card No.",
        ],
        &[vec!["none", "Ben", "MC", "SBC", "00013", "5556"]],
    );
    let error = run(recipe, RunInput::new(main), &ctx()).unwrap_err();
    assert!(error.is_informational());
    assert!(matches!(error, BlastError::EmptyResult { .. }));
    assert_eq!(error.report().map(|report| report.output_rows), Some(0));
}

/// A value every recipe filter accepts for a column of this name.
fn passing_value(column: &str) -> &'static str {
    if column.contains("Email") || column.contains("{{email}}") {
        "ana@x.com"
    } else if column.contains("Contact") || column.contains("Mobile") {
        "09171234567"
    } else if column == "Validity" {
        "Valid"
    } else if column.contains("Date") {
        "2025-01-01"
    } else {
        "1001"
    }
}

#[test]
fn every_recipe_emits_declared_columns_in_order() {
    for recipe in catalog() {
        let columns: Vec<&str> = recipe
            .required
            .iter()
            .chain(&recipe.optional)
            .copied()
            .collect();
        let row: Vec<&str> = columns.iter().map(|column| passing_value(column)).collect();
        let export = run(recipe, RunInput::new(table(&columns, &[row])), &ctx())
            .unwrap_or_else(|error| panic!("{}: {error}", recipe.id));
        assert_eq!(export.report.output_rows, 1, "{}", recipe.id);
        assert!(!export.sheets.is_empty(), "{}", recipe.id);
        let expected = recipe.output_names();
        for sheet in &export.sheets {
            assert_eq!(
                sheet.table.columns(),
                expected.as_slice(),
                "{}: sheet {}",
                recipe.id,
                sheet.name
            );
        }
    }
}
