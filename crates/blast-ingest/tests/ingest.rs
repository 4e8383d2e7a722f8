use std::fs;

use blast_ingest::{parse, read_table};
use blast_model::{BlastError, SourceFormat};
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

#[test]
fn csv_keeps_text_verbatim_and_skips_blank_rows() {
    let csv = "Contact No.,Account No.,Debtor Name\n\
               =\"09274186327\",00123,Juan Dela Cruz\n\
               ,,\n\
               09171234567,00456,\n";
    let table = parse(csv.as_bytes(), SourceFormat::Csv).expect("parse csv");
    assert_eq!(table.len(), 2);
    assert_eq!(table.value(0, "Contact No."), Some("=\"09274186327\""));
    assert_eq!(table.value(0, "Account No."), Some("00123"));
    assert_eq!(table.value(1, "Debtor Name"), Some(""));
}

#[test]
fn csv_quoted_fields_after_a_space_keep_embedded_commas() {
    let csv = "Account No., Debtor Name, Client\n00123, \"Dela Cruz, Juan\", SBC\n";
    let table = parse(csv.as_bytes(), SourceFormat::Csv).expect("parse csv");
    assert_eq!(table.columns(), ["Account No.", "Debtor Name", "Client"]);
    assert_eq!(table.rows()[0], vec!["00123", "Dela Cruz, Juan", "SBC"]);

    let csv = "Debtor Name, Account No.\n\"Dela Cruz, Juan\", \"00123\"\n";
    let table = parse(csv.as_bytes(), SourceFormat::Csv).expect("parse csv");
    assert_eq!(table.rows()[0], vec!["Dela Cruz, Juan", "00123"]);
}

#[test]
fn csv_quoted_fields_keep_escaped_quotes_newlines_and_inner_spaces() {
    let csv = "Debtor Name, Remarks, Account No.\n\
               \"Juan \"\"JJ\"\" Cruz\", \"line one\nline two\", \" 00123\"\n\
               Ana Cruz,  plain, 00456\n";
    let table = parse(csv.as_bytes(), SourceFormat::Csv).expect("parse csv");
    assert_eq!(table.len(), 2);
    assert_eq!(
        table.rows()[0],
        vec!["Juan \"JJ\" Cruz", "line one\nline two", " 00123"]
    );
    assert_eq!(table.rows()[1], vec!["Ana Cruz", "plain", "00456"]);
}

#[test]
fn csv_pads_short_rows_and_truncates_long_ones() {
    let csv = "A,B,C\n1\n1,2,3,4\n";
    let table = parse(csv.as_bytes(), SourceFormat::Csv).expect("parse csv");
    assert_eq!(table.rows()[0], vec!["1", "", ""]);
    assert_eq!(table.rows()[1], vec!["1", "2", "3"]);
}

#[test]
fn csv_missing_markers_read_as_blank() {
    let csv = "Email,Name\nN/A,NULL\nnan,Ana\n";
    let table = parse(csv.as_bytes(), SourceFormat::Csv).expect("parse csv");
    assert_eq!(table.rows()[0], vec!["", ""]);
    assert_eq!(table.rows()[1], vec!["", "Ana"]);
}

#[test]
fn header_only_upload_is_empty() {
    let error = parse(b"Email,Name\n", SourceFormat::Csv).expect_err("no rows");
    assert!(matches!(error, BlastError::EmptyTable));
    assert!(error.is_informational());

    let error = parse(b"", SourceFormat::Csv).expect_err("no header");
    assert!(matches!(error, BlastError::EmptyTable));
}

fn build_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Account No.").expect("header");
    sheet.write_string(0, 1, " Collector ").expect("header");
    sheet.write_string(0, 2, "Balance").expect("header");
    sheet.write_string(1, 0, "00123").expect("cell");
    sheet.write_string(1, 1, "SPMADRID").expect("cell");
    sheet.write_number(1, 2, 1234.0).expect("cell");
    sheet.write_string(2, 0, "00456").expect("cell");
    sheet.write_number(2, 2, 99.5).expect("cell");
    let second = workbook.add_worksheet();
    second.write_string(0, 0, "ignored").expect("cell");
    workbook.save_to_buffer().expect("save workbook")
}

#[test]
fn xlsx_reads_first_sheet_as_text() {
    let bytes = build_workbook();
    let table = parse(&bytes, SourceFormat::Xlsx).expect("parse xlsx");
    assert_eq!(table.columns(), ["Account No.", "Collector", "Balance"]);
    assert_eq!(table.rows()[0], vec!["00123", "SPMADRID", "1234"]);
    assert_eq!(table.rows()[1], vec!["00456", "", "99.5"]);
}

#[test]
fn read_table_detects_format_from_extension() {
    let dir = tempdir().expect("tempdir");
    let csv_path = dir.path().join("RAW.CSV");
    fs::write(&csv_path, "Email\na@b.com\n").expect("write csv");
    let table = read_table(&csv_path).expect("read csv");
    assert_eq!(table.len(), 1);

    let xlsx_path = dir.path().join("lookup.xlsx");
    fs::write(&xlsx_path, build_workbook()).expect("write xlsx");
    let table = read_table(&xlsx_path).expect("read xlsx");
    assert_eq!(table.len(), 2);

    let other = dir.path().join("notes.txt");
    fs::write(&other, "x").expect("write txt");
    assert!(matches!(
        read_table(&other),
        Err(BlastError::Format { .. })
    ));
}
