//! Integration tests for the extraction pipeline.

use std::fs;

use unadr::error::Result;
use unadr::{
    extract_records, output, ExtractedTable, PageContent, PageSource, Record,
};

/// Fixture source over hand-built pages.
struct FixtureSource {
    pages: Vec<PageContent>,
}

impl FixtureSource {
    fn new(pages: Vec<PageContent>) -> Self {
        Self { pages }
    }
}

impl PageSource for FixtureSource {
    fn pages(&self) -> Result<Vec<PageContent>> {
        Ok(self.pages.clone())
    }
}

fn page(number: u32, tables: Vec<ExtractedTable>) -> PageContent {
    PageContent {
        number,
        tables,
        text_lines: Vec::new(),
    }
}

fn primary_header() -> Vec<&'static str> {
    vec!["(1) UN No.", "(2) Name", "(3a) Class", "(3b) Class code", "other"]
}

fn primary_table(data_rows: Vec<Vec<&str>>) -> ExtractedTable {
    let mut rows = vec![primary_header(), vec!["", "", "", "", ""], vec!["", "", "", "", ""]];
    rows.extend(data_rows);
    ExtractedTable::from_rows(rows)
}

fn tunnel_table(data_rows: Vec<Vec<&str>>) -> ExtractedTable {
    let mut rows = vec![
        vec!["(1) UN No.", "...", "(15) Tunnel code"],
        vec!["", "", ""],
        vec!["", "", ""],
    ];
    rows.extend(data_rows);
    ExtractedTable::from_rows(rows)
}

/// Multi-page fixture: primary entries split across pages 1 and 2, tunnel
/// codes in a sub-table on page 4, a duplicate entry on page 3.
fn reference_source() -> FixtureSource {
    FixtureSource::new(vec![
        page(
            1,
            vec![primary_table(vec![
                vec!["1203", "PETROL", "3", "F1", "x"],
                vec!["0004 a)", "AMMONIUM\nPICRATE", "1", "1.1D", ""],
            ])],
        ),
        page(
            2,
            vec![primary_table(vec![vec![
                "1090",
                "ACETONE",
                "3",
                "F1",
                "",
            ]])],
        ),
        page(
            3,
            vec![primary_table(vec![vec![
                "1203",
                "PETROL (motor spirit)",
                "3",
                "F1",
                "",
            ]])],
        ),
        page(
            4,
            vec![tunnel_table(vec![
                vec!["1090", "...", "D/E"],
                vec!["1203", "...", "D/E"],
            ])],
        ),
    ])
}

fn find<'a>(records: &'a [Record], identifier: &str) -> &'a Record {
    records
        .iter()
        .find(|r| r.identifier == identifier)
        .unwrap_or_else(|| panic!("no record for {}", identifier))
}

#[test]
fn test_reference_document_records() {
    let records = extract_records(&reference_source()).unwrap();
    assert_eq!(records.len(), 3);

    let petrol = find(&records, "1203");
    // Page 3 reprocessed UN 1203: the later occurrence wins outright.
    assert_eq!(petrol.description, "PETROL (motor spirit)");
    assert_eq!(petrol.classification, "3");
    assert_eq!(petrol.classification_code, "F1");
    assert_eq!(petrol.tunnel_code, "D/E");

    let picrate = find(&records, "0004");
    assert_eq!(picrate.description, "AMMONIUM PICRATE");
    assert_eq!(picrate.classification_code, "1.1D");
    assert_eq!(picrate.tunnel_code, "");

    let acetone = find(&records, "1090");
    // Tunnel code discovered on page 4 attaches to the page 2 record.
    assert_eq!(acetone.tunnel_code, "D/E");
}

#[test]
fn test_all_identifiers_are_four_digits() {
    let records = extract_records(&reference_source()).unwrap();
    for record in &records {
        assert_eq!(record.identifier.len(), 4);
        assert!(record.identifier.chars().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn test_output_files_are_idempotent() {
    let records = extract_records(&reference_source()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let first_dir = dir.path().join("run1");
    let second_dir = dir.path().join("run2");

    output::write_records(&first_dir, &records).unwrap();
    output::write_records(&second_dir, &records).unwrap();

    for record in &records {
        let a = fs::read(first_dir.join(record.file_name())).unwrap();
        let b = fs::read(second_dir.join(record.file_name())).unwrap();
        assert_eq!(a, b, "output for {} differs between runs", record.identifier);
    }
}

#[test]
fn test_output_file_shape() {
    let records = extract_records(&reference_source()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let count = output::write_records(dir.path(), &records).unwrap();
    assert_eq!(count, 3);

    let content = fs::read_to_string(dir.path().join("1090.json")).unwrap();
    // 2-space indentation, published key set.
    assert!(content.contains("{\n  \"number\": \"1090\""));
    assert!(content.contains("\"description\": \"ACETONE\""));
    assert!(content.contains("\"class\": \"3\""));
    assert!(content.contains("\"classCode\": \"F1\""));
    assert!(content.contains("\"tunnel\": \"D/E\""));
}

#[test]
fn test_header_without_data_rows_contributes_nothing() {
    // Valid primary header, but no row carries a parseable identifier.
    let table = ExtractedTable::from_rows(vec![
        primary_header(),
        vec!["note", "general provisions", "", "", ""],
        vec!["", "see 2.2.52", "", "", ""],
        vec!["(cont'd)", "", "", "", ""],
    ]);

    let records = extract_records(&FixtureSource::new(vec![page(1, vec![table])])).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_unrelated_tables_are_skipped() {
    // A table with no markers at all, and one that matches "(1)" but
    // fails primary validation.
    let unrelated = ExtractedTable::from_rows(vec![
        vec!["Chapter", "Title"],
        vec!["1", "General"],
        vec!["2", "Classification"],
        vec!["3", "Listing"],
    ]);
    let false_positive = ExtractedTable::from_rows(vec![
        vec!["see note (1)", "details"],
        vec!["1203", "not a record"],
        vec!["1090", "not a record"],
        vec!["0004", "not a record"],
    ]);

    let source = FixtureSource::new(vec![page(1, vec![unrelated, false_positive])]);
    let records = extract_records(&source).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_ragged_rows_are_tolerated() {
    let mut table = primary_table(vec![vec!["1203", "PETROL", "3", "F1", ""]]);
    // A row shorter than the required columns, and one with absent cells.
    table.add_row(vec![Some("1090".to_string())]);
    table.add_row(vec![
        Some("1230".to_string()),
        None,
        Some("3".to_string()),
        Some("FT1".to_string()),
    ]);

    let records = extract_records(&FixtureSource::new(vec![page(1, vec![table])])).unwrap();
    assert_eq!(records.len(), 2);

    let methanol = find(&records, "1230");
    assert_eq!(methanol.description, "");
    assert_eq!(methanol.classification_code, "FT1");
}
