//! Record extraction: the two-pass walk over the document's tables.

mod collect;
mod columns;
mod normalize;

pub use collect::{collect_records, collect_tunnel_codes, RecordMap, TunnelCodeMap, MIN_TABLE_ROWS};
pub use columns::{
    find_candidate_header, ColumnMap, MARKER_CLASSIFICATION, MARKER_CLASSIFICATION_CODE,
    MARKER_DESCRIPTION, MARKER_IDENTIFIER, MARKER_TUNNEL_CODE,
};
pub use normalize::{extract_identifier, normalize_cell, normalize_text};

use crate::error::Result;
use crate::model::Record;
use crate::source::PageSource;

/// Run the full extraction over a page source.
///
/// Pages are materialized once, then walked twice: pass one completes the
/// tunnel-code map over the whole document before pass two builds any
/// record, because a primary row may reference a tunnel code that only
/// appears on a later page. Records are returned in identifier order.
pub fn extract_records<S: PageSource>(source: &S) -> Result<Vec<Record>> {
    let pages = source.pages()?;
    log::info!("document has {} pages", pages.len());

    for page in &pages {
        log::info!("page {}: {} tables", page.number, page.tables.len());
    }

    let tunnel_codes = collect_tunnel_codes(&pages);
    log::info!("pass one: {} tunnel codes", tunnel_codes.len());

    let records = collect_records(&pages, &tunnel_codes);
    log::info!("pass two: {} records", records.len());

    Ok(records.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExtractedTable, PageContent};

    fn page(number: u32, tables: Vec<ExtractedTable>) -> PageContent {
        PageContent {
            number,
            tables,
            text_lines: Vec::new(),
        }
    }

    fn primary_table(data_rows: Vec<Vec<&str>>) -> ExtractedTable {
        let mut rows = vec![
            vec!["(1) UN No.", "(2) Name", "(3a) Class", "(3b) Class code"],
            vec!["", "", "", ""],
            vec!["", "", "", ""],
        ];
        rows.extend(data_rows);
        ExtractedTable::from_rows(rows)
    }

    fn tunnel_table(data_rows: Vec<Vec<&str>>) -> ExtractedTable {
        let mut rows = vec![
            vec!["(1) UN No.", "(15) Tunnel code"],
            vec!["", ""],
            vec!["", ""],
        ];
        rows.extend(data_rows);
        ExtractedTable::from_rows(rows)
    }

    #[test]
    fn test_extract_records_empty_source() {
        let source: Vec<PageContent> = Vec::new();
        let records = extract_records(&source).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_extract_records_sorted_by_identifier() {
        let source = vec![page(
            1,
            vec![primary_table(vec![
                vec!["1203", "PETROL", "3", "F1"],
                vec!["1090", "ACETONE", "3", "F1"],
            ])],
        )];

        let records = extract_records(&source).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].identifier, "1090");
        assert_eq!(records[1].identifier, "1203");
    }

    #[test]
    fn test_tunnel_code_from_later_page_attaches() {
        // The primary record appears on page 2, its tunnel code on page 5.
        let source = vec![
            page(
                2,
                vec![primary_table(vec![vec!["1090", "ACETONE", "3", "F1"]])],
            ),
            page(5, vec![tunnel_table(vec![vec!["1090", "D/E"]])]),
        ];

        let records = extract_records(&source).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tunnel_code, "D/E");
    }

    #[test]
    fn test_tunnel_code_page_order_irrelevant() {
        let source = vec![
            page(1, vec![tunnel_table(vec![vec!["1090", "C"]])]),
            page(
                3,
                vec![primary_table(vec![vec!["1090", "ACETONE", "3", "F1"]])],
            ),
        ];

        let records = extract_records(&source).unwrap();
        assert_eq!(records[0].tunnel_code, "C");
    }

    #[test]
    fn test_every_identifier_is_four_digits() {
        let source = vec![page(
            1,
            vec![primary_table(vec![
                vec!["UN 0004 a)", "PICRATE", "1", "1.1D"],
                vec!["1203*", "PETROL", "3", "F1"],
                vec!["note 12", "not a record", "", ""],
            ])],
        )];

        let records = extract_records(&source).unwrap();
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.identifier.len(), 4);
            assert!(record.identifier.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
