//! The two collection passes over the document's tables.
//!
//! Pass one gathers tunnel restriction codes from the "(15)" sub-tables
//! into a [`TunnelCodeMap`]. Pass two builds the primary records and
//! attaches each one's tunnel code from the completed map. The passes are
//! separate functions so either can be tested with a precomputed map.

use std::collections::BTreeMap;

use regex::Regex;

use crate::model::{ExtractedTable, PageContent, Record};

use super::columns::{
    find_candidate_header, ColumnMap, MARKER_IDENTIFIER, MARKER_TUNNEL_CODE,
};
use super::normalize::{extract_identifier, normalize_cell};

/// Identifier to tunnel-code accumulator, fully populated in pass one and
/// read-only in pass two.
pub type TunnelCodeMap = BTreeMap<String, String>;

/// Identifier to record accumulator built in pass two.
pub type RecordMap = BTreeMap<String, Record>;

/// Tables with fewer rows than this cannot hold a real header plus data.
pub const MIN_TABLE_ROWS: usize = 4;

/// Tunnel restriction code format: one letter A-E, optionally "/" and a
/// second letter.
const TUNNEL_CODE_PATTERN: &str = r"\b([A-E](?:/[A-E])?)\b";

/// Pass one: collect tunnel codes from every tunnel sub-table.
///
/// Later occurrences of the same identifier overwrite earlier ones.
pub fn collect_tunnel_codes(pages: &[PageContent]) -> TunnelCodeMap {
    let pattern = Regex::new(TUNNEL_CODE_PATTERN).unwrap();
    let mut codes = TunnelCodeMap::new();

    for page in pages {
        let before = codes.len();
        for table in &page.tables {
            collect_tunnel_table(&pattern, table, &mut codes);
        }
        log::debug!(
            "page {}: {} tunnel codes after pass one",
            page.number,
            codes.len() - before
        );
    }

    codes
}

fn collect_tunnel_table(pattern: &Regex, table: &ExtractedTable, codes: &mut TunnelCodeMap) {
    if table.row_count() < MIN_TABLE_ROWS {
        return;
    }

    let Some((header_index, map)) = find_candidate_header(table, MARKER_TUNNEL_CODE) else {
        return;
    };
    if !map.has_tunnel_columns() {
        log::debug!("rejected tunnel table: header lacks required columns");
        return;
    }

    // Safe: has_tunnel_columns checked both.
    let identifier_col = map.identifier.unwrap();
    let tunnel_col = map.tunnel_code.unwrap();

    for row in &table.rows[header_index + 1..] {
        let Some(identifier) = row
            .get(identifier_col)
            .and_then(|cell| cell.as_deref())
            .and_then(extract_identifier)
        else {
            continue;
        };

        let text = normalize_cell(row.get(tunnel_col).and_then(|cell| cell.as_deref()));
        if let Some(code) = pattern.find(&text).map(|m| m.as_str().to_string()) {
            log::trace!("tunnel code {} for UN {}", code, identifier);
            codes.insert(identifier, code);
        }
    }
}

/// Pass two: build primary records, pulling tunnel codes from the map
/// produced by [`collect_tunnel_codes`].
///
/// Duplicate identifiers across tables and pages resolve last-writer-wins:
/// the later occurrence's field values replace the earlier record outright.
pub fn collect_records(pages: &[PageContent], tunnel_codes: &TunnelCodeMap) -> RecordMap {
    let mut records = RecordMap::new();

    for page in pages {
        let before = records.len();
        for table in &page.tables {
            collect_record_table(table, tunnel_codes, &mut records);
        }
        log::debug!(
            "page {}: {} new records after pass two",
            page.number,
            records.len() - before
        );
    }

    records
}

fn collect_record_table(
    table: &ExtractedTable,
    tunnel_codes: &TunnelCodeMap,
    records: &mut RecordMap,
) {
    if table.row_count() < MIN_TABLE_ROWS {
        return;
    }

    let Some((header_index, map)) = find_candidate_header(table, MARKER_IDENTIFIER) else {
        return;
    };
    if !map.has_primary_columns() {
        log::debug!("rejected primary table: header lacks required columns");
        return;
    }

    // Safe: has_primary_columns checked all four.
    let max_index = map.max_primary_index().unwrap();

    for row in &table.rows[header_index + 1..] {
        if row.len() <= max_index {
            continue;
        }

        let Some(record) = build_record(row, &map, tunnel_codes) else {
            continue;
        };
        log::trace!("record for UN {}", record.identifier);
        records.insert(record.identifier.clone(), record);
    }
}

/// Build one record from a data row, or `None` when the identifier cell
/// holds no parseable 4-digit number.
///
/// The description is whitespace-normalized; class and class code are
/// trimmed of surrounding whitespace but not collapsed internally. All
/// fields are computed together, so a record is only ever stored fully
/// formed.
fn build_record(
    row: &[Option<String>],
    map: &ColumnMap,
    tunnel_codes: &TunnelCodeMap,
) -> Option<Record> {
    let cell = |index: Option<usize>| -> &str {
        index
            .and_then(|i| row.get(i))
            .and_then(|c| c.as_deref())
            .unwrap_or("")
    };

    let identifier = extract_identifier(cell(map.identifier))?;
    let tunnel_code = tunnel_codes.get(&identifier).cloned().unwrap_or_default();

    Some(Record {
        description: normalize_cell(Some(cell(map.description))),
        classification: cell(map.classification).trim().to_string(),
        classification_code: cell(map.classification_code).trim().to_string(),
        tunnel_code,
        identifier,
    })
}
