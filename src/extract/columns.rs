//! Column location by header content markers.
//!
//! The ADR table prints a numbered label in each header cell ("(1)",
//! "(2)", ...) while the physical column order and count vary between
//! document editions. Columns are therefore located by scanning header
//! cell text for the known labels instead of assuming fixed positions.

use crate::model::{ExtractedRow, ExtractedTable};

/// Header marker for the UN number column.
pub const MARKER_IDENTIFIER: &str = "(1)";
/// Header marker for the substance name column.
pub const MARKER_DESCRIPTION: &str = "(2)";
/// Header marker for the hazard class column.
pub const MARKER_CLASSIFICATION: &str = "(3a)";
/// Header marker for the classification code column.
pub const MARKER_CLASSIFICATION_CODE: &str = "(3b)";
/// Header marker for the tunnel restriction code column.
pub const MARKER_TUNNEL_CODE: &str = "(15)";

/// Semantic field positions within one table, built from its header row.
///
/// Scoped to a single table and discarded once the table's data rows
/// have been read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub identifier: Option<usize>,
    pub description: Option<usize>,
    pub classification: Option<usize>,
    pub classification_code: Option<usize>,
    pub tunnel_code: Option<usize>,
}

impl ColumnMap {
    /// Scan a row's cells left to right and record the position of every
    /// cell carrying a known marker.
    ///
    /// If a marker appears in two cells, the right-most occurrence wins.
    pub fn from_row(row: &ExtractedRow) -> Self {
        let mut map = Self::default();

        for (index, cell) in row.iter().enumerate() {
            let Some(text) = cell.as_deref() else {
                continue;
            };

            if text.contains(MARKER_IDENTIFIER) {
                map.identifier = Some(index);
            }
            if text.contains(MARKER_DESCRIPTION) {
                map.description = Some(index);
            }
            if text.contains(MARKER_CLASSIFICATION) {
                map.classification = Some(index);
            }
            if text.contains(MARKER_CLASSIFICATION_CODE) {
                map.classification_code = Some(index);
            }
            if text.contains(MARKER_TUNNEL_CODE) {
                map.tunnel_code = Some(index);
            }
        }

        map
    }

    /// No marker matched: this row is not a header row.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// All four columns required of a primary table are present.
    pub fn has_primary_columns(&self) -> bool {
        self.identifier.is_some()
            && self.description.is_some()
            && self.classification.is_some()
            && self.classification_code.is_some()
    }

    /// Both columns required of a tunnel-code sub-table are present.
    pub fn has_tunnel_columns(&self) -> bool {
        self.identifier.is_some() && self.tunnel_code.is_some()
    }

    /// Highest column index a primary data row must cover.
    ///
    /// Only meaningful after [`has_primary_columns`](Self::has_primary_columns)
    /// has been checked.
    pub fn max_primary_index(&self) -> Option<usize> {
        [
            self.identifier,
            self.description,
            self.classification,
            self.classification_code,
        ]
        .into_iter()
        .flatten()
        .max()
    }
}

/// Find the first candidate header row in a table.
///
/// A row is a candidate when any of its cells contains `marker`. Only the
/// first candidate is considered; validating its [`ColumnMap`] is up to
/// the caller, and a table whose first candidate fails validation
/// contributes nothing.
pub fn find_candidate_header(table: &ExtractedTable, marker: &str) -> Option<(usize, ColumnMap)> {
    for (row_index, row) in table.rows.iter().enumerate() {
        let is_candidate = row
            .iter()
            .any(|cell| cell.as_deref().is_some_and(|text| text.contains(marker)));

        if is_candidate {
            return Some((row_index, ColumnMap::from_row(row)));
        }
    }

    None
}
