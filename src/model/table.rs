//! Loosely-typed table types produced by the document source.
//!
//! Cells are `Option<String>`: a cell can be present-but-empty or absent
//! entirely, and rows in one table may have different lengths. No schema
//! is assumed beyond "ordered rows of optional text".

/// One row of optional cell texts.
pub type ExtractedRow = Vec<Option<String>>;

/// A table as delivered by the page source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedTable {
    /// Rows in document order.
    pub rows: Vec<ExtractedRow>,
}

impl ExtractedTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from string rows (test and fixture helper).
    pub fn from_rows<S: Into<String>>(
        rows: impl IntoIterator<Item = Vec<S>>,
    ) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|cell| Some(cell.into())).collect())
                .collect(),
        }
    }

    /// Add a row.
    pub fn add_row(&mut self, row: ExtractedRow) {
        self.rows.push(row);
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
