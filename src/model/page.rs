//! Page-level content as delivered by the document source.

use super::ExtractedTable;

/// Extracted content of a single page.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// Page number (1-indexed).
    pub number: u32,

    /// Tables found on the page, in document order.
    pub tables: Vec<ExtractedTable>,

    /// Plain text of the page, split into lines.
    pub text_lines: Vec<String>,
}

impl PageContent {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            tables: Vec::new(),
            text_lines: Vec::new(),
        }
    }

    /// Add a table to the page.
    pub fn add_table(&mut self, table: ExtractedTable) {
        self.tables.push(table);
    }

    /// Check if the page has no tables and no text.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.text_lines.is_empty()
    }

    /// Total number of data cells across all tables on the page.
    pub fn cell_count(&self) -> usize {
        self.tables
            .iter()
            .flat_map(|t| t.rows.iter())
            .map(|r| r.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_new() {
        let page = PageContent::new(3);
        assert_eq!(page.number, 3);
        assert!(page.is_empty());
    }

    #[test]
    fn test_page_add_table() {
        let mut page = PageContent::new(1);
        page.add_table(ExtractedTable::from_rows([vec!["x", "y"]]));
        assert!(!page.is_empty());
        assert_eq!(page.cell_count(), 2);
    }
}
