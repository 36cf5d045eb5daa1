//! # unadr
//!
//! Extracts UN-number substance records from the ADR dangerous-goods
//! reference table (a multi-page tabular PDF) and writes one normalized
//! JSON record per identifier.
//!
//! Columns are located by header content markers ("(1)", "(2)", "(3a)",
//! "(3b)", "(15)") rather than fixed positions, so the physical column
//! layout may vary between document editions. Tunnel restriction codes
//! live in a structurally separate sub-table and are attached to their
//! primary records through a two-pass walk over the whole document.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unadr::{extract_file, output};
//!
//! fn main() -> unadr::Result<()> {
//!     let records = extract_file("unnumberdata.pdf")?;
//!     let count = output::write_records("newData", &records)?;
//!     println!("{} records written", count);
//!     Ok(())
//! }
//! ```

pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod output;
pub mod source;

// Re-export commonly used types
pub use error::{Error, Result};
pub use extract::{extract_records, ColumnMap, RecordMap, TunnelCodeMap};
pub use model::{ExtractedRow, ExtractedTable, PageContent, Record};
pub use source::{ErrorMode, PageSource, PdfSource, SourceOptions};

use std::path::Path;

/// Extract all records from a PDF file.
///
/// # Example
///
/// ```no_run
/// use unadr::extract_file;
///
/// let records = extract_file("unnumberdata.pdf").unwrap();
/// println!("{} records", records.len());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let source = PdfSource::open(path)?;
    extract_records(&source)
}

/// Extract all records from a PDF file with custom source options.
///
/// # Example
///
/// ```no_run
/// use unadr::{extract_file_with_options, SourceOptions};
///
/// let options = SourceOptions::new().strict();
/// let records = extract_file_with_options("unnumberdata.pdf", options).unwrap();
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: SourceOptions,
) -> Result<Vec<Record>> {
    let source = PdfSource::open_with_options(path, options)?;
    extract_records(&source)
}

/// Extract all records from a PDF held in memory.
pub fn extract_bytes(data: &[u8]) -> Result<Vec<Record>> {
    let source = PdfSource::from_bytes(data)?;
    extract_records(&source)
}

/// Full pipeline: extract records from `input` and write one JSON file
/// per record into `output_dir`. Returns the number of records written.
pub fn extract_to_dir<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output_dir: Q) -> Result<usize> {
    let records = extract_file(input)?;
    output::write_records(output_dir, &records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bytes_rejects_garbage() {
        let result = extract_bytes(b"not a pdf at all");
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_file_missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");

        let result = extract_to_dir("/nonexistent/input.pdf", &out);
        assert!(result.is_err());
        // Nothing is written on a document-open failure.
        assert!(!out.exists());
    }
}
