//! Document sources: where pages and tables come from.
//!
//! The extraction core only sees the [`PageSource`] trait, which delivers
//! pages as loosely-typed [`PageContent`]. The concrete [`PdfSource`] is
//! backed by lopdf; tests substitute in-memory sources.

mod grid;
mod options;
mod pdf;

pub use options::{ErrorMode, SourceOptions};
pub use pdf::PdfSource;

use crate::error::Result;
use crate::model::PageContent;

/// Abstract interface for enumerating document pages.
///
/// Implementations own the document handle; it is released when the
/// source is dropped, on success and failure alike.
pub trait PageSource {
    /// Extract all pages, in document order.
    fn pages(&self) -> Result<Vec<PageContent>>;
}

/// In-memory source over prebuilt pages (fixtures and tests).
impl PageSource for Vec<PageContent> {
    fn pages(&self) -> Result<Vec<PageContent>> {
        Ok(self.clone())
    }
}
