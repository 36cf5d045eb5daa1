//! Data model for ADR table extraction.
//!
//! This module defines the intermediate representation that bridges the
//! document source (pages and loosely-typed tables) and the extraction
//! core (normalized substance records).

mod page;
mod record;
mod table;

pub use page::PageContent;
pub use record::Record;
pub use table::{ExtractedRow, ExtractedTable};
