//! Record output: one JSON file per record.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Record;

/// Write each record to `<identifier>.json` in `dir`, creating the
/// directory if absent.
///
/// Files are pretty-printed with 2-space indentation, UTF-8, non-ASCII
/// preserved verbatim. Returns the number of files written.
pub fn write_records<P: AsRef<Path>>(dir: P, records: &[Record]) -> Result<usize> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)
        .map_err(|e| Error::Output(format!("cannot create {}: {}", dir.display(), e)))?;

    for record in records {
        let path = dir.join(record.file_name());
        let mut json = serde_json::to_string_pretty(record)?;
        json.push('\n');
        fs::write(&path, json)
            .map_err(|e| Error::Output(format!("cannot write {}: {}", path.display(), e)))?;
        log::debug!("wrote {}", path.display());
    }

    Ok(records.len())
}
