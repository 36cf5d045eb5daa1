//! Cell text normalization and identifier parsing.

/// Collapse raw cell text into a single-spaced, trimmed string.
///
/// Newlines become spaces and runs of whitespace collapse to one space.
/// This function is pure and total; any input yields a valid string.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize an optional cell, treating an absent cell as empty text.
pub fn normalize_cell(cell: Option<&str>) -> String {
    cell.map(normalize_text).unwrap_or_default()
}

/// Find the first run of exactly four decimal digits in noisy cell text.
///
/// Source cells often wrap the UN number in footnote markers or
/// punctuation, so the cell is scanned for digit runs instead of being
/// required to contain only the number. A run of five or more digits is
/// not an identifier and is passed over.
pub fn extract_identifier(text: &str) -> Option<String> {
    let mut run_start = None;

    for (i, c) in text.char_indices() {
        if c.is_ascii_digit() {
            run_start.get_or_insert(i);
        } else if let Some(start) = run_start.take() {
            if i - start == 4 {
                return Some(format!("{:0>4}", &text[start..i]));
            }
        }
    }

    if let Some(start) = run_start {
        if text.len() - start == 4 {
            return Some(format!("{:0>4}", &text[start..]));
        }
    }

    None
}
