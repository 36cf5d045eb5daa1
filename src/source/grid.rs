//! Grid reconstruction from positioned text spans.
//!
//! PDF pages deliver text as individually positioned spans, not as
//! tables. Spans are grouped into rows by Y position, column starts are
//! found by clustering span X positions across rows, and consecutive
//! rows that fill at least two columns form a table. Wrapped cell lines
//! (a row filling a single known column) are merged into the cell above
//! with a newline, which the normalizer later collapses.

use crate::model::{ExtractedRow, ExtractedTable};

/// A piece of text at a position on the page (PDF coordinates,
/// origin bottom-left).
#[derive(Debug, Clone)]
pub(crate) struct TextSpan {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// Clustering thresholds.
#[derive(Debug, Clone)]
pub(crate) struct GridConfig {
    /// Max Y distance for spans to share a row (points).
    pub row_tolerance: f32,
    /// Max X distance for span starts to share a column (points).
    pub column_tolerance: f32,
    /// Spans that must open at an X position for it to count as a column.
    pub min_column_hits: usize,
    /// Filled columns for a row to count as tabular.
    pub min_tabular_cells: usize,
    /// Rows required before a region is emitted as a table.
    pub min_table_rows: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_tolerance: 3.0,
            column_tolerance: 8.0,
            min_column_hits: 3,
            min_tabular_cells: 2,
            min_table_rows: 2,
        }
    }
}

/// Builds tables and text lines from page spans.
#[derive(Debug, Default)]
pub(crate) struct GridBuilder {
    config: GridConfig,
}

struct SpanRow {
    spans: Vec<TextSpan>,
}

impl GridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_config(config: GridConfig) -> Self {
        Self { config }
    }

    /// Reconstruct tables and plain-text lines from the page's spans.
    pub fn build(&self, spans: Vec<TextSpan>) -> (Vec<ExtractedTable>, Vec<String>) {
        let rows = self.group_rows(spans);

        let text_lines = rows
            .iter()
            .map(|row| {
                row.spans
                    .iter()
                    .map(|s| s.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();

        let columns = self.column_starts(&rows);
        let tables = if columns.len() >= self.config.min_tabular_cells {
            self.build_tables(&rows, &columns)
        } else {
            Vec::new()
        };

        (tables, text_lines)
    }

    /// Group spans into rows by Y position, top of page first.
    fn group_rows(&self, mut spans: Vec<TextSpan>) -> Vec<SpanRow> {
        spans.sort_by(|a, b| {
            b.y.partial_cmp(&a.y)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        });

        let mut rows: Vec<SpanRow> = Vec::new();
        let mut current: Vec<TextSpan> = Vec::new();
        let mut current_y = f32::INFINITY;

        for span in spans {
            if current.is_empty() || (current_y - span.y).abs() <= self.config.row_tolerance {
                current_y = if current.is_empty() { span.y } else { current_y };
                current.push(span);
            } else {
                current.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
                rows.push(SpanRow { spans: current });
                current_y = span.y;
                current = vec![span];
            }
        }
        if !current.is_empty() {
            current.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
            rows.push(SpanRow { spans: current });
        }

        rows
    }

    /// Cluster span X starts into column positions.
    fn column_starts(&self, rows: &[SpanRow]) -> Vec<f32> {
        let mut xs: Vec<f32> = rows
            .iter()
            .flat_map(|row| row.spans.iter().map(|s| s.x))
            .collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mut columns = Vec::new();
        let mut cluster_start = f32::NAN;
        let mut cluster_hits = 0;

        for x in xs {
            if cluster_hits == 0 || x - cluster_start > self.config.column_tolerance {
                if cluster_hits >= self.config.min_column_hits {
                    columns.push(cluster_start);
                }
                cluster_start = x;
                cluster_hits = 1;
            } else {
                cluster_hits += 1;
            }
        }
        if cluster_hits >= self.config.min_column_hits {
            columns.push(cluster_start);
        }

        columns
    }

    /// Column index for a span, and whether its start actually aligns.
    fn assign_column(&self, columns: &[f32], x: f32) -> (usize, bool) {
        let mut index = 0;
        for (i, &start) in columns.iter().enumerate() {
            if start <= x + self.config.column_tolerance {
                index = i;
            } else {
                break;
            }
        }
        let aligned = (x - columns[index]).abs() <= self.config.column_tolerance;
        (index, aligned)
    }

    /// Walk rows top to bottom, collecting consecutive tabular rows into
    /// table regions and folding wrapped lines into the cell above.
    fn build_tables(&self, rows: &[SpanRow], columns: &[f32]) -> Vec<ExtractedTable> {
        let mut tables = Vec::new();
        let mut region: Vec<ExtractedRow> = Vec::new();

        for row in rows {
            let mut cells: ExtractedRow = vec![None; columns.len()];
            let mut aligned_count = 0;

            for span in &row.spans {
                let (index, aligned) = self.assign_column(columns, span.x);
                if aligned {
                    aligned_count += 1;
                }
                match &mut cells[index] {
                    Some(text) => {
                        text.push(' ');
                        text.push_str(&span.text);
                    }
                    cell => *cell = Some(span.text.clone()),
                }
            }

            if aligned_count >= self.config.min_tabular_cells {
                region.push(cells);
            } else if !region.is_empty() && aligned_count > 0 {
                // Wrapped cell line: fold into the row above.
                let last = region.last_mut().unwrap();
                for (index, cell) in cells.into_iter().enumerate() {
                    let Some(text) = cell else { continue };
                    match &mut last[index] {
                        Some(existing) => {
                            existing.push('\n');
                            existing.push_str(&text);
                        }
                        slot => *slot = Some(text),
                    }
                }
            } else {
                self.close_region(&mut region, &mut tables);
            }
        }
        self.close_region(&mut region, &mut tables);

        tables
    }

    fn close_region(&self, region: &mut Vec<ExtractedRow>, tables: &mut Vec<ExtractedTable>) {
        if region.len() >= self.config.min_table_rows {
            tables.push(ExtractedTable {
                rows: std::mem::take(region),
            });
        } else {
            region.clear();
        }
    }
}
