//! Naive CSV parser for the dashboard exports
//!
//! Lines are split on `\n` and fields on `,`. Quoted fields and embedded
//! newlines are not supported; the exports are controlled and never need them.
//!
//! Global invariants enforced:
//! - The first line is the header
//! - Blank lines never produce rows
//! - Row order is file order
//! - Parsing never fails: empty or header-only input yields an empty dataset

use crate::dataset::{Dataset, Row};

/// Row budget applied while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLimit {
    /// Keep at most this many data rows
    Capped(usize),
    Unbounded,
}

/// Cap used by the customer and product pages
pub const PAGE_ROW_CAP: usize = 100;

impl RowLimit {
    fn reached(&self, rows: usize) -> bool {
        match self {
            RowLimit::Capped(cap) => rows >= *cap,
            RowLimit::Unbounded => false,
        }
    }
}

/// Split one line into trimmed fields
fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(str::trim)
}

/// Parse CSV text into a dataset
///
/// Values are zipped positionally against the header: surplus values are
/// dropped, and headers without a value are absent from the row.
pub fn parse_csv(text: &str, limit: RowLimit) -> Dataset {
    let mut lines = text.split('\n');

    let columns: Vec<String> = match lines.next() {
        Some(header) if !header.trim().is_empty() => {
            split_fields(header).map(str::to_string).collect()
        }
        _ => return Dataset::default(),
    };

    let mut rows = Vec::new();
    for line in lines {
        if limit.reached(rows.len()) {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let mut row = Row::new();
        for (column, value) in columns.iter().zip(split_fields(line)) {
            row.insert(column, value);
        }
        rows.push(row);
    }

    tracing::debug!(columns = columns.len(), rows = rows.len(), "parsed csv");
    Dataset::new(columns, rows)
}

#[cfg(test)]
#[path = "parser/tests.rs"]
mod tests;
