//! Rows and datasets
//!
//! Global invariants enforced:
//! - Row order is file order
//! - A field is either absent or holds the raw trimmed string from the file
//! - Numeric fields are parsed on demand, never stored
//! - Datasets are replaced wholesale, never edited in place

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Bucket used when a grouping field is missing or empty
pub const UNKNOWN: &str = "Unknown";

/// Outcome of reading a field as a number
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric<'a> {
    /// Column not present in this row
    Absent,
    /// Column present but not a finite number
    Unparseable(&'a str),
    Value(f64),
}

impl Numeric<'_> {
    pub fn value(&self) -> Option<f64> {
        match self {
            Numeric::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// Collapse absent and unparseable fields to zero
    pub fn or_zero(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }
}

/// One parsed CSV data line, keyed by header
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from literal pairs
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut row = Row::new();
        for (column, value) in pairs {
            row.insert(column, value);
        }
        row
    }

    /// Set a field, keeping the position of an existing column
    pub fn insert(&mut self, column: &str, value: &str) {
        match self.fields.iter_mut().find(|(c, _)| c == column) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.fields.push((column.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Field value, or [`UNKNOWN`] when the field is absent or empty
    pub fn label_or_unknown(&self, column: &str) -> &str {
        match self.get(column) {
            Some(v) if !v.is_empty() => v,
            _ => UNKNOWN,
        }
    }

    pub fn numeric(&self, column: &str) -> Numeric<'_> {
        match self.get(column) {
            None => Numeric::Absent,
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => Numeric::Value(v),
                _ => Numeric::Unparseable(raw),
            },
        }
    }

    /// Leading integer of a field (`"1.0"` reads as 1), if any
    pub fn integer(&self, column: &str) -> Option<i64> {
        let raw = self.get(column)?.trim();
        let (sign, digits) = match raw.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, raw.strip_prefix('+').unwrap_or(raw)),
        };
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        digits[..end].parse::<i64>().ok().map(|v| sign * v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Ordered rows sharing one header schema
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Build a dataset from literal rows; columns follow the first row
    pub fn from_literal(rows: &[&[(&str, &str)]]) -> Self {
        let columns = rows
            .first()
            .map(|r| r.iter().map(|(c, _)| c.to_string()).collect())
            .unwrap_or_default();
        let rows = rows.iter().map(|pairs| Row::from_pairs(pairs)).collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// New dataset with the rows matching `keep`, order preserved
    pub fn select<F>(&self, mut keep: F) -> Dataset
    where
        F: FnMut(&Row) -> bool,
    {
        Dataset {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> &[Row] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Mean of a numeric column with unparseable values read as zero
    pub fn mean(&self, column: &str) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        self.sum(column) / self.rows.len() as f64
    }

    pub fn sum(&self, column: &str) -> f64 {
        self.rows.iter().map(|r| r.numeric(column).or_zero()).sum()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
