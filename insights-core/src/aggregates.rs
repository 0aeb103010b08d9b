//! Group-by aggregation for chart series
//!
//! Computes derived series from a dataset without modifying it.
//!
//! Global invariants enforced:
//! - Aggregates are strictly derived (never stored, always computed)
//! - Key order is first-seen order in the source dataset
//! - Missing or empty keys bucket under `"Unknown"`
//! - Unparseable numeric values count as zero
//! - Re-sorting by value is stable

use crate::dataset::{Dataset, Row};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Fixed display axis for day-of-week charts
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// How a grouping key is derived from a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyRule {
    /// The column value itself
    Column(String),
    /// The column value (or `Unknown`) behind a fixed prefix, e.g. `Week 3`
    Prefixed { prefix: String, column: String },
}

impl KeyRule {
    pub fn column(column: &str) -> Self {
        KeyRule::Column(column.to_string())
    }

    pub fn prefixed(prefix: &str, column: &str) -> Self {
        KeyRule::Prefixed {
            prefix: prefix.to_string(),
            column: column.to_string(),
        }
    }

    fn key(&self, row: &Row) -> String {
        match self {
            KeyRule::Column(column) => row.label_or_unknown(column).to_string(),
            KeyRule::Prefixed { prefix, column } => {
                format!("{}{}", prefix, row.label_or_unknown(column))
            }
        }
    }
}

/// How rows sharing a key are reduced to one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reduction {
    Sum(String),
    /// Sum divided by count, computed once at the end
    Average(String),
    Count,
}

impl Reduction {
    pub fn sum(column: &str) -> Self {
        Reduction::Sum(column.to_string())
    }

    pub fn average(column: &str) -> Self {
        Reduction::Average(column.to_string())
    }

    fn contribution(&self, row: &Row) -> f64 {
        match self {
            Reduction::Sum(column) | Reduction::Average(column) => {
                row.numeric(column).or_zero()
            }
            Reduction::Count => 1.0,
        }
    }
}

/// Ordered label to value series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    entries: Vec<(String, f64)>,
}

impl Aggregation {
    pub fn from_entries(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top `n` entries by value, descending; ties keep their current order
    pub fn top(&self, n: usize) -> Aggregation {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        entries.truncate(n);
        Aggregation { entries }
    }

    /// Re-project onto a fixed axis; keys absent from the series read as zero
    pub fn project(&self, axis: &[&str]) -> Aggregation {
        Aggregation {
            entries: axis
                .iter()
                .map(|k| (k.to_string(), self.get(k).unwrap_or(0.0)))
                .collect(),
        }
    }

    /// Multiply every value by `factor`
    pub fn scaled(&self, factor: f64) -> Aggregation {
        Aggregation {
            entries: self
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v * factor))
                .collect(),
        }
    }
}

impl Serialize for Aggregation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Group `dataset` by `key` and reduce each group
pub fn aggregate(dataset: &Dataset, key: &KeyRule, reduction: &Reduction) -> Aggregation {
    let mut index: HashMap<String, usize> = HashMap::new();
    // (key, running sum, running count)
    let mut groups: Vec<(String, f64, usize)> = Vec::new();

    for row in dataset {
        let k = key.key(row);
        let slot = match index.get(&k) {
            Some(&i) => i,
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, 0.0, 0));
                groups.len() - 1
            }
        };
        let group = &mut groups[slot];
        group.1 += reduction.contribution(row);
        group.2 += 1;
    }

    let entries = groups
        .into_iter()
        .map(|(k, sum, count)| {
            let value = match reduction {
                Reduction::Average(_) => sum / count as f64,
                _ => sum,
            };
            (k, value)
        })
        .collect();

    Aggregation { entries }
}

/// Count rows per value of `column`
pub fn count_by(dataset: &Dataset, column: &str) -> Aggregation {
    aggregate(dataset, &KeyRule::column(column), &Reduction::Count)
}

/// Rank rows by a numeric column, descending, keeping the first `n`
///
/// Labels come from `label_column` (or `Unknown`); rows are not merged, so a
/// label can appear more than once if the source repeats it.
pub fn rank_rows(dataset: &Dataset, label_column: &str, value_column: &str, n: usize) -> Aggregation {
    let entries = dataset
        .iter()
        .map(|row| {
            (
                row.label_or_unknown(label_column).to_string(),
                row.numeric(value_column).or_zero(),
            )
        })
        .collect();
    Aggregation { entries }.top(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales(rows: &[(&str, &str)]) -> Dataset {
        Dataset::new(
            vec!["month_name".to_string(), "predicted_sales".to_string()],
            rows.iter()
                .map(|(m, s)| Row::from_pairs(&[("month_name", *m), ("predicted_sales", *s)]))
                .collect(),
        )
    }

    #[test]
    fn test_sum_by_month() {
        let data = sales(&[("Jan", "100"), ("Jan", "200"), ("Jan", "300")]);
        let agg = aggregate(
            &data,
            &KeyRule::column("month_name"),
            &Reduction::sum("predicted_sales"),
        );
        assert_eq!(agg.len(), 1);
        assert_eq!(agg.get("Jan"), Some(600.0));
    }

    #[test]
    fn test_average_by_month() {
        let data = sales(&[("Jan", "100"), ("Jan", "200"), ("Jan", "300")]);
        let agg = aggregate(
            &data,
            &KeyRule::column("month_name"),
            &Reduction::average("predicted_sales"),
        );
        assert_eq!(agg.get("Jan"), Some(200.0));
    }

    #[test]
    fn test_average_matches_sum_over_count() {
        let values = ["0.1", "0.2", "0.7", "1.3"];
        let rows: Vec<_> = values.iter().map(|v| ("Feb", *v)).collect();
        let agg = aggregate(
            &sales(&rows),
            &KeyRule::column("month_name"),
            &Reduction::average("predicted_sales"),
        );
        let expected = (0.1 + 0.2 + 0.7 + 1.3) / 4.0;
        assert_eq!(agg.get("Feb"), Some(expected));
    }

    #[test]
    fn test_keys_keep_first_seen_order() {
        let data = sales(&[("Mar", "1"), ("Jan", "1"), ("Mar", "1"), ("Feb", "1")]);
        let agg = aggregate(
            &data,
            &KeyRule::column("month_name"),
            &Reduction::sum("predicted_sales"),
        );
        assert_eq!(agg.keys().collect::<Vec<_>>(), vec!["Mar", "Jan", "Feb"]);
    }

    #[test]
    fn test_missing_key_buckets_under_unknown() {
        let data = Dataset::from_literal(&[
            &[("day_of_week", "Monday"), ("predicted_sales", "10")],
            &[("predicted_sales", "30")],
            &[("day_of_week", ""), ("predicted_sales", "50")],
        ]);
        let agg = aggregate(
            &data,
            &KeyRule::column("day_of_week"),
            &Reduction::average("predicted_sales"),
        );
        assert_eq!(agg.get("Monday"), Some(10.0));
        assert_eq!(agg.get("Unknown"), Some(40.0));
    }

    #[test]
    fn test_prefixed_week_keys() {
        let data = Dataset::from_literal(&[
            &[("week_number", "1"), ("predicted_sales", "10")],
            &[("week_number", "1"), ("predicted_sales", "5")],
            &[("predicted_sales", "7")],
        ]);
        let agg = aggregate(
            &data,
            &KeyRule::prefixed("Week ", "week_number"),
            &Reduction::sum("predicted_sales"),
        );
        assert_eq!(agg.get("Week 1"), Some(15.0));
        assert_eq!(agg.get("Week Unknown"), Some(7.0));
    }

    #[test]
    fn test_unparseable_values_count_as_zero() {
        let data = sales(&[("Jan", "100"), ("Jan", "n/a"), ("Jan", "")]);
        let sum = aggregate(
            &data,
            &KeyRule::column("month_name"),
            &Reduction::sum("predicted_sales"),
        );
        assert_eq!(sum.get("Jan"), Some(100.0));
    }

    #[test]
    fn test_count_by() {
        let data = Dataset::from_literal(&[
            &[("segment_name", "VIP Customers")],
            &[("segment_name", "Recent Buyers")],
            &[("segment_name", "VIP Customers")],
        ]);
        let counts = count_by(&data, "segment_name");
        assert_eq!(counts.get("VIP Customers"), Some(2.0));
        assert_eq!(counts.get("Recent Buyers"), Some(1.0));
    }

    #[test]
    fn test_empty_dataset_yields_empty_series() {
        let agg = count_by(&Dataset::default(), "anything");
        assert!(agg.is_empty());
    }

    #[test]
    fn test_top_is_stable_for_ties() {
        let agg = Aggregation::from_entries(vec![
            ("a".to_string(), 1.0),
            ("b".to_string(), 3.0),
            ("c".to_string(), 1.0),
            ("d".to_string(), 3.0),
        ]);
        let top = agg.top(3);
        assert_eq!(top.keys().collect::<Vec<_>>(), vec!["b", "d", "a"]);
    }

    #[test]
    fn test_project_fills_missing_axis_keys() {
        let agg = Aggregation::from_entries(vec![
            ("Sunday".to_string(), 5.0),
            ("Monday".to_string(), 2.0),
        ]);
        let projected = agg.project(&WEEKDAYS);
        assert_eq!(projected.len(), 7);
        assert_eq!(projected.keys().next(), Some("Monday"));
        assert_eq!(projected.get("Monday"), Some(2.0));
        assert_eq!(projected.get("Wednesday"), Some(0.0));
        assert_eq!(projected.get("Sunday"), Some(5.0));
    }

    #[test]
    fn test_rank_rows_takes_highest_values() {
        let rows: Vec<Row> = (0..12)
            .map(|i| {
                let name = format!("cat{}", i);
                let value = format!("0.{:02}", i * 7);
                Row::from_pairs(&[
                    ("Category", name.as_str()),
                    ("Avg_Return_Probability", value.as_str()),
                ])
            })
            .collect();
        let data = Dataset::new(
            vec!["Category".to_string(), "Avg_Return_Probability".to_string()],
            rows,
        );
        let ranked = rank_rows(&data, "Category", "Avg_Return_Probability", 10);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked.keys().next(), Some("cat11"));
        assert!(ranked.keys().all(|k| k != "cat0" && k != "cat1"));
        let values: Vec<f64> = ranked.values().collect();
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_aggregation_serializes_in_order() {
        let agg = Aggregation::from_entries(vec![("b".to_string(), 1.0), ("a".to_string(), 2.0)]);
        assert_eq!(serde_json::to_string(&agg).unwrap(), r#"{"b":1.0,"a":2.0}"#);
    }
}
