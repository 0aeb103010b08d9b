//! Fallback sample datasets
//!
//! Substituted whenever an export cannot be loaded. Samples are rebuilt on
//! every failed load and never merged with real data.

use crate::dataset::{Dataset, Row};
use crate::schema::{customer, product, sales};
use chrono::{Duration, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Length of the synthetic sales forecast
pub const SALES_SAMPLE_DAYS: usize = 90;

const SALES_BASE: f64 = 34_000.0;
const SALES_SWING: f64 = 5_000.0;
const SALES_NOISE: f64 = 3_000.0;
const SALES_BAND: f64 = 7_000.0;

pub fn customer_sample() -> Dataset {
    Dataset::from_literal(&[
        &[
            (customer::CUSTOMER_ID, "0000366f3b9a7992"),
            (customer::SEGMENT_NAME, "Recent Buyers"),
            (customer::CHURN_PROBABILITY, "0.706516"),
            (customer::MONETARY, "141.9"),
            (customer::FREQUENCY, "1"),
            (customer::RECENCY, "116"),
            (customer::CHURN_RISK_LEVEL, "High Risk"),
        ],
        &[
            (customer::CUSTOMER_ID, "0000f46a3911fa3c"),
            (customer::SEGMENT_NAME, "Inactive Customers"),
            (customer::CHURN_PROBABILITY, "0.829393"),
            (customer::MONETARY, "86.22"),
            (customer::FREQUENCY, "1"),
            (customer::RECENCY, "542"),
            (customer::CHURN_RISK_LEVEL, "High Risk"),
        ],
    ])
}

pub fn product_sample() -> Dataset {
    Dataset::from_literal(&[
        &[
            (product::CATEGORY_NAME, "electronics"),
            (product::PRICE, "299.99"),
            (product::RETURN_PROBABILITY, "0.45"),
            (product::FREIGHT_VALUE, "15.50"),
            (product::WEIGHT_G, "1200"),
            (product::RETURN_RISK_LEVEL, "High Risk"),
            (product::PREDICTED_RETURN, "1"),
        ],
        &[
            (product::CATEGORY_NAME, "furniture"),
            (product::PRICE, "599.00"),
            (product::RETURN_PROBABILITY, "0.38"),
            (product::FREIGHT_VALUE, "45.00"),
            (product::WEIGHT_G, "8500"),
            (product::RETURN_RISK_LEVEL, "Medium Risk"),
            (product::PREDICTED_RETURN, "0"),
        ],
    ])
}

/// Synthetic 90-day forecast starting today, seeded from the wall clock
pub fn sales_sample() -> Dataset {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    sales_sample_from(Local::now().date_naive(), seed)
}

/// Synthetic forecast for a fixed start date and seed
///
/// Each day is `34000 + sin(i/10)*5000 + noise` with noise in `[0, 3000)`,
/// bracketed by bounds 7000 above and below.
pub fn sales_sample_from(start: NaiveDate, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let columns = [
        sales::DATE,
        sales::PREDICTED_SALES,
        sales::UPPER_BOUND,
        sales::LOWER_BOUND,
        sales::MONTH_NAME,
        sales::DAY_OF_WEEK,
        sales::WEEK_NUMBER,
    ];

    let rows = (0..SALES_SAMPLE_DAYS)
        .map(|i| {
            let date = start + Duration::days(i as i64);
            let base = SALES_BASE
                + (i as f64 / 10.0).sin() * SALES_SWING
                + rng.gen_range(0.0..SALES_NOISE);

            let mut row = Row::new();
            row.insert(sales::DATE, &date.format("%Y-%m-%d").to_string());
            row.insert(sales::PREDICTED_SALES, &format!("{:.2}", base));
            row.insert(sales::UPPER_BOUND, &format!("{:.2}", base + SALES_BAND));
            row.insert(sales::LOWER_BOUND, &format!("{:.2}", base - SALES_BAND));
            row.insert(sales::MONTH_NAME, &date.format("%b").to_string());
            row.insert(sales::DAY_OF_WEEK, &date.format("%A").to_string());
            row.insert(sales::WEEK_NUMBER, &i.div_ceil(7).to_string());
            row
        })
        .collect();

    Dataset::new(columns.iter().map(|c| c.to_string()).collect(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 30).unwrap()
    }

    #[test]
    fn test_customer_and_product_samples_have_two_rows() {
        assert_eq!(customer_sample().len(), 2);
        assert_eq!(product_sample().len(), 2);
        assert_eq!(
            customer_sample().rows()[1].get(customer::SEGMENT_NAME),
            Some("Inactive Customers")
        );
    }

    #[test]
    fn test_sales_sample_has_ninety_days() {
        let data = sales_sample_from(start(), 7);
        assert_eq!(data.len(), SALES_SAMPLE_DAYS);
        assert_eq!(data.rows()[0].get(sales::DATE), Some("2025-01-30"));
        assert_eq!(data.rows()[89].get(sales::DATE), Some("2025-04-29"));
    }

    #[test]
    fn test_sales_sample_within_bounds() {
        for seed in [0, 1, 42, u64::MAX] {
            let data = sales_sample_from(start(), seed);
            for row in &data {
                let predicted = row.numeric(sales::PREDICTED_SALES).or_zero();
                let upper = row.numeric(sales::UPPER_BOUND).or_zero();
                let lower = row.numeric(sales::LOWER_BOUND).or_zero();
                assert!(lower <= predicted && predicted <= upper);
                assert!(predicted >= SALES_BASE - SALES_SWING);
                assert!(predicted < SALES_BASE + SALES_SWING + SALES_NOISE + 0.01);
            }
        }
    }

    #[test]
    fn test_sales_sample_calendar_labels() {
        let data = sales_sample_from(start(), 3);
        let first = &data.rows()[0];
        assert_eq!(first.get(sales::MONTH_NAME), Some("Jan"));
        assert_eq!(first.get(sales::DAY_OF_WEEK), Some("Thursday"));
        assert_eq!(first.get(sales::WEEK_NUMBER), Some("0"));
        assert_eq!(data.rows()[2].get(sales::MONTH_NAME), Some("Feb"));
        assert_eq!(data.rows()[7].get(sales::WEEK_NUMBER), Some("1"));
        assert_eq!(data.rows()[8].get(sales::WEEK_NUMBER), Some("2"));
    }

    #[test]
    fn test_same_seed_same_series() {
        assert_eq!(sales_sample_from(start(), 9), sales_sample_from(start(), 9));
    }
}
