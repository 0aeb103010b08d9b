//! Text and JSON rendering of page views
//!
//! Global invariants enforced:
//! - Deterministic output ordering (source order for tables, first-seen or
//!   ranked order for series)
//! - Byte-for-byte identical output for identical views

use crate::aggregates::Aggregation;
use crate::dataset::Row;
use crate::format::{currency, percentage, risk_badge, short_date};
use crate::kpi::KpiSummary;
use crate::schema::{customer, product, sales};
use crate::session::{DataOrigin, Page};
use crate::views::{CustomerView, ProductView, SalesView};
use serde::Serialize;

/// Customer ids are shown by their first 12 characters
const ID_PREFIX: usize = 12;

fn origin_line(output: &mut String, origin: DataOrigin, loaded: usize) {
    match origin {
        DataOrigin::Loaded => output.push_str(&format!("{} rows loaded\n", loaded)),
        DataOrigin::Sample => output.push_str(&format!(
            "{} rows of sample data (export unavailable)\n",
            loaded
        )),
    }
}

fn render_series(output: &mut String, title: &str, series: &Aggregation, value: fn(f64) -> String) {
    output.push_str(&format!("\n{}\n", title));
    if series.is_empty() {
        output.push_str("  (no data)\n");
        return;
    }
    for (label, v) in series.iter() {
        output.push_str(&format!("  {} {:>14}\n", truncate_or_pad(label, 24), value(v)));
    }
}

fn count(v: f64) -> String {
    format!("{}", v as u64)
}

fn field<'a>(row: &'a Row, column: &str) -> &'a str {
    row.get(column).unwrap_or("-")
}

fn money_field(row: &Row, column: &str) -> String {
    row.numeric(column)
        .value()
        .map(currency)
        .unwrap_or_else(|| field(row, column).to_string())
}

fn percent_field(row: &Row, column: &str) -> String {
    row.numeric(column)
        .value()
        .map(percentage)
        .unwrap_or_else(|| field(row, column).to_string())
}

/// Render the customer page as text
pub fn render_customers_text(view: &CustomerView) -> String {
    let mut output = String::new();
    origin_line(&mut output, view.origin, view.loaded_rows);
    output.push_str(&format!("{} rows match the current filter\n", view.matching_rows));

    output.push_str("\nHigh-risk customers\n");
    output.push_str(&format!(
        "{:<16} {:<20} {:>8} {:>12} {:>6} {:>8} {}\n",
        "CUSTOMER", "SEGMENT", "CHURN", "MONETARY", "FREQ", "RECENCY", "RISK"
    ));
    for row in &view.high_risk {
        output.push_str(&format!(
            "{:<16} {:<20} {:>8} {:>12} {:>6} {:>8} {}\n",
            truncate_or_pad(field(row, customer::CUSTOMER_ID), ID_PREFIX + 3),
            truncate_or_pad(row.label_or_unknown(customer::SEGMENT_NAME), 20),
            percent_field(row, customer::CHURN_PROBABILITY),
            money_field(row, customer::MONETARY),
            field(row, customer::FREQUENCY),
            field(row, customer::RECENCY),
            risk_badge(row.label_or_unknown(customer::CHURN_RISK_LEVEL)),
        ));
    }

    render_series(&mut output, "Customers by segment", &view.segments, count);
    render_series(&mut output, "Customers by churn risk", &view.risk_levels, count);
    output
}

/// Render the product page as text
pub fn render_products_text(view: &ProductView) -> String {
    let mut output = String::new();
    origin_line(&mut output, view.origin, view.loaded_rows);
    output.push_str(&format!("{} rows match the current filter\n", view.matching_rows));

    output.push_str("\nHigh-risk products\n");
    output.push_str(&format!(
        "{:<24} {:>12} {:>8} {:>10} {:>10} {}\n",
        "CATEGORY", "PRICE", "RETURN", "FREIGHT", "WEIGHT_G", "RISK"
    ));
    for row in &view.high_risk {
        output.push_str(&format!(
            "{:<24} {:>12} {:>8} {:>10} {:>10} {}\n",
            truncate_or_pad(row.label_or_unknown(product::CATEGORY_NAME), 24),
            money_field(row, product::PRICE),
            percent_field(row, product::RETURN_PROBABILITY),
            money_field(row, product::FREIGHT_VALUE),
            field(row, product::WEIGHT_G),
            risk_badge(row.label_or_unknown(product::RETURN_RISK_LEVEL)),
        ));
    }

    render_series(&mut output, "Products by return risk", &view.risk_levels, count);
    if let Some(ranking) = &view.category_ranking {
        render_series(&mut output, "Top categories by return probability", ranking, |v| {
            format!("{:.2}%", v)
        });
    }
    output
}

/// Render the sales page as text
pub fn render_sales_text(view: &SalesView) -> String {
    let mut output = String::new();
    origin_line(&mut output, view.origin, view.loaded_rows);

    output.push_str("\nForecast\n");
    output.push_str(&format!(
        "{:<14} {:>14} {:>14} {:>14} {:<10} {}\n",
        "DATE", "PREDICTED", "UPPER", "LOWER", "MONTH", "DAY"
    ));
    for row in &view.forecast {
        output.push_str(&format!(
            "{:<14} {:>14} {:>14} {:>14} {:<10} {}\n",
            short_date(field(row, sales::DATE)),
            money_field(row, sales::PREDICTED_SALES),
            money_field(row, sales::UPPER_BOUND),
            money_field(row, sales::LOWER_BOUND),
            field(row, sales::MONTH_NAME),
            field(row, sales::DAY_OF_WEEK),
        ));
    }

    render_series(&mut output, "Sales by month", &view.monthly, currency);
    render_series(&mut output, "Sales by week", &view.weekly, currency);
    render_series(&mut output, "Average sales by weekday", &view.day_of_week, currency);
    output
}

/// Render the KPI summary as text
pub fn render_kpi_text(kpi: &KpiSummary) -> String {
    let lines = [
        ("Total Customers", kpi.total_customers.to_string()),
        ("Customers at Risk", kpi.customers_at_risk.to_string()),
        ("Churn Rate", format!("{:.1}%", kpi.churn_rate() * 100.0)),
        ("Avg Churn Probability", percentage(kpi.avg_churn_probability)),
        ("Total Products", kpi.total_products.to_string()),
        ("Products with Return Risk", kpi.products_at_return_risk.to_string()),
        ("Return Rate", format!("{:.1}%", kpi.return_rate() * 100.0)),
        ("Avg Return Probability", percentage(kpi.avg_return_probability)),
        ("Total Forecasted Sales", currency(kpi.total_forecast_sales)),
        ("Avg Daily Sales", currency(kpi.avg_daily_sales)),
        ("Peak Daily Sales", currency(kpi.peak_daily_sales)),
        ("Low Risk Customers", kpi.low_risk_customers.to_string()),
        ("Medium Risk Customers", kpi.medium_risk_customers.to_string()),
        ("High Risk Customers", kpi.high_risk_customers.to_string()),
    ];

    let mut output = String::new();
    for (page, origin) in [
        (Page::Customers, kpi.origins.customers),
        (Page::Products, kpi.origins.products),
        (Page::Sales, kpi.origins.sales),
    ] {
        if origin == DataOrigin::Sample {
            output.push_str(&format!(
                "{} export unavailable, figures use sample data\n",
                page.as_str()
            ));
        }
    }
    for (name, value) in lines {
        output.push_str(&format!("{:<28} {}\n", name, value));
    }
    output
}

/// Render any view as JSON output
pub fn render_json<T: Serialize>(view: &T) -> String {
    serde_json::to_string_pretty(view).unwrap_or_else(|_| "{}".to_string())
}

/// Truncate or pad string to fixed width
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        format!("{:<width$}", s, width = width)
    }
}
