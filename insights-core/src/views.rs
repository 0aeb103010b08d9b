//! View models handed to the presentation layer
//!
//! Each page view is built from a [`PageSession`] and the page's selectors.
//! Tables, chart series and scatter points are all derived from the filtered
//! dataset; nothing here is stored back into the session.

use crate::aggregates::{aggregate, count_by, rank_rows, Aggregation, KeyRule, Reduction, WEEKDAYS};
use crate::dataset::{Dataset, Row};
use crate::filter::{CustomerFilter, FilterCriteria, ProductFilter};
use crate::schema::{category, customer, product, risk, sales};
use crate::session::{DataOrigin, PageSession};
use serde::{Deserialize, Serialize};

/// Presentation thresholds and table sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewOptions {
    pub high_churn_probability: f64,
    pub top_categories: usize,
    pub customer_rows: usize,
    pub product_rows: usize,
    pub sales_rows: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            high_churn_probability: 0.7,
            top_categories: 10,
            customer_rows: 20,
            product_rows: 20,
            sales_rows: 30,
        }
    }
}

/// One scatter/bubble chart point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubblePoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

/// Radius from a size column; zero, missing and unparseable sizes read as 1
fn bubble_radius(row: &Row, column: &str, scale: f64) -> f64 {
    let size = row
        .numeric(column)
        .value()
        .filter(|v| *v > 0.0)
        .unwrap_or(1.0);
    size.sqrt() * scale
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerView {
    pub origin: DataOrigin,
    pub loaded_rows: usize,
    pub matching_rows: usize,
    pub filter: FilterCriteria,
    pub high_risk: Vec<Row>,
    pub segments: Aggregation,
    pub risk_levels: Aggregation,
    pub rfm: Vec<BubblePoint>,
}

impl CustomerView {
    pub fn build(session: &PageSession, filter: &CustomerFilter, options: &ViewOptions) -> Self {
        let criteria = filter.criteria();
        let data = session.filtered(&criteria);

        let at_risk = data.select(|row| {
            row.get(customer::CHURN_RISK_LEVEL) == Some(risk::HIGH)
                || row.numeric(customer::CHURN_PROBABILITY).or_zero()
                    > options.high_churn_probability
        });

        let rfm = data
            .iter()
            .map(|row| BubblePoint {
                label: row.label_or_unknown(customer::CUSTOMER_ID).to_string(),
                x: row.numeric(customer::RECENCY).or_zero(),
                y: row.numeric(customer::MONETARY).or_zero(),
                r: bubble_radius(row, customer::FREQUENCY, 3.0),
            })
            .collect();

        CustomerView {
            origin: session.origin(),
            loaded_rows: session.dataset().len(),
            matching_rows: data.len(),
            high_risk: at_risk.head(options.customer_rows).to_vec(),
            segments: count_by(&data, customer::SEGMENT_NAME),
            risk_levels: count_by(&data, customer::CHURN_RISK_LEVEL),
            rfm,
            filter: criteria,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub origin: DataOrigin,
    pub loaded_rows: usize,
    pub matching_rows: usize,
    pub filter: FilterCriteria,
    pub high_risk: Vec<Row>,
    pub risk_levels: Aggregation,
    pub scatter: Vec<BubblePoint>,
    /// Highest average return probability per category, in percent
    pub category_ranking: Option<Aggregation>,
}

impl ProductView {
    pub fn build(session: &PageSession, filter: &ProductFilter, options: &ViewOptions) -> Self {
        let criteria = filter.criteria();
        let data = session.filtered(&criteria);

        let at_risk = data.select(|row| {
            row.get(product::RETURN_RISK_LEVEL) == Some(risk::HIGH)
                || row.integer(product::PREDICTED_RETURN) == Some(1)
        });

        let scatter = data
            .iter()
            .map(|row| BubblePoint {
                label: row.label_or_unknown(product::CATEGORY_NAME).to_string(),
                x: row.numeric(product::PRICE).or_zero(),
                y: row.numeric(product::RETURN_PROBABILITY).or_zero(),
                r: bubble_radius(row, product::FREIGHT_VALUE, 5.0),
            })
            .collect();

        let category_ranking = session
            .categories()
            .map(|c| category_ranking(c, options.top_categories));

        ProductView {
            origin: session.origin(),
            loaded_rows: session.dataset().len(),
            matching_rows: data.len(),
            high_risk: at_risk.head(options.product_rows).to_vec(),
            risk_levels: count_by(&data, product::RETURN_RISK_LEVEL),
            scatter,
            category_ranking,
            filter: criteria,
        }
    }
}

/// Top `n` categories by average return probability, scaled to percent
pub fn category_ranking(categories: &Dataset, n: usize) -> Aggregation {
    rank_rows(
        categories,
        category::CATEGORY,
        category::AVG_RETURN_PROBABILITY,
        n,
    )
    .scaled(100.0)
}

/// One day of the forecast series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: String,
    pub predicted: f64,
    pub upper: f64,
    pub lower: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesView {
    pub origin: DataOrigin,
    pub loaded_rows: usize,
    pub forecast: Vec<Row>,
    pub daily: Vec<DailyPoint>,
    pub monthly: Aggregation,
    pub weekly: Aggregation,
    pub day_of_week: Aggregation,
}

impl SalesView {
    pub fn build(session: &PageSession, options: &ViewOptions) -> Self {
        let data = session.dataset();

        let daily = data
            .iter()
            .map(|row| DailyPoint {
                date: row.get(sales::DATE).unwrap_or_default().to_string(),
                predicted: row.numeric(sales::PREDICTED_SALES).or_zero(),
                upper: row.numeric(sales::UPPER_BOUND).or_zero(),
                lower: row.numeric(sales::LOWER_BOUND).or_zero(),
            })
            .collect();

        SalesView {
            origin: session.origin(),
            loaded_rows: data.len(),
            forecast: data.head(options.sales_rows).to_vec(),
            daily,
            monthly: monthly_sales(data),
            weekly: weekly_sales(data),
            day_of_week: weekday_sales(data),
        }
    }
}

/// Total predicted sales per `month_name`
pub fn monthly_sales(data: &Dataset) -> Aggregation {
    aggregate(
        data,
        &KeyRule::column(sales::MONTH_NAME),
        &Reduction::sum(sales::PREDICTED_SALES),
    )
}

/// Total predicted sales per `Week <n>`
pub fn weekly_sales(data: &Dataset) -> Aggregation {
    aggregate(
        data,
        &KeyRule::prefixed("Week ", sales::WEEK_NUMBER),
        &Reduction::sum(sales::PREDICTED_SALES),
    )
}

/// Average predicted sales per weekday on a Monday..Sunday axis
pub fn weekday_sales(data: &Dataset) -> Aggregation {
    aggregate(
        data,
        &KeyRule::column(sales::DAY_OF_WEEK),
        &Reduction::average(sales::PREDICTED_SALES),
    )
    .project(&WEEKDAYS)
}
