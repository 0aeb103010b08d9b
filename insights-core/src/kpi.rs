//! Headline KPI figures across all three pages

use crate::dataset::{Dataset, Row};
use crate::schema::{customer, product, risk, sales};
use crate::session::{DataOrigin, PageSession};
use serde::Serialize;

/// Where each KPI input came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KpiOrigins {
    pub customers: DataOrigin,
    pub products: DataOrigin,
    pub sales: DataOrigin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub origins: KpiOrigins,
    pub total_customers: usize,
    pub customers_at_risk: usize,
    pub avg_churn_probability: f64,
    pub total_products: usize,
    pub products_at_return_risk: usize,
    pub avg_return_probability: f64,
    pub total_forecast_sales: f64,
    pub avg_daily_sales: f64,
    pub peak_daily_sales: f64,
    pub low_risk_customers: usize,
    pub medium_risk_customers: usize,
    pub high_risk_customers: usize,
}

fn count_label(data: &Dataset, column: &str, label: &str) -> usize {
    data.iter().filter(|row| row.get(column) == Some(label)).count()
}

/// Predicted churn flag, or the high-risk label where the flag is absent or `N/A`
fn predicted_to_churn(row: &Row) -> bool {
    match row.integer(customer::PREDICTED_CHURN) {
        Some(flag) => flag == 1,
        None => row.get(customer::CHURN_RISK_LEVEL) == Some(risk::HIGH),
    }
}

impl KpiSummary {
    pub fn compute(customers: &PageSession, products: &PageSession, forecast: &PageSession) -> Self {
        let origins = KpiOrigins {
            customers: customers.origin(),
            products: products.origin(),
            sales: forecast.origin(),
        };
        let (customers, products, forecast) =
            (customers.dataset(), products.dataset(), forecast.dataset());

        let high_risk_customers = count_label(customers, customer::CHURN_RISK_LEVEL, risk::HIGH);
        let peak_daily_sales = forecast
            .iter()
            .map(|row| row.numeric(sales::PREDICTED_SALES).or_zero())
            .fold(None, |peak: Option<f64>, v| Some(peak.map_or(v, |p| p.max(v))))
            .unwrap_or(0.0);

        KpiSummary {
            origins,
            total_customers: customers.len(),
            customers_at_risk: customers.iter().filter(|row| predicted_to_churn(row)).count(),
            avg_churn_probability: customers.mean(customer::CHURN_PROBABILITY),
            total_products: products.len(),
            products_at_return_risk: products
                .iter()
                .filter(|row| row.integer(product::PREDICTED_RETURN) == Some(1))
                .count(),
            avg_return_probability: products.mean(product::RETURN_PROBABILITY),
            total_forecast_sales: forecast.sum(sales::PREDICTED_SALES),
            avg_daily_sales: forecast.mean(sales::PREDICTED_SALES),
            peak_daily_sales,
            low_risk_customers: count_label(customers, customer::CHURN_RISK_LEVEL, risk::LOW),
            medium_risk_customers: count_label(customers, customer::CHURN_RISK_LEVEL, risk::MEDIUM),
            high_risk_customers,
        }
    }

    /// Share of customers predicted to churn, `0.0..=1.0`
    pub fn churn_rate(&self) -> f64 {
        ratio(self.customers_at_risk, self.total_customers)
    }

    /// Share of products predicted to be returned, `0.0..=1.0`
    pub fn return_rate(&self) -> f64 {
        ratio(self.products_at_return_risk, self.total_products)
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
