//! Column names of the exported CSV files

pub mod customer {
    pub const CUSTOMER_ID: &str = "customer_unique_id";
    pub const SEGMENT_NAME: &str = "segment_name";
    pub const CHURN_PROBABILITY: &str = "churn_probability";
    pub const CHURN_RISK_LEVEL: &str = "churn_risk_level";
    pub const MONETARY: &str = "monetary";
    pub const FREQUENCY: &str = "frequency";
    pub const RECENCY: &str = "recency";
    pub const PREDICTED_CHURN: &str = "predicted_churn";
}

pub mod product {
    pub const CATEGORY_NAME: &str = "product_category_name";
    pub const PRICE: &str = "price";
    pub const RETURN_PROBABILITY: &str = "return_probability";
    pub const RETURN_RISK_LEVEL: &str = "return_risk_level";
    pub const FREIGHT_VALUE: &str = "freight_value";
    pub const WEIGHT_G: &str = "product_weight_g";
    pub const PREDICTED_RETURN: &str = "predicted_return";
}

pub mod category {
    pub const CATEGORY: &str = "Category";
    pub const AVG_RETURN_PROBABILITY: &str = "Avg_Return_Probability";
}

pub mod sales {
    pub const DATE: &str = "date";
    pub const PREDICTED_SALES: &str = "predicted_sales";
    pub const UPPER_BOUND: &str = "upper_bound";
    pub const LOWER_BOUND: &str = "lower_bound";
    pub const MONTH_NAME: &str = "month_name";
    pub const DAY_OF_WEEK: &str = "day_of_week";
    pub const WEEK_NUMBER: &str = "week_number";
}

/// Risk labels written by the data-preparation step
pub mod risk {
    pub const HIGH: &str = "High Risk";
    pub const MEDIUM: &str = "Medium Risk";
    pub const LOW: &str = "Low Risk";
}
