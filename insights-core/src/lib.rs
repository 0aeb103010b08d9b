//! Retail Insights core library - CSV ingestion, filtering and aggregation for the BI dashboard

// Global invariants enforced in this crate:
// - Data flows one way: loader -> parser -> dataset -> filter -> aggregates -> views
// - A page session is the only owner of its dataset and replaces it wholesale
// - Filters and aggregations never mutate their input
// - Load failures never escape the loader; they end in sample data
// - Unparseable numbers count as zero at the point of use
// - Randomness and clocks are confined to the sales sample

pub mod aggregates;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod format;
pub mod kpi;
pub mod loader;
pub mod parser;
pub mod report;
pub mod sample;
pub mod schema;
pub mod session;
pub mod views;

pub use aggregates::{aggregate, Aggregation, KeyRule, Reduction};
pub use config::ResolvedConfig;
pub use dataset::{Dataset, Numeric, Row};
pub use error::{LoadError, SelectorError};
pub use filter::{Category, CustomerFilter, FilterCriteria, ProductFilter, RiskLevel, Segment, Selection};
pub use kpi::{KpiOrigins, KpiSummary};
pub use loader::{DataFiles, DirSource, MemorySource, Source};
pub use parser::{parse_csv, RowLimit};
pub use report::render_json;
pub use session::{DataOrigin, Page, PageSession};
pub use views::{CustomerView, ProductView, SalesView, ViewOptions};

/// Load every export once, without the page row cap, and compute the KPI summary
pub fn kpi_summary(source: &dyn Source, files: &DataFiles) -> KpiSummary {
    let load = |page| PageSession::load_with_limit(page, source, files, RowLimit::Unbounded);
    let customers = load(Page::Customers);
    let products = load(Page::Products);
    let sales = load(Page::Sales);
    KpiSummary::compute(&customers, &products, &sales)
}
