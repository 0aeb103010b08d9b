//! Page sessions
//!
//! A session owns the dataset of one dashboard page for the lifetime of a
//! page view. It is the single writer (`reload` takes `&mut self` and swaps
//! the whole dataset) and hands out read-only views to filters and
//! aggregations.

use crate::dataset::Dataset;
use crate::filter::FilterCriteria;
use crate::loader::{load_text, DataFiles, Source};
use crate::parser::{parse_csv, RowLimit, PAGE_ROW_CAP};
use crate::sample;
use serde::Serialize;

/// Dashboard page backed by one export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Customers,
    Products,
    Sales,
}

impl Page {
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Customers => "customers",
            Page::Products => "products",
            Page::Sales => "sales",
        }
    }

    pub fn resource<'a>(&self, files: &'a DataFiles) -> &'a str {
        match self {
            Page::Customers => &files.customers,
            Page::Products => &files.products,
            Page::Sales => &files.sales,
        }
    }

    /// Customer and product exports are capped; the sales forecast is not
    pub fn row_limit(&self) -> RowLimit {
        match self {
            Page::Customers | Page::Products => RowLimit::Capped(PAGE_ROW_CAP),
            Page::Sales => RowLimit::Unbounded,
        }
    }

    pub fn sample(&self) -> Dataset {
        match self {
            Page::Customers => sample::customer_sample(),
            Page::Products => sample::product_sample(),
            Page::Sales => sample::sales_sample(),
        }
    }
}

/// Where the current dataset came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    Loaded,
    Sample,
}

/// Dataset state of one page view
#[derive(Debug, Clone)]
pub struct PageSession {
    page: Page,
    limit: RowLimit,
    dataset: Dataset,
    origin: DataOrigin,
    categories: Option<Dataset>,
}

impl PageSession {
    /// Load the page's export, falling back to sample data on failure
    pub fn load(page: Page, source: &dyn Source, files: &DataFiles) -> Self {
        Self::load_with_limit(page, source, files, page.row_limit())
    }

    /// Load with an explicit row budget instead of the page's display cap
    pub fn load_with_limit(
        page: Page,
        source: &dyn Source,
        files: &DataFiles,
        limit: RowLimit,
    ) -> Self {
        let mut session = PageSession {
            page,
            limit,
            dataset: Dataset::default(),
            origin: DataOrigin::Sample,
            categories: None,
        };
        session.reload(source, files);
        session
    }

    /// Build a session around an already parsed dataset
    pub fn from_dataset(page: Page, dataset: Dataset, origin: DataOrigin) -> Self {
        PageSession {
            page,
            limit: page.row_limit(),
            dataset,
            origin,
            categories: None,
        }
    }

    /// Replace the page state wholesale with a fresh load
    pub fn reload(&mut self, source: &dyn Source, files: &DataFiles) {
        let resource = self.page.resource(files);
        let (dataset, origin) = match load_text(source, resource) {
            Some(text) => (parse_csv(&text, self.limit), DataOrigin::Loaded),
            None => {
                tracing::info!(page = self.page.as_str(), "using sample data");
                (self.page.sample(), DataOrigin::Sample)
            }
        };

        // Category ranking only accompanies real product data
        let categories = match (self.page, origin) {
            (Page::Products, DataOrigin::Loaded) => load_text(source, &files.categories)
                .map(|text| parse_csv(&text, RowLimit::Unbounded)),
            _ => None,
        };

        tracing::debug!(
            page = self.page.as_str(),
            rows = dataset.len(),
            "page dataset ready"
        );
        self.dataset = dataset;
        self.origin = origin;
        self.categories = categories;
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn origin(&self) -> DataOrigin {
        self.origin
    }

    /// Category analysis rows; only present on a product page with real data
    pub fn categories(&self) -> Option<&Dataset> {
        self.categories.as_ref()
    }

    pub fn filtered(&self, criteria: &FilterCriteria) -> Dataset {
        criteria.apply(&self.dataset)
    }
}
