//! Equality filters driven by dashboard selectors
//!
//! Selector values from the UI (`vip`, `high`, ...) are translated into the
//! labels stored in the exports (`VIP Customers`, `High Risk`, ...). The
//! reserved value `all` disables a selector.
//!
//! Global invariants enforced:
//! - Filtering returns a new dataset; the source is never mutated
//! - Constraints combine with logical AND
//! - Matching is exact and case-sensitive
//! - Filtering is idempotent

use crate::dataset::{Dataset, Row};
use crate::error::SelectorError;
use crate::schema::{customer, product, risk};
use serde::Serialize;
use std::str::FromStr;

/// Sentinel selector value meaning "no constraint"
pub const ALL: &str = "all";

/// A selector vocabulary that maps to a stored label
pub trait Vocabulary {
    fn label(&self) -> &str;
}

/// Either the `all` sentinel or one concrete choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T> FromStr for Selection<T>
where
    T: FromStr<Err = SelectorError>,
{
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::Only)
        }
    }
}

/// Customer segment selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Vip,
    Recent,
    Unhappy,
    Inactive,
}

impl Vocabulary for Segment {
    fn label(&self) -> &str {
        match self {
            Segment::Vip => "VIP Customers",
            Segment::Recent => "Recent Buyers",
            Segment::Unhappy => "Unhappy Customers",
            Segment::Inactive => "Inactive Customers",
        }
    }
}

impl FromStr for Segment {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vip" => Ok(Segment::Vip),
            "recent" => Ok(Segment::Recent),
            "unhappy" => Ok(Segment::Unhappy),
            "inactive" => Ok(Segment::Inactive),
            _ => Err(SelectorError::Unknown {
                selector: "segment",
                value: s.to_string(),
                expected: "all, vip, recent, unhappy, inactive",
            }),
        }
    }
}

/// Risk level selector, shared by churn and return risk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl Vocabulary for RiskLevel {
    fn label(&self) -> &str {
        match self {
            RiskLevel::High => risk::HIGH,
            RiskLevel::Medium => risk::MEDIUM,
            RiskLevel::Low => risk::LOW,
        }
    }
}

impl FromStr for RiskLevel {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(RiskLevel::High),
            "medium" => Ok(RiskLevel::Medium),
            "low" => Ok(RiskLevel::Low),
            _ => Err(SelectorError::Unknown {
                selector: "risk",
                value: s.to_string(),
                expected: "all, high, medium, low",
            }),
        }
    }
}

/// Free-form product category; stored label is the value itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category(String);

impl Vocabulary for Category {
    fn label(&self) -> &str {
        &self.0
    }
}

impl FromStr for Category {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(SelectorError::Empty {
                selector: "category",
            });
        }
        Ok(Category(s.to_string()))
    }
}

/// One equality constraint on a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constraint {
    pub column: String,
    pub expected: String,
}

impl Constraint {
    fn matches(&self, row: &Row) -> bool {
        row.get(&self.column) == Some(self.expected.as_str())
    }
}

/// A set of active equality constraints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    constraints: Vec<Constraint>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constraint for `column` unless the selection is `all`
    pub fn with<T: Vocabulary>(mut self, column: &str, selection: &Selection<T>) -> Self {
        if let Selection::Only(choice) = selection {
            self.constraints.push(Constraint {
                column: column.to_string(),
                expected: choice.label().to_string(),
            });
        }
        self
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// True when no constraint is active
    pub fn is_pass_through(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.constraints.iter().all(|c| c.matches(row))
    }

    /// Rows satisfying every active constraint, in source order
    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        let filtered = dataset.select(|row| self.matches(row));
        tracing::debug!(
            constraints = self.constraints.len(),
            before = dataset.len(),
            after = filtered.len(),
            "applied filter"
        );
        filtered
    }
}

/// Selectors available on the customer page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    pub segment: Selection<Segment>,
    pub risk: Selection<RiskLevel>,
}

impl CustomerFilter {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new()
            .with(customer::SEGMENT_NAME, &self.segment)
            .with(customer::CHURN_RISK_LEVEL, &self.risk)
    }
}

/// Selectors available on the product page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub risk: Selection<RiskLevel>,
    pub category: Selection<Category>,
}

impl ProductFilter {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new()
            .with(product::RETURN_RISK_LEVEL, &self.risk)
            .with(product::CATEGORY_NAME, &self.category)
    }
}
