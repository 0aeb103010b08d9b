//! Configuration file support for Retail Insights
//!
//! Loads project-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.insightsrc.json` in project root
//! 3. `insights.config.json` in project root
//! 4. `"insights"` key in `package.json`
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::loader::DataFiles;
use crate::views::ViewOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default directory holding the exported CSV files
const DEFAULT_DATA_DIR: &str = "PowerBI_Data";

/// Retail Insights configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InsightsConfig {
    /// Directory with the CSV exports, relative to the project root
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Export file names
    #[serde(default)]
    pub files: Option<FilesConfig>,

    /// Churn probability above which a customer is listed as high risk (default: 0.7)
    #[serde(default)]
    pub high_churn_probability: Option<f64>,

    /// Number of categories in the return-probability ranking (default: 10)
    #[serde(default)]
    pub top_categories: Option<usize>,

    /// Table sizes per page
    #[serde(default)]
    pub table_rows: Option<TableRowsConfig>,
}

/// Export file names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesConfig {
    /// Customer export (default: Customer_Analysis.csv)
    pub customers: Option<String>,
    /// Product export (default: Product_Analysis.csv)
    pub products: Option<String>,
    /// Category export (default: Category_Analysis.csv)
    pub categories: Option<String>,
    /// Sales forecast export (default: Sales_Forecast.csv)
    pub sales: Option<String>,
}

/// Table sizes per page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableRowsConfig {
    /// High-risk customer rows (default: 20)
    pub customers: Option<usize>,
    /// High-risk product rows (default: 20)
    pub products: Option<usize>,
    /// Forecast rows (default: 30)
    pub sales: Option<usize>,
}

/// Resolved configuration with defaults filled in
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    /// Directory with the CSV exports (relative paths are resolved by the caller)
    pub data_dir: PathBuf,
    pub files: DataFiles,
    pub views: ViewOptions,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl InsightsConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(p) = self.high_churn_probability {
            if !(0.0..=1.0).contains(&p) {
                anyhow::bail!("high_churn_probability must be within 0.0..=1.0 (got {})", p);
            }
        }

        if let Some(0) = self.top_categories {
            anyhow::bail!("top_categories must be at least 1");
        }

        if let Some(ref rows) = self.table_rows {
            for (name, val) in [
                ("customers", rows.customers),
                ("products", rows.products),
                ("sales", rows.sales),
            ] {
                if let Some(0) = val {
                    anyhow::bail!("table_rows.{} must be at least 1", name);
                }
            }
        }

        if let Some(ref files) = self.files {
            for (name, val) in [
                ("customers", &files.customers),
                ("products", &files.products),
                ("categories", &files.categories),
                ("sales", &files.sales),
            ] {
                if let Some(file) = val {
                    if file.trim().is_empty() {
                        anyhow::bail!("files.{} must not be empty", name);
                    }
                }
            }
        }

        if let Some(ref dir) = self.data_dir {
            if dir.as_os_str().is_empty() {
                anyhow::bail!("data_dir must not be empty");
            }
        }

        Ok(())
    }

    /// Resolve config into the form used by the pipelines
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let defaults = DataFiles::default();
        let files = match &self.files {
            Some(f) => DataFiles {
                customers: f.customers.clone().unwrap_or(defaults.customers),
                products: f.products.clone().unwrap_or(defaults.products),
                categories: f.categories.clone().unwrap_or(defaults.categories),
                sales: f.sales.clone().unwrap_or(defaults.sales),
            },
            None => defaults,
        };

        let base = ViewOptions::default();
        let (customer_rows, product_rows, sales_rows) = match &self.table_rows {
            Some(t) => (
                t.customers.unwrap_or(base.customer_rows),
                t.products.unwrap_or(base.product_rows),
                t.sales.unwrap_or(base.sales_rows),
            ),
            None => (base.customer_rows, base.product_rows, base.sales_rows),
        };

        Ok(ResolvedConfig {
            data_dir: self
                .data_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            files,
            views: ViewOptions {
                high_churn_probability: self
                    .high_churn_probability
                    .unwrap_or(base.high_churn_probability),
                top_categories: self.top_categories.unwrap_or(base.top_categories),
                customer_rows,
                product_rows,
                sales_rows,
            },
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        InsightsConfig::default().resolve()
    }

    /// Data directory anchored at `project_root` when relative
    pub fn data_dir_in(&self, project_root: &Path) -> PathBuf {
        if self.data_dir.is_absolute() {
            self.data_dir.clone()
        } else {
            project_root.join(&self.data_dir)
        }
    }
}

/// Discover and load a config file from the project root
///
/// Search order:
/// 1. `.insightsrc.json`
/// 2. `insights.config.json`
/// 3. `"insights"` key in `package.json`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(project_root: &Path) -> Result<Option<(InsightsConfig, PathBuf)>> {
    let rc_path = project_root.join(".insightsrc.json");
    if rc_path.exists() {
        let config = load_config_file(&rc_path)?;
        return Ok(Some((config, rc_path)));
    }

    let config_path = project_root.join("insights.config.json");
    if config_path.exists() {
        let config = load_config_file(&config_path)?;
        return Ok(Some((config, config_path)));
    }

    let pkg_path = project_root.join("package.json");
    if pkg_path.exists() {
        if let Some(config) = load_from_package_json(&pkg_path)? {
            return Ok(Some((config, pkg_path)));
        }
    }

    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<InsightsConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: InsightsConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load insights config from the "insights" key in package.json
fn load_from_package_json(path: &Path) -> Result<Option<InsightsConfig>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let pkg: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    match pkg.get("insights") {
        Some(value) => {
            let config: InsightsConfig = serde_json::from_value(value.clone())
                .with_context(|| format!("invalid insights config in {}", path.display()))?;
            config
                .validate()
                .with_context(|| format!("invalid insights config in {}", path.display()))?;
            Ok(Some(config))
        }
        None => Ok(None),
    }
}

/// Load and resolve config for a project
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config from the project root.
/// Returns default config if nothing is found.
pub fn load_and_resolve(project_root: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(project_root)? {
            Some((config, path)) => (config, Some(path)),
            None => (InsightsConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    tracing::debug!(config = ?resolved.config_path, "resolved configuration");
    Ok(resolved)
}
