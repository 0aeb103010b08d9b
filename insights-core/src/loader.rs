//! Resource loading
//!
//! A [`Source`] hands back the raw text of a named export. [`load_text`] is
//! the loader boundary: every failure is logged and turned into `None`, which
//! the page session answers with fallback sample data.

use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Opaque byte source for exported CSV files
pub trait Source {
    fn fetch(&self, resource: &str) -> Result<String, LoadError>;
}

/// Reads resources from a directory on disk
#[derive(Debug, Clone)]
pub struct DirSource {
    base: PathBuf,
}

impl DirSource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl Source for DirSource {
    fn fetch(&self, resource: &str) -> Result<String, LoadError> {
        let path = self.base.join(resource);
        let bytes = std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound(path.display().to_string()),
            _ => LoadError::Io {
                resource: path.display().to_string(),
                source: e,
            },
        })?;
        String::from_utf8(bytes).map_err(|_| LoadError::Encoding {
            resource: path.display().to_string(),
        })
    }
}

/// In-memory resources, keyed by name
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resource: &str, text: &str) -> Self {
        self.files.insert(resource.to_string(), text.to_string());
        self
    }
}

impl Source for MemorySource {
    fn fetch(&self, resource: &str) -> Result<String, LoadError> {
        self.files
            .get(resource)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(resource.to_string()))
    }
}

/// File names of the four exports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFiles {
    pub customers: String,
    pub products: String,
    pub categories: String,
    pub sales: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            customers: "Customer_Analysis.csv".to_string(),
            products: "Product_Analysis.csv".to_string(),
            categories: "Category_Analysis.csv".to_string(),
            sales: "Sales_Forecast.csv".to_string(),
        }
    }
}

/// Fetch a resource once; failures are logged and reported as `None`
pub fn load_text(source: &dyn Source, resource: &str) -> Option<String> {
    match source.fetch(resource) {
        Ok(text) => {
            tracing::debug!(resource, bytes = text.len(), "loaded resource");
            Some(text)
        }
        Err(e) => {
            tracing::warn!(resource, error = %e, "could not load resource");
            None
        }
    }
}
