//! Typed errors at the library boundary
//!
//! Loader errors never escape a page load: they are logged and converted into
//! fallback data by the session. Selector errors surface to whoever translates
//! UI input into filter criteria.

use thiserror::Error;

/// Failure to retrieve a resource from a [`Source`](crate::loader::Source)
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("resource {resource} is not valid UTF-8")]
    Encoding { resource: String },

    #[error("failed to read {resource}: {source}")]
    Io {
        resource: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to translate a UI selector value into a filter constraint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("unknown {selector} selector '{value}' (expected one of: {expected})")]
    Unknown {
        selector: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{selector} selector must not be empty")]
    Empty { selector: &'static str },
}
