//! Error taxonomy for element lookups and dataset loading.

use thiserror::Error;

use crate::model::Element;

/// Every failure a lookup or an index build can report.
#[derive(Debug, Error)]
pub enum ElementError {
    /// Wrong argument type or an out-of-domain parameter value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A well-typed key with no matching record.
    #[error("{0}")]
    NotFound(String),

    /// A mass query that resolved to more than one record.
    #[error("{} elements share mass {mass:.1}: {}", .matches.len(), symbols(.matches))]
    AmbiguousMatch { mass: f64, matches: Vec<Element> },

    /// Two records claim the same unique key while building an index.
    #[error("duplicate {field} in element table: {value}")]
    Duplicate { field: &'static str, value: String },

    /// The raw dataset is structurally inconsistent.
    #[error("inconsistent dataset: {0}")]
    Dataset(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ElementError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ElementError::NotFound(_))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ElementError::InvalidArgument(_))
    }
}

fn symbols(matches: &[Element]) -> String {
    matches
        .iter()
        .map(|e| e.symbol.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ElementError>;
