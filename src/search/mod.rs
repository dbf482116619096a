//! Search execution against the course index

mod executor;

pub use executor::{SearchExecutor, SearchPage};

use thiserror::Error;

use crate::index::IndexError;

/// Failures of the search core. Everything propagates to the caller
/// unchanged; there is no partial-success mode.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Malformed input, rejected before any index call is attempted
    #[error("invalid search criteria: {0}")]
    InvalidCriteria(String),
    /// A failure at the index service boundary, surfaced as-is
    #[error(transparent)]
    Index(#[from] IndexError),
}
