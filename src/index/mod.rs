//! Adapter for the external document index service (Elasticsearch)
//!
//! The index is an opaque collaborator: this module renders composed queries
//! into its wire format and performs the HTTP round trips. Failures surface
//! as-is; there is no retry and no silent empty-page fallback.

mod client;
pub mod dsl;
pub mod schema;

pub use client::{IndexClient, RawHits};

use thiserror::Error;

/// Failures at the index service boundary.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index service could not be reached or answered with a server error
    #[error("index service unavailable: {reason}")]
    Unavailable { reason: String },
    /// The index service rejected the query as malformed (a defect for
    /// well-formed criteria)
    #[error("index rejected the query (status {status}): {reason}")]
    Rejected { status: u16, reason: String },
    /// The index answered with a body this adapter could not interpret
    #[error("unexpected index response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for IndexError {
    fn from(err: reqwest::Error) -> Self {
        IndexError::Unavailable {
            reason: err.to_string(),
        }
    }
}
