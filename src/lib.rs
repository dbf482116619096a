//! Course-Search-RS: a course catalog search API backed by Elasticsearch
//!
//! Composes compound boolean queries from free-text and structured filter
//! criteria, executes them against an external document index, and serves
//! ranked, paginated results plus prefix-based autocomplete suggestions.

pub mod config;
pub mod documents;
pub mod index;
pub mod ingest;
pub mod query;
pub mod search;
pub mod web;

pub use config::Settings;
pub use documents::CourseDocument;
pub use query::{SearchCriteria, SortMode};
pub use search::{SearchExecutor, SearchPage};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default page size for search requests
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default limit for autocomplete suggestions
pub const DEFAULT_SUGGEST_LIMIT: u32 = 10;
