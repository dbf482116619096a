//! The searchable course document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field names as the index knows them. The wire contract with the index
/// schema: these must match the mapping exactly.
pub mod fields {
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const TITLE_SUGGEST: &str = "titleSuggest";
    pub const CATEGORY: &str = "category";
    pub const TYPE: &str = "type";
    pub const MIN_AGE: &str = "minAge";
    pub const MAX_AGE: &str = "maxAge";
    pub const PRICE: &str = "price";
    pub const NEXT_SESSION_DATE: &str = "nextSessionDate";
}

/// A single course in the catalog.
///
/// Created once at ingestion and read-only afterwards. `title_suggest` is
/// always a copy of `title` made at indexing time; it exists so the same
/// attribute can be indexed under a second matching strategy (phrase-prefix)
/// alongside the analyzed `title` field (token match).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDocument {
    /// Opaque unique identifier, assigned at ingestion
    pub id: String,
    /// Course title, analyzed for full-text match
    pub title: String,
    /// Course description, analyzed for full-text match
    pub description: String,
    /// Verbatim copy of `title`, indexed for phrase-prefix suggestions
    #[serde(default)]
    pub title_suggest: String,
    /// Categorical field, exact match
    pub category: String,
    /// Categorical field, exact match
    #[serde(rename = "type")]
    pub course_type: String,
    /// Inclusive lower age bound
    pub min_age: u32,
    /// Inclusive upper age bound
    pub max_age: u32,
    /// Non-negative price
    pub price: f64,
    /// Point in time of the next scheduled session
    pub next_session_date: DateTime<Utc>,
}

impl CourseDocument {
    /// Copy the title into the suggestion field, as done at ingestion time.
    pub fn fill_title_suggest(&mut self) {
        self.title_suggest = self.title.clone();
    }
}
