//! Query composition for course search
//!
//! Translates caller-supplied [`SearchCriteria`] into a backend-agnostic
//! compound query: two ordered clause groups (relevance and filter), a sort
//! directive and a pagination window. Composition is a pure data
//! transformation with no I/O; rendering to the index's wire format lives in
//! [`crate::index::dsl`].

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::documents::fields;
use crate::search::SearchError;
use crate::DEFAULT_PAGE_SIZE;

/// Result ordering selected by the caller.
///
/// Sort is a total ordering that fully overrides relevance score even when a
/// text clause is present: schedule-first ordering is a deliberate product
/// choice, not an oversight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Ascending by next session date (the default)
    #[default]
    Upcoming,
    /// Ascending by price
    PriceAsc,
    /// Descending by price
    PriceDesc,
}

impl SortMode {
    /// Parse a sort token. Unrecognized tokens fall back to `Upcoming`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "priceAsc" => Self::PriceAsc,
            "priceDesc" => Self::PriceDesc,
            _ => Self::Upcoming,
        }
    }
}

/// Caller-supplied search criteria, built per request and discarded after
/// producing a result page. Every field except pagination is optional;
/// unspecified bounds are unconstrained, not defaulted to extreme values.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    /// Free-text query over title and description
    pub q: Option<String>,
    /// Enable bounded edit-distance tolerance for the text query
    pub fuzzy: bool,
    /// Lower bound on the document's `minAge`
    pub min_age: Option<u32>,
    /// Upper bound on the document's `maxAge`
    pub max_age: Option<u32>,
    /// Exact category match
    pub category: Option<String>,
    /// Exact course type match
    pub course_type: Option<String>,
    /// Lower price bound
    pub min_price: Option<f64>,
    /// Upper price bound
    pub max_price: Option<f64>,
    /// Earliest acceptable next session date
    pub start_date: Option<DateTime<Utc>>,
    /// Result ordering
    pub sort: SortMode,
    /// Zero-based page index
    pub page: u32,
    /// Page size, must be positive
    pub size: u32,
}

impl SearchCriteria {
    /// Create empty criteria with the default page size.
    pub fn new() -> Self {
        Self {
            size: DEFAULT_PAGE_SIZE,
            ..Default::default()
        }
    }

    /// Set the free-text query
    pub fn with_text(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Enable or disable fuzzy matching
    pub fn with_fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    /// Set the category filter
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the sort mode
    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Set the pagination window
    pub fn with_page(mut self, page: u32, size: u32) -> Self {
        self.page = page;
        self.size = size;
        self
    }
}

/// One clause of a compound query.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Analyzed text match across multiple fields; contributes to score
    MultiMatch {
        fields: Vec<&'static str>,
        query: String,
        fuzzy: bool,
    },
    /// Numeric or date range, inclusive bounds; binary pass/fail
    Range {
        field: &'static str,
        gte: Option<Value>,
        lte: Option<Value>,
    },
    /// Exact value match on a keyword field; binary pass/fail
    Term { field: &'static str, value: String },
    /// Token sequence of `field` must begin with `prefix`, in order
    PhrasePrefix { field: &'static str, prefix: String },
}

/// A compound boolean query: relevance clauses affect ranking, filter clauses
/// are binary pass/fail and never affect score. Each group ANDs internally
/// and the groups AND together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundQuery {
    pub relevance: Vec<Clause>,
    pub filter: Vec<Clause>,
}

impl CompoundQuery {
    /// True when both clause groups are empty; renders as match-all.
    pub fn is_match_all(&self) -> bool {
        self.relevance.is_empty() && self.filter.is_empty()
    }
}

/// Zero-based offset/limit window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub from: u64,
    pub size: u32,
}

/// A composed search, ready for handoff to the executor.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedSearch {
    pub query: CompoundQuery,
    pub sort: SortMode,
    pub page: PageWindow,
}

/// A composed autocomplete query: one phrase-prefix clause with the index
/// fan-out capped at `limit`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedSuggest {
    pub clause: Clause,
    pub limit: u32,
}

/// Compose a compound query from search criteria.
///
/// Deterministic and pure: each present optional bound yields exactly one
/// filter clause, a non-blank text query yields exactly one relevance clause,
/// and nothing else is added.
pub fn compose(criteria: &SearchCriteria) -> Result<ComposedSearch, SearchError> {
    if criteria.size == 0 {
        return Err(SearchError::InvalidCriteria(
            "page size must be positive".to_string(),
        ));
    }

    let mut relevance = Vec::new();
    let mut filter = Vec::new();

    if let Some(q) = criteria.q.as_deref() {
        if !q.trim().is_empty() {
            relevance.push(Clause::MultiMatch {
                fields: vec![fields::TITLE, fields::DESCRIPTION],
                query: q.to_string(),
                fuzzy: criteria.fuzzy,
            });
        }
    }

    if let Some(min_age) = criteria.min_age {
        filter.push(Clause::Range {
            field: fields::MIN_AGE,
            gte: Some(json!(min_age)),
            lte: None,
        });
    }
    if let Some(max_age) = criteria.max_age {
        filter.push(Clause::Range {
            field: fields::MAX_AGE,
            gte: None,
            lte: Some(json!(max_age)),
        });
    }
    if let Some(min_price) = criteria.min_price {
        filter.push(Clause::Range {
            field: fields::PRICE,
            gte: Some(json!(min_price)),
            lte: None,
        });
    }
    if let Some(max_price) = criteria.max_price {
        filter.push(Clause::Range {
            field: fields::PRICE,
            gte: None,
            lte: Some(json!(max_price)),
        });
    }
    if let Some(ref category) = criteria.category {
        filter.push(Clause::Term {
            field: fields::CATEGORY,
            value: category.clone(),
        });
    }
    if let Some(ref course_type) = criteria.course_type {
        filter.push(Clause::Term {
            field: fields::TYPE,
            value: course_type.clone(),
        });
    }
    if let Some(start_date) = criteria.start_date {
        filter.push(Clause::Range {
            field: fields::NEXT_SESSION_DATE,
            gte: Some(json!(start_date.to_rfc3339())),
            lte: None,
        });
    }

    Ok(ComposedSearch {
        query: CompoundQuery { relevance, filter },
        sort: criteria.sort,
        page: PageWindow {
            from: criteria.page as u64 * criteria.size as u64,
            size: criteria.size,
        },
    })
}

/// Compose a phrase-prefix suggestion query from a raw prefix.
///
/// No fuzziness is applied: autocomplete intentionally uses exact-prefix
/// semantics for predictability.
pub fn suggest_query(prefix: &str, limit: u32) -> Result<ComposedSuggest, SearchError> {
    if prefix.trim().is_empty() {
        return Err(SearchError::InvalidCriteria(
            "suggestion prefix must not be empty".to_string(),
        ));
    }
    if limit == 0 {
        return Err(SearchError::InvalidCriteria(
            "suggestion limit must be positive".to_string(),
        ));
    }

    Ok(ComposedSuggest {
        clause: Clause::PhrasePrefix {
            field: fields::TITLE_SUGGEST,
            prefix: prefix.to_string(),
        },
        limit,
    })
}
