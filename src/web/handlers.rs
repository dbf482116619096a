//! HTTP request handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::state::AppState;
use crate::documents::CourseDocument;
use crate::index::IndexError;
use crate::query::{SearchCriteria, SortMode};
use crate::search::SearchError;
use crate::{DEFAULT_PAGE_SIZE, DEFAULT_SUGGEST_LIMIT};

/// Query parameters for search
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Free-text query
    pub q: Option<String>,
    /// Lower bound on course minAge
    pub min_age: Option<u32>,
    /// Upper bound on course maxAge
    pub max_age: Option<u32>,
    /// Exact category
    pub category: Option<String>,
    /// Exact course type
    #[serde(rename = "type")]
    pub course_type: Option<String>,
    /// Lower price bound
    pub min_price: Option<f64>,
    /// Upper price bound
    pub max_price: Option<f64>,
    /// Earliest next session date (RFC 3339)
    pub start_date: Option<DateTime<Utc>>,
    /// Sort token: upcoming | priceAsc | priceDesc
    pub sort: Option<String>,
    /// Zero-based page index
    pub page: Option<u32>,
    /// Page size
    pub size: Option<u32>,
    /// Typo-tolerant text matching
    pub fuzzy: Option<bool>,
}

impl SearchParams {
    /// Map raw parameters onto search criteria, applying the documented
    /// defaults (page 0, size 10, sort upcoming, fuzzy off).
    fn into_criteria(self) -> SearchCriteria {
        SearchCriteria {
            q: self.q,
            fuzzy: self.fuzzy.unwrap_or(false),
            min_age: self.min_age,
            max_age: self.max_age,
            category: self.category,
            course_type: self.course_type,
            min_price: self.min_price,
            max_price: self.max_price,
            start_date: self.start_date,
            sort: SortMode::from_token(self.sort.as_deref().unwrap_or("upcoming")),
            page: self.page.unwrap_or(0),
            size: self.size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

/// Search results response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub total: u64,
    pub courses: Vec<CourseDocument>,
}

/// Autocomplete parameters
#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    pub q: String,
    pub limit: Option<u32>,
}

/// Autocomplete response
#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
}

/// Search error mapped onto an HTTP status and JSON body.
pub struct ApiError(SearchError);

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SearchError::InvalidCriteria(_) => StatusCode::BAD_REQUEST,
            SearchError::Index(IndexError::Rejected { .. }) => StatusCode::BAD_GATEWAY,
            SearchError::Index(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Search handler
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let criteria = params.into_criteria();
    let page = state.executor.search(&criteria).await?;

    Ok(Json(SearchResponse {
        total: page.total,
        courses: page.courses,
    }))
}

/// Autocomplete handler
pub async fn suggest(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_SUGGEST_LIMIT);
    let suggestions = state.executor.suggest(&params.q, limit).await?;

    Ok(Json(SuggestResponse { suggestions }))
}

/// Health check handler
///
/// Probes the index with a one-document match-all search. Always answers
/// 200 with an UP or DOWN body, mirroring the status-in-body contract of the
/// original service.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let probe = SearchCriteria::new().with_page(0, 1);
    match state.executor.search(&probe).await {
        Ok(page) => Json(json!({
            "status": "UP",
            "elasticsearch": "connected",
            "totalCourses": page.total,
            "timestamp": Utc::now().to_rfc3339(),
        })),
        Err(e) => Json(json!({
            "status": "DOWN",
            "elasticsearch": "disconnected",
            "error": e.to_string(),
            "timestamp": Utc::now().to_rfc3339(),
        })),
    }
}
