//! Search execution and result adaptation

use std::collections::HashSet;
use tracing::debug;

use super::SearchError;
use crate::documents::CourseDocument;
use crate::index::{dsl, IndexClient, IndexError};
use crate::query::{self, SearchCriteria};

/// One page of search results plus the total match count across all pages.
#[derive(Debug, Clone)]
pub struct SearchPage {
    /// Matching documents, in the order returned by the index
    pub courses: Vec<CourseDocument>,
    /// Total number of matching documents, not just this page
    pub total: u64,
}

/// Executes composed queries against the index service and adapts raw hits
/// into typed results. Stateless: every call is one independent round trip.
pub struct SearchExecutor {
    client: IndexClient,
}

impl SearchExecutor {
    /// Create a new search executor
    pub fn new(client: IndexClient) -> Self {
        Self { client }
    }

    /// Execute a search for the given criteria.
    ///
    /// Exactly one query runs against the index per call; failures surface
    /// to the caller and are never replaced with an empty page.
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<SearchPage, SearchError> {
        let composed = query::compose(criteria)?;
        let body = dsl::search_body(&composed);

        let hits = self.client.search(body).await?;

        let courses = hits
            .sources
            .into_iter()
            .map(serde_json::from_value::<CourseDocument>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| IndexError::InvalidResponse(format!("malformed hit: {}", e)))?;

        debug!(
            "Search returned {} of {} matching courses",
            courses.len(),
            hits.total
        );

        Ok(SearchPage {
            courses,
            total: hits.total,
        })
    }

    /// Produce autocomplete candidates for a title prefix.
    ///
    /// Titles are deduplicated by exact string equality while preserving the
    /// index's return order, so the result may be shorter than `limit`.
    pub async fn suggest(&self, prefix: &str, limit: u32) -> Result<Vec<String>, SearchError> {
        let composed = query::suggest_query(prefix, limit)?;
        let body = dsl::suggest_body(&composed);

        let hits = self.client.search(body).await?;

        let mut seen = HashSet::new();
        let mut titles = Vec::new();
        for source in &hits.sources {
            if let Some(title) = source.get("title").and_then(|t| t.as_str()) {
                if seen.insert(title.to_string()) {
                    titles.push(title.to_string());
                }
            }
        }

        debug!(
            "Suggest '{}' returned {} distinct titles",
            prefix,
            titles.len()
        );

        Ok(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ElasticsearchSettings;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn executor_for(server: &MockServer) -> SearchExecutor {
        let client = IndexClient::new(&ElasticsearchSettings {
            url: server.uri(),
            index: "courses".to_string(),
            request_timeout: 2.0,
        })
        .unwrap();
        SearchExecutor::new(client)
    }

    fn hit(id: &str, title: &str) -> serde_json::Value {
        json!({
            "_id": id,
            "_source": {
                "id": id,
                "title": title,
                "description": "desc",
                "titleSuggest": title,
                "category": "Art",
                "type": "COURSE",
                "minAge": 6,
                "maxAge": 10,
                "price": 20.0,
                "nextSessionDate": "2026-09-01T10:00:00Z"
            }
        })
    }

    #[tokio::test]
    async fn test_search_returns_typed_page_with_total() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/courses/_search"))
            .and(body_string_contains("multi_match"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hits": {
                    "total": { "value": 12, "relation": "eq" },
                    "hits": [hit("c1", "Music Basics"), hit("c2", "Music Theory")]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let criteria = SearchCriteria::new().with_text("music").with_page(0, 5);
        let page = executor_for(&server).search(&criteria).await.unwrap();

        assert_eq!(page.total, 12);
        assert_eq!(page.courses.len(), 2);
        assert!(page.courses.len() <= 5);
        assert_eq!(page.courses[0].title, "Music Basics");
        assert_eq!(page.courses[1].title, "Music Theory");
    }

    #[tokio::test]
    async fn test_invalid_criteria_rejected_before_index_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/courses/_search"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let criteria = SearchCriteria::new().with_page(0, 0);
        let err = executor_for(&server).search(&criteria).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidCriteria(_)));
    }

    #[tokio::test]
    async fn test_index_failure_surfaces_instead_of_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/courses/_search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = executor_for(&server)
            .search(&SearchCriteria::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SearchError::Index(IndexError::Unavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_suggest_dedups_preserving_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/courses/_search"))
            .and(body_string_contains("match_phrase_prefix"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hits": {
                    "total": { "value": 5, "relation": "eq" },
                    "hits": [
                        hit("c1", "Course A"),
                        hit("c2", "Course B"),
                        hit("c3", "Course A"),
                        hit("c4", "Course C"),
                        hit("c5", "Course B")
                    ]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let titles = executor_for(&server).suggest("Course", 5).await.unwrap();
        assert_eq!(titles, vec!["Course A", "Course B", "Course C"]);
        assert!(titles.len() <= 5);
    }

    #[tokio::test]
    async fn test_suggest_rejects_empty_prefix_and_zero_limit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/courses/_search"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let executor = executor_for(&server);
        assert!(matches!(
            executor.suggest("", 5).await.unwrap_err(),
            SearchError::InvalidCriteria(_)
        ));
        assert!(matches!(
            executor.suggest("Course", 0).await.unwrap_err(),
            SearchError::InvalidCriteria(_)
        ));
    }
}
