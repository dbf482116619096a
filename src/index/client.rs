//! HTTP client for the Elasticsearch index service

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{schema, IndexError};
use crate::config::ElasticsearchSettings;
use crate::documents::CourseDocument;

/// Raw hits of one `_search` round trip: `_source` documents in index order
/// plus the total match count across all pages.
#[derive(Debug, Clone)]
pub struct RawHits {
    pub sources: Vec<Value>,
    pub total: u64,
}

/// Client for a single index on a single Elasticsearch node.
///
/// Every call is one independent round trip; the client holds no mutable
/// state and can be shared freely across concurrent requests.
#[derive(Clone)]
pub struct IndexClient {
    client: Client,
    base_url: String,
    index: String,
}

impl IndexClient {
    /// Create a client from Elasticsearch settings.
    pub fn new(settings: &ElasticsearchSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs_f64(settings.request_timeout))
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.url.trim_end_matches('/').to_string(),
            index: settings.index.clone(),
        })
    }

    /// Name of the index this client targets.
    pub fn index(&self) -> &str {
        &self.index
    }

    fn index_url(&self, path: &str) -> String {
        format!("{}/{}{}", self.base_url, self.index, path)
    }

    /// Execute one `_search` round trip with the given body.
    pub async fn search(&self, body: Value) -> Result<RawHits, IndexError> {
        debug!("Executing search against index {}", self.index);
        let response = self
            .client
            .post(self.index_url("/_search"))
            .json(&body)
            .send()
            .await?;
        let body = Self::check(response).await?;

        let hits = body
            .get("hits")
            .ok_or_else(|| IndexError::InvalidResponse("missing hits object".to_string()))?;
        let total = hits
            .get("total")
            .and_then(|t| t.get("value"))
            .and_then(|v| v.as_u64())
            .ok_or_else(|| IndexError::InvalidResponse("missing hits.total.value".to_string()))?;
        let sources = hits
            .get("hits")
            .and_then(|h| h.as_array())
            .map(|hits| {
                hits.iter()
                    .filter_map(|hit| hit.get("_source").cloned())
                    .collect()
            })
            .unwrap_or_default();

        Ok(RawHits { sources, total })
    }

    /// Number of documents currently in the index. Used only by the
    /// ingestion guard, not by steady-state search.
    pub async fn count(&self) -> Result<u64, IndexError> {
        let response = self
            .client
            .get(self.index_url("/_count"))
            .send()
            .await?;
        let body = Self::check(response).await?;

        body.get("count")
            .and_then(|c| c.as_u64())
            .ok_or_else(|| IndexError::InvalidResponse("missing count".to_string()))
    }

    /// Bulk-insert documents via the ndjson `_bulk` API. Startup only.
    pub async fn bulk_insert(&self, documents: &[CourseDocument]) -> Result<usize, IndexError> {
        if documents.is_empty() {
            return Ok(0);
        }

        let mut ndjson = String::new();
        for doc in documents {
            let action = serde_json::json!({
                "index": { "_index": self.index, "_id": doc.id }
            });
            ndjson.push_str(&action.to_string());
            ndjson.push('\n');
            ndjson.push_str(
                &serde_json::to_string(doc)
                    .map_err(|e| IndexError::InvalidResponse(e.to_string()))?,
            );
            ndjson.push('\n');
        }

        let response = self
            .client
            .post(format!("{}/_bulk?refresh=true", self.base_url))
            .header("Content-Type", "application/x-ndjson")
            .body(ndjson)
            .send()
            .await?;
        let body = Self::check(response).await?;

        if body.get("errors").and_then(|e| e.as_bool()).unwrap_or(false) {
            return Err(IndexError::InvalidResponse(
                "bulk insert reported item errors".to_string(),
            ));
        }

        Ok(documents.len())
    }

    /// Create the index with the course mapping if it does not exist yet.
    pub async fn ensure_index(&self) -> Result<(), IndexError> {
        let head = self
            .client
            .head(self.index_url(""))
            .send()
            .await?;
        if head.status().is_success() {
            return Ok(());
        }

        let response = self
            .client
            .put(self.index_url(""))
            .json(&schema::index_mapping())
            .send()
            .await?;

        // A concurrent creator may have won the race.
        if response.status() == StatusCode::BAD_REQUEST {
            let text = response.text().await.unwrap_or_default();
            if text.contains("resource_already_exists_exception") {
                return Ok(());
            }
            return Err(IndexError::Rejected {
                status: 400,
                reason: text,
            });
        }

        Self::check(response).await?;
        Ok(())
    }

    /// Map a response to the error taxonomy: 4xx means the index rejected
    /// the request, transport failures and 5xx mean it is unavailable.
    async fn check(response: Response) -> Result<Value, IndexError> {
        let status = response.status();
        if status.is_client_error() {
            let reason = response.text().await.unwrap_or_default();
            return Err(IndexError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(IndexError::Unavailable {
                reason: format!("status {}: {}", status.as_u16(), reason),
            });
        }

        response
            .json()
            .await
            .map_err(|e| IndexError::InvalidResponse(e.to_string()))
    }
}
