//! Startup data loading
//!
//! Bulk-loads the seed course dataset exactly once per index lifetime,
//! guarded by a count check: the load proceeds only while the index is
//! empty. Runs before the server accepts requests.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::documents::CourseDocument;
use crate::index::IndexClient;

/// Load the course dataset from `path` if the index is currently empty.
///
/// Returns the number of documents indexed; zero when the guard skipped the
/// load. Every document gets its `titleSuggest` field set to a copy of its
/// title before insertion.
pub async fn load_if_empty(client: &IndexClient, path: &Path) -> Result<usize> {
    let existing = client
        .count()
        .await
        .context("counting documents for the ingestion guard")?;
    if existing > 0 {
        info!(
            "Index '{}' already contains {} courses, skipping load",
            client.index(),
            existing
        );
        return Ok(0);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading course dataset from {}", path.display()))?;
    let mut courses: Vec<CourseDocument> =
        serde_json::from_str(&content).context("parsing course dataset")?;

    for course in &mut courses {
        course.fill_title_suggest();
    }

    let indexed = client.bulk_insert(&courses).await?;
    info!("Indexed {} courses into '{}'", indexed, client.index());
    Ok(indexed)
}
