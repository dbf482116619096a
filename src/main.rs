//! Course-Search-RS: a course catalog search API backed by Elasticsearch
//!
//! This is the main entry point for the application.

use anyhow::Result;
use course_search_rs::{
    config::Settings,
    index::IndexClient,
    ingest,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting Course-Search-RS v{}", course_search_rs::VERSION);

    // Load configuration
    let settings = load_settings()?;
    info!(
        "Using index '{}' at {}",
        settings.elasticsearch.index, settings.elasticsearch.url
    );

    // Initialize the index client and make sure the index exists
    let client = IndexClient::new(&settings.elasticsearch)?;
    client.ensure_index().await?;

    // Startup ingestion, guarded by the index count
    if settings.data.load_on_startup {
        ingest::load_if_empty(&client, Path::new(&settings.data.courses_file)).await?;
    }

    // Create application state and router
    let state = AppState::new(settings.clone(), client);
    let app = create_router(state);

    // Bind address
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    info!("Starting server on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load settings from file or use defaults
fn load_settings() -> Result<Settings> {
    // Check for settings file in various locations
    let paths = [
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/course-search/settings.yml"),
        dirs::config_dir()
            .map(|p| p.join("course-search-rs/settings.yml"))
            .unwrap_or_default(),
    ];

    // Check environment variable first
    if let Ok(path) = std::env::var("COURSE_SEARCH_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(&path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    // Try each default path
    for path in paths.iter() {
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    // Use defaults
    info!("No settings file found, using defaults");
    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}
