//! Application state shared across handlers

use std::sync::Arc;

use crate::config::Settings;
use crate::index::IndexClient;
use crate::search::SearchExecutor;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search executor
    pub executor: Arc<SearchExecutor>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, client: IndexClient) -> Self {
        Self {
            settings: Arc::new(settings),
            executor: Arc::new(SearchExecutor::new(client)),
        }
    }
}
