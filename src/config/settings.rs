//! Settings structures for Course-Search-RS configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub elasticsearch: ElasticsearchSettings,
    pub data: DataSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (COURSE_SEARCH_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("COURSE_SEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("COURSE_SEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("COURSE_SEARCH_ES_URL") {
            self.elasticsearch.url = val;
        }
        if let Ok(val) = std::env::var("COURSE_SEARCH_ES_INDEX") {
            self.elasticsearch.index = val;
        }
        if let Ok(val) = std::env::var("COURSE_SEARCH_DATA_FILE") {
            self.data.courses_file = val;
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address
    pub bind_address: String,
    /// Listen port
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Elasticsearch index service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticsearchSettings {
    /// Base URL of the Elasticsearch node
    pub url: String,
    /// Name of the course index
    pub index: String,
    /// Request timeout in seconds
    pub request_timeout: f64,
}

impl Default for ElasticsearchSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost:9200".to_string(),
            index: "courses".to_string(),
            request_timeout: 5.0,
        }
    }
}

/// Startup data loading settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Path to the seed course dataset (JSON array)
    pub courses_file: String,
    /// Whether to run the count-guarded bulk load at startup
    pub load_on_startup: bool,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            courses_file: "data/sample-courses.json".to_string(),
            load_on_startup: true,
        }
    }
}
