//! Configuration module - environment-based configuration.

use std::env;
use std::sync::Arc;

use crate::catalog::CatalogService;
use crate::store::FIRESTORE_API;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Server config
    pub host: String,
    pub port: u16,

    // Hosted document store
    pub firestore_base_url: String,
    pub firestore_project: Option<String>,
    pub firestore_database: String,
    pub firestore_api_key: Option<String>,

    /// Collection holding the recipe documents.
    pub collection: String,

    /// Seconds between background catalog reloads. Zero disables the loop;
    /// the catalog then only reloads on startup and after mutations.
    pub refresh_interval_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let host = env::var("RECIPES_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("RECIPES_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080);

        Self {
            host,
            port,
            firestore_base_url: env::var("FIRESTORE_BASE_URL")
                .unwrap_or_else(|_| FIRESTORE_API.to_string()),
            firestore_project: env::var("FIRESTORE_PROJECT_ID").ok(),
            firestore_database: env::var("FIRESTORE_DATABASE")
                .unwrap_or_else(|_| "(default)".to_string()),
            firestore_api_key: env::var("FIRESTORE_API_KEY").ok(),
            collection: env::var("RECIPES_COLLECTION").unwrap_or_else(|_| "recipes".to_string()),
            refresh_interval_seconds: env::var("RECIPES_REFRESH_SECONDS")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .unwrap_or(0),
        }
    }

    /// Get server bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub service: Arc<CatalogService>,
}

impl AppState {
    pub fn new(config: Config, service: Arc<CatalogService>) -> Self {
        Self {
            config: Arc::new(config),
            service,
        }
    }
}
