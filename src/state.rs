use std::sync::Arc;

use mongodb::Client as MongoClient;

use crate::config::Config;
use crate::repositories::{MongoStore, Store};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState by connecting to MongoDB and preparing indexes
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        let client = MongoClient::with_uri_str(&config.mongodb_url)
            .await
            .map_err(|e| AppStateError::Mongo(e.to_string()))?;
        let db = client.database(&config.mongodb_database);

        let store = MongoStore::new(&db);
        store
            .ensure_indexes()
            .await
            .map_err(|e| AppStateError::Index(e.to_string()))?;

        Ok(Self {
            store: Arc::new(store),
            config,
        })
    }

    /// Create AppState with a custom store (for testing)
    pub fn with_store(config: Config, store: Arc<dyn Store>) -> Self {
        Self { store, config }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("MongoDB connection error: {0}")]
    Mongo(String),

    #[error("Index creation error: {0}")]
    Index(String),
}
