use std::sync::Arc;

use axum_test::TestServer;
use devshelf::build_router;
use devshelf::config::Config;
use devshelf::repositories::InMemoryStore;
use devshelf::state::AppState;

/// Test configuration
pub fn test_config() -> Config {
    Config {
        mongodb_url: "mongodb://localhost:27017".to_string(),
        mongodb_database: "devshelf_test".to_string(),
        jwt_secret: "test-jwt-secret-that-is-at-least-32-characters-long".to_string(),
        jwt_expiration_hours: 24,
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

/// Test application wrapper
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let config = test_config();

        // In-memory store keeps tests independent of a running MongoDB
        let store = Arc::new(InMemoryStore::new());
        let state = AppState::with_store(config, store);

        let router = build_router(state.clone());
        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, state }
    }
}
