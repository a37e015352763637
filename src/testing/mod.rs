use axum::{body::to_bytes, response::Response, Router};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::router;
use crate::state::AppState;

pub const TEST_SECRET: &str = "unit-test-secret";

/// Fresh, migrated in-memory database
pub async fn test_pool() -> SqlitePool {
    let config = AppConfig::for_tests(TEST_SECRET);
    DatabaseManager::connect(&config.database)
        .await
        .expect("in-memory database")
}

/// Router over a fresh database, plus the state so tests can mint tokens
pub async fn test_app() -> (Router, AppState) {
    let config = AppConfig::for_tests(TEST_SECRET);
    let state = AppState::new(test_pool().await, &config).expect("test state");
    (router::app(state.clone(), &config), state)
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}
