//! Shared fixtures for integration tests.
//!
//! Every test gets its own in-memory SQLite database. The pool is pinned to a
//! single connection so the database lives as long as the pool.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use user_api::api::{create_router, AppState};
use user_api::config::{Config, DatabaseConfig, HashingConfig, MAX_LIST_LIMIT};
use user_api::infra::Database;

pub async fn setup_database() -> Arc<Database> {
    let mut config = DatabaseConfig::new("sqlite::memory:");
    config.max_connections = 1;
    config.min_connections = 1;

    Arc::new(
        Database::connect(&config)
            .await
            .expect("in-memory database should start"),
    )
}

/// Cheap Argon2 parameters; tests exercise behavior, not cost.
pub fn hashing_config() -> HashingConfig {
    HashingConfig::new("integration-test-secret").with_cost(8, 1, 1)
}

pub fn test_config() -> Config {
    Config {
        database: DatabaseConfig::new("sqlite::memory:"),
        hashing: hashing_config(),
        max_list_limit: MAX_LIST_LIMIT,
    }
}

pub async fn test_app() -> (Router, Arc<Database>) {
    let db = setup_database().await;
    let state = AppState::from_config(db.clone(), &test_config()).expect("valid test config");
    (create_router(state), db)
}

/// Send a request and decode the JSON body (`Value::Null` when empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}
