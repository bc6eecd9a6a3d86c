//! Common test utilities for HyperFlow integration tests
//!
//! This file contains the shared application setup and request helpers used
//! by all integration tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use hyperflow::{create_app, db, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Creates a test application over a fresh in-memory SQLite database
///
/// Every pooled connection shares one in-memory database through a unique
/// shared-cache URI, so tests stay isolated from each other.
///
/// ### Returns
///
/// An Axum Router configured with all routes
pub fn create_test_app() -> Router {
    let database_url = format!("file:test_{}?mode=memory&cache=shared", uuid::Uuid::new_v4());
    let pool = db::init_pool(&database_url).expect("Failed to create pool");

    let mut conn = pool.get().expect("Failed to get connection");
    db::run_migrations(&mut conn).expect("Failed to run migrations");
    drop(conn);

    create_app(AppState::new(Arc::new(pool)))
}

/// Sends a request and returns the status and parsed JSON body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

/// Sends a GET request
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// Sends a POST request with a JSON body
pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Sends a POST request with a raw text body
pub async fn post_text(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "text/csv")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// A well-formed wallet address ending in `suffix`
pub fn address(suffix: &str) -> String {
    format!("0x{:0>40}", suffix)
}
