use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use crate::db::{self, DbPool};
use crate::{create_app, AppState};

/// Sets up a test database with migrations applied
///
/// Plain ":memory:" gives each pooled connection its own database, so a
/// unique shared-cache URI keeps all connections of one pool on the same
/// in-memory database while isolating tests from each other.
pub fn setup_test_db() -> Arc<DbPool> {
    let unique_id = uuid::Uuid::new_v4();
    let database_url = format!("file:test_{}?mode=memory&cache=shared", unique_id);
    let pool = db::init_pool(&database_url).expect("Failed to create pool");

    let mut conn = pool.get().expect("Failed to get connection");
    db::run_migrations(&mut conn).expect("Failed to run migrations");

    Arc::new(pool)
}

/// Builds the full router over a fresh test database
pub fn test_app() -> Router {
    create_app(AppState::new(setup_test_db()))
}

/// Sends a GET request and returns the status and parsed JSON body
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_router_serves_trending_collections() {
    let (status, body) = get_json(test_app(), "/api/trending-collections").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let request = Request::builder().uri("/api/nope").body(Body::empty()).unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_responses_allow_any_origin() {
    let request = Request::builder()
        .uri("/api/launchpad")
        .header("Origin", "http://example.com")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
