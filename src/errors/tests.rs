use super::*;
use axum::body::to_bytes;
use axum::response::IntoResponse;

/// Helper to extract status code and body JSON from an ApiError response
async fn error_response(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_database_error_response_hides_details() {
    let error = ApiError::Database(anyhow::anyhow!("connection refused"));
    let (status, body) = error_response(error).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_not_found_response() {
    let error = ApiError::NotFound("Collection".to_string());
    let (status, body) = error_response(error).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Collection not found");
}

#[tokio::test]
async fn test_validation_response() {
    let msg = "Invalid wallet address format".to_string();
    let (status, body) = error_response(ApiError::Validation(msg.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], msg);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_conflict_response() {
    let (status, body) = error_response(ApiError::Conflict("Address already whitelisted".to_string())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Address already whitelisted");
}

#[tokio::test]
async fn test_render_response_hides_details() {
    let (status, body) = error_response(ApiError::Render("png encoder failed".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

#[test]
fn test_anyhow_converts_into_database_error() {
    let error: ApiError = anyhow::anyhow!("boom").into();
    assert!(matches!(error, ApiError::Database(_)));
}
