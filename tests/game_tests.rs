mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use common::*;
use tower::ServiceExt;

#[tokio::test]
async fn test_scratch_card_requires_valid_type() {
    let app = create_test_app();

    let (status, body) = get(&app, "/api/scratch-card").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Card type is required");

    let (status, body) = get(&app, "/api/scratch-card?type=platinum").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid card type: platinum");
}

#[tokio::test]
async fn test_scratch_card_updates_stats() {
    let app = create_test_app();
    let (_, before) = get(&app, "/api/scratch-stats").await;

    for _ in 0..20 {
        let (status, card) = get(&app, "/api/scratch-card?type=Gold").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(card["card_type"], "gold");
        assert_eq!(card["symbols"].as_array().unwrap().len(), 9);
        if card["winner"] == false {
            assert_eq!(card["prize"], 0.0);
        }
    }

    let (_, after) = get(&app, "/api/scratch-stats").await;
    assert_eq!(
        after["total_cards_sold"].as_u64().unwrap(),
        before["total_cards_sold"].as_u64().unwrap() + 20
    );
    assert!(after["recent_wins"].as_array().unwrap().len() <= 15);
}

#[tokio::test]
async fn test_live_data_snapshot() {
    let app = create_test_app();

    let (status, live) = get(&app, "/api/live-data").await;

    assert_eq!(status, StatusCode::OK);
    assert!(live["tvl"].as_i64().unwrap() >= 2_000_000);
    assert!(live["flow_price"].as_f64().unwrap() >= 0.01);
    assert_eq!(live["vaults"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_crash_game_opens_with_betting_round() {
    let app = create_test_app();

    let (status, round) = get(&app, "/api/crash-game").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(round["round"], 1);
    assert_eq!(round["phase"], "betting");
    assert_eq!(round["betting"], true);
    assert_eq!(round["active"], false);
    assert_eq!(round["multiplier"], 1.0);
    assert!(round["crash_point"].is_null());
    assert!(round["seconds_until_launch"].as_f64().unwrap() <= 10.0);
    assert_eq!(round["history"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_trading_dashboard() {
    let app = create_test_app();

    let (status, tokens) = get(&app, "/api/trending").await;
    assert_eq!(status, StatusCode::OK);
    let tokens = tokens.as_array().unwrap();
    assert_eq!(tokens.len(), 8);
    assert!(tokens.iter().all(|t| t.get("address").is_none()));

    let (status, whales) = get(&app, "/api/whales").await;
    assert_eq!(status, StatusCode::OK);
    for whale in whales.as_array().unwrap() {
        let sol = whale["sol_balance"].as_f64().unwrap();
        let usd = whale["value_usd"].as_f64().unwrap();
        assert!((usd - sol * 100.0).abs() < 1.0);
    }
}

#[tokio::test]
async fn test_art_metadata_points_at_image() {
    let app = create_test_app();

    let (status, first) = get(&app, "/api/art/42").await;
    let (_, second) = get(&app, "/api/art/42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(first["image"], "/api/art/42/image.png");
    assert!(first["rarity_score"].as_u64().unwrap() >= 30);
}

#[tokio::test]
async fn test_art_image_is_png() {
    let app = create_test_app();
    let request = Request::builder().uri("/api/art/7/image.png").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/png");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn test_pages_are_served_as_html() {
    let app = create_test_app();

    for uri in ["/", "/admin", "/scratch", "/crash", "/live", "/dashboard"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"), "{}", uri);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("demo-banner"), "{}", uri);
    }
}
