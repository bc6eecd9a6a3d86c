use axum::{extract::State, Json};
use chrono::Utc;
use tracing::instrument;

use crate::crash::{CrashFeed, CrashView};

/// Handler for the current crash round
///
/// This function handles GET requests to `/api/crash-game`. The round loop
/// owns the write side; this only reads.
#[instrument(skip_all)]
pub async fn crash_game_handler(State(feed): State<CrashFeed>) -> Json<CrashView> {
    let view = feed.read().await.view(Utc::now());
    Json(view)
}
