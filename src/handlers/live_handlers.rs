use axum::{extract::State, Json};
use tracing::instrument;

use crate::live::{LiveFeed, LiveSnapshot};

/// Handler for the live protocol snapshot
///
/// This function handles GET requests to `/api/live-data`. The snapshot is
/// copied out under a read lock; the background ticker moves it forward.
#[instrument(skip_all)]
pub async fn live_data_handler(State(feed): State<LiveFeed>) -> Json<LiveSnapshot> {
    let snapshot = feed.read().await.clone();
    Json(snapshot)
}
