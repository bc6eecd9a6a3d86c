use std::sync::Arc;

use axum::{extract::State, Json};
use axum_extra::extract::{Query, QueryRejection};
use tokio::sync::Mutex;
use tracing::{info, instrument};

use crate::dto::ScratchQuery;
use crate::errors::ApiError;
use crate::scratch::{CardResult, CardType, ScratchGame, ScratchStats};

/// Handler for scratching one card
///
/// This function handles GET requests to `/api/scratch-card?type=`.
///
/// ### Arguments
///
/// * `game` - The shared scratch-card game
/// * `query` - The card type: bronze, silver, gold or diamond
///
/// ### Returns
///
/// The card's outcome, or 400 when the type is missing or unknown
#[instrument(skip_all)]
pub async fn scratch_card_handler(
    State(game): State<Arc<Mutex<ScratchGame>>>,
    query: Result<Query<ScratchQuery>, QueryRejection>,
) -> Result<Json<CardResult>, ApiError> {
    let Query(query) = query?;
    let card_type: CardType = query
        .card_type
        .as_deref()
        .ok_or_else(|| ApiError::Validation("Card type is required".to_string()))?
        .parse()
        .map_err(ApiError::Validation)?;

    let result = game.lock().await.play(card_type);

    info!(
        "Scratched {} card: winner={}, prize={}",
        card_type, result.winner, result.prize
    );

    Ok(Json(result))
}

/// Handler for the game statistics
///
/// This function handles GET requests to `/api/scratch-stats`.
#[instrument(skip_all)]
pub async fn scratch_stats_handler(
    State(game): State<Arc<Mutex<ScratchGame>>>,
) -> Json<ScratchStats> {
    Json(game.lock().await.stats())
}
