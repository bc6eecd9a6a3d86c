use axum::{extract::State, Json};
use tracing::instrument;

use crate::state::AppState;
use crate::trading::{self, TrendingToken, WhaleWallet};

/// Handler for the trending meme tokens
///
/// This function handles GET requests to `/api/trending`.
#[instrument]
pub async fn trending_tokens_handler() -> Json<Vec<TrendingToken>> {
    let mut rng = rand::rng();
    Json(trading::trending_tokens(&mut rng))
}

/// Handler for the tracked whale wallets
///
/// This function handles GET requests to `/api/whales`. Wallet values use
/// the configured SOL price.
#[instrument(skip_all)]
pub async fn whales_handler(State(state): State<AppState>) -> Json<Vec<WhaleWallet>> {
    let mut rng = rand::rng();
    Json(trading::whales(&mut rng, state.sol_price_usd))
}
