/// HyperFlow: A Demo NFT Marketplace on HyperEVM
///
/// This library provides everything the HyperFlow demo server needs:
/// marketplace fixtures, procedural NFT art, a trading dashboard, a
/// simulated protocol feed, play-money scratch-card and crash games and a minting
/// admin panel backed by SQLite. Nothing here talks to a blockchain; all
/// figures are fixtures or simulations.
///
/// ### Modules
///
/// - `catalog`: Collection fixtures and derived listings
/// - `metadata`: Best-effort HyperScan metadata lookups
/// - `art`: Deterministic procedural PNG art
/// - `trading`: Trending tokens and whale wallets
/// - `live`: Protocol snapshot and its background ticker
/// - `scratch`: Scratch-card game
/// - `crash`: Crash game and its round loop
/// - `models`, `repo`, `schema`, `db`: Minting admin persistence
///
/// ### Web API
///
/// The library exposes a JSON API using Axum with the following endpoints:
///
/// - `GET /api/trending-collections`, `/api/collections`, `/api/collections/{id}`
/// - `GET /api/collection-nfts`, `/api/nft/{token_id}`, `/api/launchpad`, `/api/activities`
/// - `GET /api/nfts/search`, `/api/collections/{id}/traits`
/// - `GET /api/art/{token_id}`, `/api/art/{token_id}/image.png`
/// - `GET /api/trending`, `/api/whales`, `/api/live-data`
/// - `GET /api/scratch-card`, `/api/scratch-stats`, `/api/crash-game`
/// - `GET /api/config`, `/api/whitelist`, `/api/mint-history`, `/api/phase-info`, `/api/managed-collections`
/// - `POST /api/set-phases`, `/api/set-phase`, `/api/add-whitelist`, `/api/upload-csv`,
///   `/api/update-config`, `/api/emergency-pause`, `/api/mint`
///
/// plus the HTML pages `/`, `/admin`, `/scratch`, `/crash`, `/live` and `/dashboard`.

/// Procedural art module
pub mod art;

/// Marketplace fixtures module
pub mod catalog;

/// Configuration module
pub mod config;

/// Crash game module
pub mod crash;

/// Database connection module
pub mod db;

/// Data transfer objects module
pub mod dto;

/// Error handling module
pub mod errors;

/// Web API handlers module
pub mod handlers;

/// Live protocol feed module
pub mod live;

/// Logging setup module
pub mod logging;

/// Remote metadata module
pub mod metadata;

/// Data models module
pub mod models;

/// Embedded HTML pages module
pub mod pages;

/// Repository module for database operations
pub mod repo;

/// Database schema module
pub mod schema;

/// Scratch-card game module
pub mod scratch;

/// Shared application state module
pub mod state;

/// Trading dashboard module
pub mod trading;

#[cfg(test)]
mod test_utils;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::handlers::*;
pub use crate::state::AppState;

/// Creates the application router with all routes
///
/// ### Arguments
///
/// * `state` - The shared application state
///
/// ### Returns
///
/// An Axum Router configured with all routes and permissive CORS
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // HTML pages
        .route("/", get(index_page_handler))
        .route("/admin", get(admin_page_handler))
        .route("/scratch", get(scratch_page_handler))
        .route("/crash", get(crash_page_handler))
        .route("/live", get(live_page_handler))
        .route("/dashboard", get(dashboard_page_handler))
        .route("/static/style.css", get(stylesheet_handler))
        // Marketplace
        .route("/api/trending-collections", get(trending_collections_handler))
        .route("/api/collections", get(list_collections_handler))
        .route("/api/collections/{id}", get(get_collection_handler))
        .route("/api/collections/{id}/traits", get(collection_traits_handler))
        .route("/api/collection-nfts", get(collection_nfts_handler))
        .route("/api/nft/{token_id}", get(nft_detail_handler))
        .route("/api/nfts/search", get(search_nfts_handler))
        .route("/api/launchpad", get(launchpad_handler))
        .route("/api/activities", get(activities_handler))
        // Procedural art
        .route("/api/art/{token_id}", get(art_metadata_handler))
        .route("/api/art/{token_id}/image.png", get(art_image_handler))
        // Trading dashboard and live feed
        .route("/api/trending", get(trending_tokens_handler))
        .route("/api/whales", get(whales_handler))
        .route("/api/live-data", get(live_data_handler))
        // Scratch cards
        .route("/api/scratch-card", get(scratch_card_handler))
        .route("/api/scratch-stats", get(scratch_stats_handler))
        .route("/api/crash-game", get(crash_game_handler))
        // Minting admin
        .route("/api/config", get(get_config_handler))
        .route("/api/whitelist", get(list_whitelist_handler))
        .route("/api/mint-history", get(mint_history_handler))
        .route("/api/phase-info", get(phase_info_handler))
        .route("/api/managed-collections", get(managed_collections_handler))
        .route("/api/set-phases", post(set_phases_handler))
        .route("/api/set-phase", post(set_phase_handler))
        .route("/api/add-whitelist", post(add_whitelist_handler))
        .route("/api/upload-csv", post(upload_csv_handler))
        .route("/api/update-config", post(update_config_handler))
        .route("/api/emergency-pause", post(emergency_pause_handler))
        .route("/api/mint", post(mint_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
