use std::sync::Arc;

use axum::{
    extract::{rejection::{JsonRejection, StringRejection}, State},
    Json,
};
use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::db::DbPool;
use crate::dto::{
    AddWhitelistDto, AddWhitelistResponse, ConfigResponse, CsvUploadResponse, ManagedCollection,
    ManagedCollectionsResponse, MessageResponse, MintDto, MintHistoryResponse, MintResponse,
    PhaseInfoResponse, SetPhaseDto, SetPhasesDto, UpdateConfigDto, WhitelistResponse,
};
use crate::errors::ApiError;
use crate::models::{MintPhase, WalletAddress};
use crate::repo::{self, MintOutcome};

/// Number of ledger entries returned by the history endpoint
const MINT_HISTORY_LIMIT: i64 = 50;

/// Handler for the admin configuration
///
/// This function handles GET requests to `/api/config`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
///
/// ### Returns
///
/// The stored settings together with the current phase and ledger totals
#[instrument(skip(pool))]
pub async fn get_config_handler(
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<ConfigResponse>, ApiError> {
    debug!("Retrieving mint configuration");

    let settings = repo::get_mint_settings(&pool).map_err(ApiError::Database)?;
    let stats = repo::get_mint_stats(&pool).map_err(ApiError::Database)?;
    let whitelist_size = repo::count_whitelist(&pool).map_err(ApiError::Database)?;
    let current_phase = settings.effective_phase(Utc::now().timestamp());

    Ok(Json(ConfigResponse {
        settings,
        current_phase,
        total_minted: stats.total_minted,
        whitelist_size,
        eth_collected: stats.eth_collected,
        hype_collected: stats.hype_collected,
    }))
}

/// Handler for listing the whitelist
///
/// This function handles GET requests to `/api/whitelist`.
///
/// ### Returns
///
/// All whitelisted addresses in ascending order and their count
#[instrument(skip(pool))]
pub async fn list_whitelist_handler(
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<WhitelistResponse>, ApiError> {
    let whitelist = repo::list_whitelist(&pool).map_err(ApiError::Database)?;
    let count = whitelist.len() as i64;

    debug!("Returning {} whitelist addresses", count);

    Ok(Json(WhitelistResponse { whitelist, count }))
}

/// Handler for the mint ledger
///
/// This function handles GET requests to `/api/mint-history`.
///
/// ### Returns
///
/// The 50 most recent mints in chronological order and the ledger size
#[instrument(skip(pool))]
pub async fn mint_history_handler(
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<MintHistoryResponse>, ApiError> {
    let (history, total) =
        repo::get_mint_history(&pool, MINT_HISTORY_LIMIT).map_err(ApiError::Database)?;

    Ok(Json(MintHistoryResponse { history, total }))
}

/// Handler for the phase schedule
///
/// This function handles GET requests to `/api/phase-info`.
#[instrument(skip(pool))]
pub async fn phase_info_handler(
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<PhaseInfoResponse>, ApiError> {
    let settings = repo::get_mint_settings(&pool).map_err(ApiError::Database)?;
    Ok(Json(PhaseInfoResponse::new(&settings, Utc::now().timestamp())))
}

/// Handler for the collection-manager view
///
/// This function handles GET requests to `/api/managed-collections`.
#[instrument(skip(pool))]
pub async fn managed_collections_handler(
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<ManagedCollectionsResponse>, ApiError> {
    let settings = repo::get_mint_settings(&pool).map_err(ApiError::Database)?;
    let stats = repo::get_mint_stats(&pool).map_err(ApiError::Database)?;

    Ok(Json(ManagedCollectionsResponse {
        collections: vec![ManagedCollection::new(&settings, &stats, Utc::now().timestamp())],
    }))
}

/// Handler for scheduling the whitelist and public windows
///
/// This function handles POST requests to `/api/set-phases`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `payload` - The four window timestamps
///
/// ### Returns
///
/// A confirmation, or 400 when the windows are out of order or in the past.
/// A successful schedule clears any forced phase.
#[instrument(skip_all)]
pub async fn set_phases_handler(
    State(pool): State<Arc<DbPool>>,
    payload: Result<Json<SetPhasesDto>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(payload) = payload?;
    payload
        .validate(Utc::now().timestamp())
        .map_err(ApiError::Validation)?;

    repo::update_mint_settings(&pool, |settings, _| {
        settings.whitelist_start = payload.whitelist_start;
        settings.whitelist_end = payload.whitelist_end;
        settings.public_start = payload.public_start;
        settings.public_end = payload.public_end;
        settings.phase_override = None;
        Ok(())
    })
    .map_err(ApiError::Database)?
    .map_err(ApiError::Validation)?;

    info!(
        "Scheduled whitelist {}..{} and public {}..{}",
        payload.whitelist_start, payload.whitelist_end, payload.public_start, payload.public_end
    );

    Ok(Json(MessageResponse::ok("Phase times updated successfully")))
}

/// Handler for forcing a phase
///
/// This function handles POST requests to `/api/set-phase`.
///
/// ### Returns
///
/// A confirmation, or 400 for anything but CLOSED, WHITELIST or PUBLIC.
/// Forcing a phase lifts an emergency pause.
#[instrument(skip_all)]
pub async fn set_phase_handler(
    State(pool): State<Arc<DbPool>>,
    payload: Result<Json<SetPhaseDto>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(payload) = payload?;
    let phase: MintPhase = payload.phase.parse().map_err(ApiError::Validation)?;

    repo::update_mint_settings(&pool, |settings, _| {
        settings.phase_override = Some(phase);
        settings.paused = false;
        Ok(())
    })
    .map_err(ApiError::Database)?
    .map_err(ApiError::Validation)?;

    info!("Phase forced to {}", phase);

    Ok(Json(MessageResponse::ok(format!("Phase set to {}", phase))))
}

/// Handler for whitelisting one address
///
/// This function handles POST requests to `/api/add-whitelist`.
///
/// ### Returns
///
/// The new whitelist size, 400 for a malformed address or 409 for a duplicate
#[instrument(skip_all)]
pub async fn add_whitelist_handler(
    State(pool): State<Arc<DbPool>>,
    payload: Result<Json<AddWhitelistDto>, JsonRejection>,
) -> Result<Json<AddWhitelistResponse>, ApiError> {
    let Json(payload) = payload?;
    let address = WalletAddress::parse(&payload.address).map_err(ApiError::Validation)?;

    let added = repo::add_to_whitelist(&pool, &address, Utc::now().timestamp())
        .map_err(ApiError::Database)?;
    if !added {
        return Err(ApiError::Conflict("Address already whitelisted".to_string()));
    }

    let total_count = repo::count_whitelist(&pool).map_err(ApiError::Database)?;
    info!("Whitelisted {} ({} total)", address, total_count);

    Ok(Json(AddWhitelistResponse {
        success: true,
        message: "Address added to whitelist".to_string(),
        total_count,
    }))
}

/// Splits a CSV body into valid addresses and a count of rejected rows
///
/// Only the first column is read. Blank rows are skipped.
fn parse_whitelist_csv(body: &str) -> (Vec<WalletAddress>, usize) {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut addresses = Vec::new();
    let mut invalid = 0;

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                warn!("Skipping unreadable CSV row: {}", err);
                invalid += 1;
                continue;
            }
        };

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        match WalletAddress::parse(record.get(0).unwrap_or_default()) {
            Ok(address) => addresses.push(address),
            Err(_) => invalid += 1,
        }
    }

    (addresses, invalid)
}

/// Handler for bulk whitelisting from CSV
///
/// This function handles POST requests to `/api/upload-csv`. The body is
/// raw CSV text with one address in the first column of each row.
///
/// ### Returns
///
/// How many addresses were added, how many rows were invalid and the new
/// whitelist size. Addresses already present are neither added nor invalid.
#[instrument(skip_all)]
pub async fn upload_csv_handler(
    State(pool): State<Arc<DbPool>>,
    body: Result<String, StringRejection>,
) -> Result<Json<CsvUploadResponse>, ApiError> {
    let body = body?;
    debug!("Received {} bytes of CSV", body.len());
    if body.trim().is_empty() {
        return Err(ApiError::Validation("No CSV data provided".to_string()));
    }

    let (addresses, invalid_count) = parse_whitelist_csv(&body);
    let added_count = repo::add_many_to_whitelist(&pool, &addresses, Utc::now().timestamp())
        .map_err(ApiError::Database)?;
    let total_count = repo::count_whitelist(&pool).map_err(ApiError::Database)?;

    let message = if invalid_count > 0 {
        format!(
            "Added {} addresses to whitelist ({} invalid addresses skipped)",
            added_count, invalid_count
        )
    } else {
        format!("Added {} addresses to whitelist", added_count)
    };
    info!("{}", message);

    Ok(Json(CsvUploadResponse {
        success: true,
        message,
        added_count,
        invalid_count,
        total_count,
    }))
}

/// Handler for the pricing and collection forms
///
/// This function handles POST requests to `/api/update-config`.
///
/// ### Returns
///
/// A confirmation, or 400 when the values fail validation
#[instrument(skip_all)]
pub async fn update_config_handler(
    State(pool): State<Arc<DbPool>>,
    payload: Result<Json<UpdateConfigDto>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(payload) = payload?;

    let mut message = "";
    repo::update_mint_settings(&pool, |settings, stats| {
        message = payload.apply(settings, stats)?;
        Ok(())
    })
    .map_err(ApiError::Database)?
    .map_err(ApiError::Validation)?;

    info!("{}", message);

    Ok(Json(MessageResponse::ok(message)))
}

/// Handler for the emergency stop
///
/// This function handles POST requests to `/api/emergency-pause`. Minting
/// stays closed until a phase is forced again.
#[instrument(skip(pool))]
pub async fn emergency_pause_handler(
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<MessageResponse>, ApiError> {
    repo::update_mint_settings(&pool, |settings, _| {
        settings.paused = true;
        Ok(())
    })
    .map_err(ApiError::Database)?
    .map_err(ApiError::Validation)?;

    warn!("Emergency pause activated");

    Ok(Json(MessageResponse::ok("Emergency pause activated")))
}

/// Handler for minting
///
/// This function handles POST requests to `/api/mint`. The mint is only
/// recorded in the local ledger.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `payload` - The wallet, quantity and currency
///
/// ### Returns
///
/// The ledger entry, or 400 when the address is malformed or a minting rule
/// refuses the request
#[instrument(skip_all)]
pub async fn mint_handler(
    State(pool): State<Arc<DbPool>>,
    payload: Result<Json<MintDto>, JsonRejection>,
) -> Result<Json<MintResponse>, ApiError> {
    let Json(payload) = payload?;
    let address = WalletAddress::parse(&payload.address).map_err(ApiError::Validation)?;

    let outcome = repo::record_mint(
        &pool,
        &address,
        payload.quantity,
        payload.currency,
        Utc::now().timestamp(),
    )
    .map_err(ApiError::Database)?;

    match outcome {
        MintOutcome::Minted(mint) => {
            info!("Minted {} for {} at {} {}", mint.quantity, address, mint.total_price, mint.currency);
            Ok(Json(MintResponse {
                success: true,
                message: format!("Minted {} token(s)", mint.quantity),
                mint,
            }))
        }
        MintOutcome::Rejected(reason) => {
            debug!("Mint refused: {}", reason);
            Err(ApiError::Validation(reason))
        }
    }
}
