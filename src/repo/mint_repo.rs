use crate::db::DbPool;
use crate::models::{Currency, MintPhase, MintRecord, MintSettings, WalletAddress};
use crate::schema::{mint_settings, mints};
use super::whitelist_repo::is_whitelisted;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::sqlite::SqliteConnection;
use anyhow::Result;
use serde::Serialize;
use tracing::{instrument, debug, info};

/// The primary key of the single settings row
const SETTINGS_ID: i32 = 1;

/// Aggregates over the mint ledger
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MintStats {
    pub total_minted: i64,
    pub eth_collected: f64,
    pub hype_collected: f64,
}

/// What happened to a mint request
#[derive(Debug, Clone, PartialEq)]
pub enum MintOutcome {
    Minted(MintRecord),
    Rejected(String),
}

fn load_settings(conn: &mut SqliteConnection) -> QueryResult<MintSettings> {
    mint_settings::table
        .find(SETTINGS_ID)
        .select(MintSettings::as_select())
        .first(conn)
}

fn load_stats(conn: &mut SqliteConnection) -> QueryResult<MintStats> {
    let rows = mints::table
        .select((mints::quantity, mints::currency, mints::total_price))
        .load::<(i64, Currency, f64)>(conn)?;

    Ok(rows.into_iter().fold(MintStats::default(), |mut stats, (quantity, currency, total)| {
        stats.total_minted += quantity;
        match currency {
            Currency::Eth => stats.eth_collected += total,
            Currency::Hype => stats.hype_collected += total,
        }
        stats
    }))
}

/// Loads the minting configuration
#[instrument(skip(pool))]
pub fn get_mint_settings(pool: &DbPool) -> Result<MintSettings> {
    let conn = &mut pool.get()?;
    Ok(load_settings(conn)?)
}

/// Overwrites the minting configuration
#[cfg(test)]
#[instrument(skip(pool, settings))]
pub fn save_mint_settings(pool: &DbPool, settings: &MintSettings) -> Result<MintSettings> {
    let conn = &mut pool.get()?;

    let saved = diesel::update(mint_settings::table.find(SETTINGS_ID))
        .set(settings)
        .returning(MintSettings::as_returning())
        .get_result(conn)?;

    info!(
        "Saved mint settings: phase_override={:?}, paused={}",
        saved.phase_override, saved.paused
    );

    Ok(saved)
}

/// Applies `change` to the stored settings inside one write transaction.
///
/// `change` may refuse by returning `Err(message)`, in which case nothing
/// is written and the message is handed back as the inner error.
#[instrument(skip(pool, change))]
pub fn update_mint_settings<F>(pool: &DbPool, change: F) -> Result<Result<MintSettings, String>>
where
    F: FnOnce(&mut MintSettings, &MintStats) -> Result<(), String>,
{
    let conn = &mut pool.get()?;

    conn.immediate_transaction::<_, anyhow::Error, _>(|conn| {
        let mut settings = load_settings(conn)?;
        let stats = load_stats(conn)?;

        if let Err(message) = change(&mut settings, &stats) {
            debug!("Settings change refused: {}", message);
            return Ok(Err(message));
        }

        let saved = diesel::update(mint_settings::table.find(SETTINGS_ID))
            .set(&settings)
            .returning(MintSettings::as_returning())
            .get_result(conn)?;

        Ok(Ok(saved))
    })
}

/// Sums the mint ledger
#[instrument(skip(pool))]
pub fn get_mint_stats(pool: &DbPool) -> Result<MintStats> {
    let conn = &mut pool.get()?;
    Ok(load_stats(conn)?)
}

/// Returns up to `limit` most recent mints in chronological order, plus the ledger size
#[instrument(skip(pool))]
pub fn get_mint_history(pool: &DbPool, limit: i64) -> Result<(Vec<MintRecord>, i64)> {
    let conn = &mut pool.get()?;

    let mut recent = mints::table
        .select(MintRecord::as_select())
        .order((mints::minted_at.desc(), sql::<BigInt>("rowid").desc()))
        .limit(limit)
        .load::<MintRecord>(conn)?;
    recent.reverse();

    let total = mints::table.count().get_result::<i64>(conn)?;

    debug!("Retrieved {} of {} mints", recent.len(), total);

    Ok((recent, total))
}

/// Validates and records a mint against the current phase, whitelist and limits.
///
/// Everything runs inside one immediate transaction so supply and per-wallet
/// limits hold under concurrent requests.
#[instrument(skip(pool), fields(address = %address))]
pub fn record_mint(
    pool: &DbPool,
    address: &WalletAddress,
    quantity: i64,
    currency: Currency,
    now: i64,
) -> Result<MintOutcome> {
    let conn = &mut pool.get()?;

    conn.immediate_transaction::<_, anyhow::Error, _>(|conn| {
        if quantity < 1 {
            return Ok(MintOutcome::Rejected("Quantity must be at least 1".to_string()));
        }

        let settings = load_settings(conn)?;
        let phase = settings.effective_phase(now);

        let Some(unit_price) = settings.unit_price(phase, currency) else {
            return Ok(MintOutcome::Rejected("Minting is closed".to_string()));
        };

        if phase == MintPhase::Whitelist {
            if !is_whitelisted(conn, address)? {
                return Ok(MintOutcome::Rejected("Address is not whitelisted".to_string()));
            }
        }

        let wallet_minted: i64 = mints::table
            .filter(mints::address.eq(address.as_str()))
            .select(mints::quantity)
            .load::<i64>(conn)?
            .into_iter()
            .sum();
        let wallet_total = wallet_minted.checked_add(quantity);
        if wallet_total.is_none_or(|total| total > settings.max_mint_per_wallet) {
            return Ok(MintOutcome::Rejected(format!(
                "Wallet limit exceeded: {} already minted, limit is {}",
                wallet_minted, settings.max_mint_per_wallet
            )));
        }

        let stats = load_stats(conn)?;
        let supply_total = stats.total_minted.checked_add(quantity);
        if supply_total.is_none_or(|total| total > settings.max_supply) {
            return Ok(MintOutcome::Rejected(format!(
                "Not enough supply left: {} of {} minted",
                stats.total_minted, settings.max_supply
            )));
        }

        let record = MintRecord::new(
            address.as_str().to_string(),
            quantity,
            currency,
            unit_price,
            phase,
            now,
        );

        diesel::insert_into(mints::table)
            .values(&record)
            .execute(conn)?;

        info!("Recorded mint {} of {} in {} phase", record.id, quantity, phase);

        Ok(MintOutcome::Minted(record))
    })
}

#[cfg(test)]
mod tests;
