use crate::db::DbPool;
use crate::models::{WalletAddress, WhitelistEntry};
use crate::schema::whitelist;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use anyhow::Result;
use tracing::{instrument, debug, info};

/// Adds a single address to the whitelist
///
/// ### Returns
///
/// `true` if the address was inserted, `false` if it was already present
#[instrument(skip(pool), fields(address = %address))]
pub fn add_to_whitelist(pool: &DbPool, address: &WalletAddress, now: i64) -> Result<bool> {
    debug!("Adding address to whitelist");

    let conn = &mut pool.get()?;

    let inserted = diesel::insert_or_ignore_into(whitelist::table)
        .values(WhitelistEntry::new(address.clone(), now))
        .execute(conn)?;

    if inserted == 0 {
        debug!("Address already whitelisted");
    }

    Ok(inserted > 0)
}

/// Adds many addresses in one transaction, skipping ones already present
///
/// ### Returns
///
/// The number of addresses that were newly inserted
#[instrument(skip(pool, addresses), fields(candidates = addresses.len()))]
pub fn add_many_to_whitelist(pool: &DbPool, addresses: &[WalletAddress], now: i64) -> Result<usize> {
    let conn = &mut pool.get()?;

    let added = conn.immediate_transaction::<_, anyhow::Error, _>(|conn| {
        let mut added = 0;
        for address in addresses {
            added += diesel::insert_or_ignore_into(whitelist::table)
                .values(WhitelistEntry::new(address.clone(), now))
                .execute(conn)?;
        }
        Ok(added)
    })?;

    info!("Imported {} new whitelist addresses", added);

    Ok(added)
}

/// Lists all whitelisted addresses in ascending order
#[instrument(skip(pool))]
pub fn list_whitelist(pool: &DbPool) -> Result<Vec<String>> {
    let conn = &mut pool.get()?;

    let addresses = whitelist::table
        .select(whitelist::address)
        .order(whitelist::address.asc())
        .load::<String>(conn)?;

    debug!("Retrieved {} whitelist addresses", addresses.len());

    Ok(addresses)
}

/// Counts whitelisted addresses
#[instrument(skip(pool))]
pub fn count_whitelist(pool: &DbPool) -> Result<i64> {
    let conn = &mut pool.get()?;
    let count = whitelist::table.count().get_result::<i64>(conn)?;
    Ok(count)
}

/// Checks whether an address is whitelisted, on a connection the caller
/// may already hold inside a transaction
pub(crate) fn is_whitelisted(conn: &mut SqliteConnection, address: &WalletAddress) -> QueryResult<bool> {
    let found = whitelist::table
        .find(address.as_str())
        .select(whitelist::address)
        .first::<String>(conn)
        .optional()?;
    Ok(found.is_some())
}
