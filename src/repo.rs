/// Repository module
///
/// This module provides the data access layer for the minting admin panel.
/// It contains functions for reading and updating the mint settings row,
/// the whitelist, and the mint ledger.

mod mint_repo;
mod whitelist_repo;

// Re-export all repository functions
pub use mint_repo::*;
pub use whitelist_repo::*;
