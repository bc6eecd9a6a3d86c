/// Data models module
///
/// Database-backed records for the minting admin panel. Marketplace
/// fixtures live in `catalog`, game and feed state in `scratch` and `live`.

mod mint_phase;
pub use mint_phase::{Currency, MintPhase};

mod mint_settings;
pub use mint_settings::MintSettings;

mod whitelist_entry;
pub use whitelist_entry::{WalletAddress, WhitelistEntry};

mod mint_record;
pub use mint_record::MintRecord;
