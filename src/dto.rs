use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{NftListing, TraitFilter};
use crate::models::{Currency, MintPhase, MintRecord, MintSettings};
use crate::repo::MintStats;

/// Query parameters for a page of collection listings
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct CollectionNftsQuery {
    /// Collection id or slug; the default collection when absent
    pub collection: Option<String>,

    /// Page size, clamped to 1..=50
    pub count: Option<u32>,

    /// First token id of the page; random when absent
    pub start: Option<u32>,
}

/// Query parameters for a single token
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct NftDetailQuery {
    /// Collection id or slug; the default collection when absent
    pub collection: Option<String>,
}

/// Query parameters for searching a collection
///
/// Trait filters repeat the `trait` key, e.g. `trait=Background:Ocean&trait=Eyes:Blue`.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct SearchQuery {
    pub collection: Option<String>,
    pub q: Option<String>,
    pub limit: Option<u32>,
    #[serde(rename = "trait")]
    pub traits: Vec<String>,
}

impl SearchQuery {
    /// The trimmed search text and the parsed trait filters
    ///
    /// A search needs text or at least one filter.
    pub fn criteria(&self) -> Result<(String, Vec<TraitFilter>), String> {
        let text = self.q.as_deref().unwrap_or_default().trim().to_string();
        let filters = self
            .traits
            .iter()
            .map(|raw| raw.parse::<TraitFilter>())
            .collect::<Result<Vec<_>, _>>()?;
        if text.is_empty() && filters.is_empty() {
            return Err("Search query required".to_string());
        }
        Ok((text, filters))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SearchResponse {
    pub collection: String,
    pub query: String,
    pub results: Vec<NftListing>,
    pub count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CollectionTraitsResponse {
    pub collection: String,
    pub traits: BTreeMap<String, Vec<String>>,
}

/// Query parameters for playing a scratch card
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ScratchQuery {
    #[serde(rename = "type")]
    pub card_type: Option<String>,
}

/// Data transfer object for scheduling the two mint windows
///
/// All four values are Unix timestamps in seconds.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SetPhasesDto {
    pub whitelist_start: i64,
    pub whitelist_end: i64,
    pub public_start: i64,
    pub public_end: i64,
}

impl SetPhasesDto {
    /// Checks that the windows lie in the future and follow each other
    pub fn validate(&self, now: i64) -> Result<(), String> {
        if self.whitelist_start <= now {
            return Err("Whitelist start must be in the future".to_string());
        }
        if self.whitelist_end <= self.whitelist_start {
            return Err("Whitelist end must be after start".to_string());
        }
        if self.public_start <= self.whitelist_end {
            return Err("Public must start after whitelist ends".to_string());
        }
        if self.public_end <= self.public_start {
            return Err("Public end must be after start".to_string());
        }
        Ok(())
    }
}

/// Data transfer object for forcing a phase
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SetPhaseDto {
    /// One of CLOSED, WHITELIST or PUBLIC, in any case
    pub phase: String,
}

/// Data transfer object for whitelisting one wallet
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AddWhitelistDto {
    pub address: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PricingUpdate {
    pub whitelist_eth_price: f64,
    pub public_eth_price: f64,
    pub whitelist_hype_price: f64,
    pub public_hype_price: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CollectionUpdate {
    pub collection_name: String,
    pub collection_symbol: String,
    pub max_supply: i64,
    pub max_mint_per_wallet: i64,
    pub base_uri: String,
}

/// Data transfer object for the admin configuration forms
///
/// Serialized as `{"type": "pricing" | "collection", "data": {...}}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum UpdateConfigDto {
    Pricing(PricingUpdate),
    Collection(CollectionUpdate),
}

impl UpdateConfigDto {
    /// Validates the update against the current ledger and writes it into `settings`
    ///
    /// ### Returns
    ///
    /// The success message for the admin panel, or the reason for refusal
    pub fn apply(&self, settings: &mut MintSettings, stats: &MintStats) -> Result<&'static str, String> {
        match self {
            UpdateConfigDto::Pricing(pricing) => {
                let prices = [
                    pricing.whitelist_eth_price,
                    pricing.public_eth_price,
                    pricing.whitelist_hype_price,
                    pricing.public_hype_price,
                ];
                if prices.iter().any(|p| !p.is_finite() || *p < 0.0) {
                    return Err("Prices must be non-negative".to_string());
                }
                settings.whitelist_eth_price = pricing.whitelist_eth_price;
                settings.public_eth_price = pricing.public_eth_price;
                settings.whitelist_hype_price = pricing.whitelist_hype_price;
                settings.public_hype_price = pricing.public_hype_price;
                Ok("Pricing updated successfully")
            }
            UpdateConfigDto::Collection(collection) => {
                if collection.max_supply <= 0 {
                    return Err("Max supply must be positive".to_string());
                }
                if collection.max_supply < stats.total_minted {
                    return Err(format!(
                        "Max supply cannot be below the {} already minted",
                        stats.total_minted
                    ));
                }
                if collection.max_mint_per_wallet <= 0 {
                    return Err("Max mint per wallet must be positive".to_string());
                }
                settings.collection_name = collection.collection_name.clone();
                settings.collection_symbol = collection.collection_symbol.clone();
                settings.max_supply = collection.max_supply;
                settings.max_mint_per_wallet = collection.max_mint_per_wallet;
                settings.base_uri = collection.base_uri.clone();
                Ok("Collection settings updated successfully")
            }
        }
    }
}

fn default_currency() -> Currency {
    Currency::Hype
}

/// Data transfer object for minting
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MintDto {
    pub address: String,
    pub quantity: i64,
    #[serde(default = "default_currency")]
    pub currency: Currency,
}

/// Generic acknowledgement returned by admin actions
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AddWhitelistResponse {
    pub success: bool,
    pub message: String,
    pub total_count: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CsvUploadResponse {
    pub success: bool,
    pub message: String,
    pub added_count: usize,
    pub invalid_count: usize,
    pub total_count: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WhitelistResponse {
    pub whitelist: Vec<String>,
    pub count: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MintHistoryResponse {
    pub history: Vec<MintRecord>,
    pub total: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MintResponse {
    pub success: bool,
    pub message: String,
    pub mint: MintRecord,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PhaseInfoResponse {
    pub current_phase: MintPhase,
    pub current_time: i64,
    pub whitelist_start: i64,
    pub whitelist_end: i64,
    pub public_start: i64,
    pub public_end: i64,
    pub time_until_next_phase: i64,
}

impl PhaseInfoResponse {
    pub fn new(settings: &MintSettings, now: i64) -> Self {
        Self {
            current_phase: settings.effective_phase(now),
            current_time: now,
            whitelist_start: settings.whitelist_start,
            whitelist_end: settings.whitelist_end,
            public_start: settings.public_start,
            public_end: settings.public_end,
            time_until_next_phase: settings.time_until_next_phase(now),
        }
    }
}

/// The admin configuration together with live ledger figures
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConfigResponse {
    #[serde(flatten)]
    pub settings: MintSettings,
    pub current_phase: MintPhase,
    pub total_minted: i64,
    pub whitelist_size: i64,
    pub eth_collected: f64,
    pub hype_collected: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ManagedCollection {
    pub slug: String,
    pub name: String,
    pub symbol: String,
    pub price: f64,
    pub minted: i64,
    pub total: i64,
    pub status: String,
    #[serde(rename = "mintUrl")]
    pub mint_url: String,
    #[serde(rename = "adminUrl")]
    pub admin_url: String,
}

impl ManagedCollection {
    pub fn new(settings: &MintSettings, stats: &MintStats, now: i64) -> Self {
        let status = if settings.effective_phase(now) == MintPhase::Closed { "closed" } else { "active" };
        Self {
            slug: settings.collection_symbol.to_lowercase(),
            name: settings.collection_name.clone(),
            symbol: settings.collection_symbol.clone(),
            price: settings.public_hype_price,
            minted: stats.total_minted,
            total: settings.max_supply,
            status: status.to_string(),
            mint_url: "/api/mint".to_string(),
            admin_url: "/admin".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ManagedCollectionsResponse {
    pub collections: Vec<ManagedCollection>,
}
