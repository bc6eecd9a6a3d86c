/// Marketplace fixtures and the listings derived from them
///
/// The two collections below are static fixtures. Everything else served by
/// the marketplace routes (trending entries, listing pages, token details,
/// launchpad projects and the activity feed) is computed from them.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::metadata::RemoteMetadata;

/// Chain name reported for every collection
pub const CHAIN_NAME: &str = "HyperEVM";

/// HyperEVM chain id
pub const CHAIN_ID: u32 = 999;

/// Default number of listings per page
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// Largest page the listing route serves
pub const MAX_PAGE_SIZE: u32 = 50;

/// Default number of search results
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// A trait category and the values a token can take in it
pub type TraitSet = (&'static str, &'static [&'static str]);

/// A fixture NFT collection
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub id: &'static str,
    pub slug: &'static str,
    pub name: &'static str,
    /// Prefix used in placeholder image captions
    pub short_name: &'static str,
    pub description: &'static str,
    pub contract: &'static str,
    pub creator: &'static str,
    pub total_supply: u32,
    pub floor_price: f64,
    pub volume_24h: f64,
    pub volume_total: f64,
    pub volume_change: f64,
    pub owners: u32,
    pub items_listed: u32,
    pub created_date: &'static str,
    pub featured_ids: [u32; 8],
    pub preview_palette: &'static [&'static str],
    pub listing_palette: &'static [&'static str],
    pub traits: [TraitSet; 3],
}

pub static COLLECTIONS: [Collection; 2] = [
    Collection {
        id: "hypio-babies",
        slug: "hypio",
        name: "Wealthy Hypio Babies",
        short_name: "Hypio",
        description: "The most exclusive NFT collection on HyperEVM blockchain",
        contract: "0x63eb9d77D083cA10C304E28d5191321977fd0Bfb",
        creator: "0x742d35Cc6644C4532B1d8d40Cfc6aA907e8d9c1",
        total_supply: 5555,
        floor_price: 60.0,
        volume_24h: 2847.5,
        volume_total: 543514.2,
        volume_change: 15.3,
        owners: 2770,
        items_listed: 1667,
        created_date: "2024-03-15T10:00:00Z",
        featured_ids: [1, 42, 123, 456, 789, 1234, 2888, 4321],
        preview_palette: &["2dd4bf", "06b6d4", "3b82f6", "8b5cf6", "ec4899"],
        listing_palette: &["2dd4bf", "14b8a6", "0891b2", "0284c7", "3b82f6", "8b5cf6", "a855f7"],
        traits: [
            ("Background", &["Ocean", "Forest", "Galaxy", "Desert", "City", "Mountain", "Sunset"]),
            ("Body", &["Gold", "Silver", "Bronze", "Diamond", "Platinum", "Ruby", "Emerald"]),
            ("Eyes", &["Blue", "Green", "Red", "Purple", "Yellow", "Orange", "Pink"]),
        ],
    },
    Collection {
        id: "pip-friends",
        slug: "pipf",
        name: "PiP & Friends",
        short_name: "PiP",
        description: "PiP & Friends NFT collection on HyperEVM with 7,777 unique items",
        contract: "0xbc4a26ba78ce05E8bCbF069Bbb87FB3E1dAC8DF8",
        creator: "0x8fa3b4c27e65f123a9f4d5c6b1e8a3f2d7c9e4b",
        total_supply: 7777,
        floor_price: 25.0,
        volume_24h: 1247.8,
        volume_total: 89234.5,
        volume_change: 8.7,
        owners: 1607,
        items_listed: 945,
        created_date: "2024-05-20T15:30:00Z",
        featured_ids: [7777, 7776, 7775, 7774, 7773, 7772, 7771, 7770],
        preview_palette: &["f59e0b", "10b981", "f97316", "ef4444", "a855f7"],
        listing_palette: &["8b5cf6", "3b82f6", "06b6d4", "10b981", "f59e0b", "ef4444", "ec4899"],
        traits: [
            ("Background", &["Neon", "Cyber", "Space", "Urban", "Nature", "Abstract", "Digital"]),
            ("Body", &["Robot", "Alien", "Human", "Cyborg", "Spirit", "Energy", "Plasma"]),
            ("Eyes", &["Laser", "Glowing", "Digital", "Crystal", "Fire", "Ice", "Electric"]),
        ],
    },
];

// Detail-page trait categories, drawn with a token-seeded RNG
const DETAIL_TRAITS: [TraitSet; 8] = [
    ("Background", &["Atlantean-Light-Codes", "English", "Purple", "Gradient", "Blue", "Pink", "Green", "Orange", "Red", "Cosmic"]),
    ("Body", &["White", "Tan", "Pink", "Blue", "Green", "Red", "Purple", "Gold", "Silver"]),
    ("Eyebrows", &["Perturbed", "Normal", "Raised", "Furrowed", "Arched", "Thick", "Thin"]),
    ("Earring", &["Pepe", "None", "Gold Hoops", "Silver Studs", "Diamond", "Pearl"]),
    ("Eyes", &["Normal", "Sleepy", "Wink", "Angry", "Happy", "Surprised", "Closed", "Heart", "Laser"]),
    ("Mouth", &["Normal", "Smile", "Frown", "Open", "Tongue", "Kiss", "Grumpy", "Laugh"]),
    ("Hair", &["None", "Short", "Long", "Curly", "Afro", "Ponytail", "Bald", "Mohawk"]),
    ("Accessory", &["None", "Hat", "Glasses", "Crown", "Mask", "Chains"]),
];

const ACTIVITY_COUNT: usize = 50;

/// Rounds to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// First four bytes of `sha256(key)` read big endian
pub fn color_seed(key: &str) -> u32 {
    let digest = Sha256::digest(key.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

fn pick_color(palette: &[&'static str], key: &str) -> &'static str {
    palette[color_seed(key) as usize % palette.len()]
}

fn placeholder_url(size: u32, color: &str, caption: &str, token_id: u32) -> String {
    format!(
        "https://via.placeholder.com/{size}x{size}/{color}/ffffff?text={}+{token_id}",
        caption.replace(' ', "+")
    )
}

/// Finds a collection by id (`hypio-babies`) or slug (`hypio`)
pub fn find_collection(key: &str) -> Option<&'static Collection> {
    COLLECTIONS.iter().find(|c| c.id == key || c.slug == key)
}

/// The collection used when a request names none
pub fn default_collection() -> &'static Collection {
    &COLLECTIONS[0]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trait {
    pub trait_type: String,
    pub value: String,
}

impl Trait {
    fn new(trait_type: &str, value: &str) -> Self {
        Self { trait_type: trait_type.to_string(), value: value.to_string() }
    }

    /// Whether `needle` (already lowercased) occurs in the type or the value
    fn mentions(&self, needle: &str) -> bool {
        self.trait_type.to_lowercase().contains(needle) || self.value.to_lowercase().contains(needle)
    }
}

/// An exact trait a search result must carry, written `Type:Value`
///
/// Both halves compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitFilter {
    pub trait_type: String,
    pub value: String,
}

impl TraitFilter {
    pub fn matches(&self, t: &Trait) -> bool {
        t.trait_type.eq_ignore_ascii_case(&self.trait_type) && t.value.eq_ignore_ascii_case(&self.value)
    }
}

impl FromStr for TraitFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((kind, value)) if !kind.trim().is_empty() && !value.trim().is_empty() => Ok(TraitFilter {
                trait_type: kind.trim().to_string(),
                value: value.trim().to_string(),
            }),
            _ => Err(format!("Invalid trait filter '{}': expected Type:Value", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewNft {
    pub token_id: u32,
    pub image: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceLinks {
    pub drip_trade: String,
    pub hyperliquid_explorer: String,
}

/// A collection as shown on the trending board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingCollection {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub contract: String,
    pub floor_price: f64,
    pub volume_24h: f64,
    pub volume_total: f64,
    pub volume_change: f64,
    pub total_supply: u32,
    pub owners: u32,
    pub items_listed: u32,
    pub creator: String,
    pub verified: bool,
    pub chain: String,
    pub chain_id: u32,
    pub created_date: String,
    pub preview_nfts: Vec<PreviewNft>,
    pub banner_image: String,
    pub featured_image: String,
    pub marketplace_links: MarketplaceLinks,
}

impl From<&Collection> for TrendingCollection {
    fn from(c: &Collection) -> Self {
        let preview_caption: String = c.name.chars().take(4).collect();
        let preview_nfts = c
            .featured_ids
            .iter()
            .map(|&token_id| {
                let color = pick_color(c.preview_palette, &format!("{}_{}", c.slug, token_id));
                PreviewNft {
                    token_id,
                    image: placeholder_url(200, color, &preview_caption, token_id),
                    name: format!("{} #{}", c.name, token_id),
                }
            })
            .collect();

        TrendingCollection {
            id: c.id.to_string(),
            slug: c.slug.to_string(),
            name: c.name.to_string(),
            description: c.description.to_string(),
            contract: c.contract.to_string(),
            floor_price: c.floor_price,
            volume_24h: c.volume_24h,
            volume_total: c.volume_total,
            volume_change: c.volume_change,
            total_supply: c.total_supply,
            owners: c.owners,
            items_listed: c.items_listed,
            creator: c.creator.to_string(),
            verified: true,
            chain: CHAIN_NAME.to_string(),
            chain_id: CHAIN_ID,
            created_date: c.created_date.to_string(),
            preview_nfts,
            banner_image: format!(
                "https://via.placeholder.com/1200x400/2dd4bf/ffffff?text={}+Collection",
                c.name.replace(' ', "+")
            ),
            featured_image: format!(
                "https://via.placeholder.com/400x400/2dd4bf/ffffff?text={}+NFT",
                preview_caption.replace(' ', "+")
            ),
            marketplace_links: MarketplaceLinks {
                drip_trade: format!("https://drip.trade/collections/{}", c.slug),
                hyperliquid_explorer: format!("https://hyperliquid.cloud.blockscout.com/token/{}", c.contract),
            },
        }
    }
}

/// A row in the collection index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub floor_price: f64,
    pub total_volume: f64,
    pub total_supply: u32,
    pub owners: u32,
    pub verified: bool,
    pub chain: String,
    pub contract: String,
}

/// One token on a collection listing page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftListing {
    pub id: String,
    pub token_id: u32,
    pub name: String,
    pub image: String,
    pub price: f64,
    pub last_sale: f64,
    pub listed: bool,
    pub rarity_rank: u32,
    pub traits: Vec<Trait>,
    pub contract: String,
    pub blockchain: String,
    pub chain_id: u32,
    pub marketplace_url: String,
    pub explorer_url: String,
}

impl NftListing {
    /// Replaces the fixture name and image with whatever HyperScan returned
    pub fn apply_remote(&mut self, remote: RemoteMetadata) {
        if let Some(image) = remote.image {
            self.image = image;
        }
        if let Some(name) = remote.name {
            self.name = name;
        }
    }
}

/// The full view of a single token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftDetail {
    pub id: String,
    pub token_id: u32,
    pub name: String,
    pub collection: String,
    pub contract: String,
    pub image: String,
    pub price: f64,
    pub last_sale: f64,
    pub listed: bool,
    pub floor_price: f64,
    pub currency: String,
    pub traits: Vec<Trait>,
    pub blockchain: String,
    pub chain_id: u32,
    pub marketplace_url: String,
    pub explorer_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchStatus {
    Upcoming,
    Live,
    SoldOut,
}

#[derive(Debug, Clone, Serialize)]
pub struct LaunchpadProject {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub mint_price: f64,
    pub total_supply: u32,
    pub minted: u32,
    pub launch_date: DateTime<Utc>,
    pub status: LaunchStatus,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitelist_spots: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitelist_filled: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_price: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityKind {
    Sale,
    Listing,
    Transfer,
    Mint,
    Offer,
}

const ACTIVITY_KINDS: [ActivityKind; 5] = [
    ActivityKind::Sale,
    ActivityKind::Listing,
    ActivityKind::Transfer,
    ActivityKind::Mint,
    ActivityKind::Offer,
];

#[derive(Debug, Clone, Serialize)]
pub struct ActivityNft {
    pub name: String,
    pub image: String,
    pub collection: String,
}

/// A simulated marketplace event; carries no hashes or wallet addresses
#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub nft: ActivityNft,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
    pub simulated: bool,
}

/// One trending entry per collection, in fixture order
pub fn trending_collections() -> Vec<TrendingCollection> {
    COLLECTIONS.iter().map(TrendingCollection::from).collect()
}

/// The collection index
pub fn collections() -> Vec<CollectionSummary> {
    COLLECTIONS
        .iter()
        .map(|c| CollectionSummary {
            id: c.id.to_string(),
            name: c.name.to_string(),
            description: c.description.to_string(),
            image: placeholder_url(300, c.preview_palette[0], c.short_name, c.featured_ids[0]),
            floor_price: c.floor_price,
            total_volume: c.volume_total,
            total_supply: c.total_supply,
            owners: c.owners,
            verified: true,
            chain: CHAIN_NAME.to_string(),
            contract: c.contract.to_string(),
        })
        .collect()
}

/// The trending entry for one collection, looked up by id or slug
pub fn collection(key: &str) -> Option<TrendingCollection> {
    find_collection(key).map(TrendingCollection::from)
}

/// Maps a token id past the end of the collection back into `1..=supply`
pub fn wrap_token_id(token_id: u32, supply: u32) -> u32 {
    if token_id > supply {
        (token_id % supply) + 1
    } else {
        token_id
    }
}

/// Builds the listing for one token from its id alone
pub fn nft_listing(c: &Collection, token_id: u32) -> NftListing {
    let floor = c.floor_price;
    let color = pick_color(c.listing_palette, &format!("{}_{}", c.id, token_id));
    let traits = c
        .traits
        .iter()
        .map(|(kind, values)| Trait::new(kind, values[token_id as usize % values.len()]))
        .collect();

    NftListing {
        id: token_id.to_string(),
        token_id,
        name: format!("{} #{}", c.name, token_id),
        image: placeholder_url(400, color, c.short_name, token_id),
        price: round2(floor + f64::from(token_id % 100) * 0.5),
        last_sale: round2(floor - 2.0 + f64::from(token_id % 80) * 0.3),
        listed: token_id % 3 == 0,
        rarity_rank: token_id,
        traits,
        contract: c.contract.to_string(),
        blockchain: CHAIN_NAME.to_string(),
        chain_id: CHAIN_ID,
        marketplace_url: format!("https://drip.trade/collections/{}/{}", c.id, token_id),
        explorer_url: format!(
            "https://hyperliquid.cloud.blockscout.com/token/{}/instance/{}",
            c.contract, token_id
        ),
    }
}

/// A page of listings
///
/// `count` is clamped to `1..=50`. Without a `start` the page begins at a
/// random token so repeated visits browse different parts of the collection.
pub fn collection_nfts<R: Rng + ?Sized>(
    c: &Collection,
    count: Option<u32>,
    start: Option<u32>,
    rng: &mut R,
) -> Vec<NftListing> {
    let count = count.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let start = match start {
        Some(start) => start.max(1),
        None => rng.random_range(1..=c.total_supply.saturating_sub(count).max(1)),
    };

    (0..count)
        .map(|i| nft_listing(c, wrap_token_id(start.saturating_add(i), c.total_supply)))
        .collect()
}

/// Searches a collection's listings
///
/// A numeric query looks up that token id. Any other query matches tokens
/// whose name, trait type or trait value contains it, ignoring case; an
/// empty query matches every token. Results must also carry every trait in
/// `filters`. Tokens are scanned in id order and at most `count` (default
/// 20, clamped to `1..=50`) are returned.
pub fn search_nfts(c: &Collection, query: &str, filters: &[TraitFilter], count: Option<u32>) -> Vec<NftListing> {
    let count = count.unwrap_or(DEFAULT_SEARCH_LIMIT).clamp(1, MAX_PAGE_SIZE) as usize;
    let query = query.trim();
    let has_filters = |nft: &NftListing| {
        filters.iter().all(|filter| nft.traits.iter().any(|t| filter.matches(t)))
    };

    if !query.is_empty() && query.bytes().all(|b| b.is_ascii_digit()) {
        return query
            .parse::<u32>()
            .ok()
            .filter(|id| (1..=c.total_supply).contains(id))
            .map(|id| nft_listing(c, id))
            .filter(|nft| has_filters(nft))
            .into_iter()
            .collect();
    }

    let needle = query.to_lowercase();
    (1..=c.total_supply)
        .map(|id| nft_listing(c, id))
        .filter(|nft| {
            needle.is_empty()
                || nft.name.to_lowercase().contains(&needle)
                || nft.traits.iter().any(|t| t.mentions(&needle))
        })
        .filter(|nft| has_filters(nft))
        .take(count)
        .collect()
}

/// Every trait value some token in the collection carries, by trait type
///
/// Values are sorted alphabetically.
pub fn collection_traits(c: &Collection) -> BTreeMap<String, Vec<String>> {
    c.traits
        .iter()
        .map(|(kind, values)| {
            // Token ids cycle through every index once supply reaches the value count
            let seen: BTreeSet<&str> = (1..=c.total_supply.min(values.len() as u32))
                .map(|id| values[id as usize % values.len()])
                .collect();
            (kind.to_string(), seen.into_iter().map(str::to_string).collect())
        })
        .collect()
}

/// The detail view for a token, or `None` when the id is outside the collection
///
/// Traits, price and listing state come from an RNG seeded with the token id,
/// so the same token always looks the same.
pub fn nft_detail(c: &Collection, token_id: u32) -> Option<NftDetail> {
    if token_id == 0 || token_id > c.total_supply {
        return None;
    }

    let mut rng = StdRng::seed_from_u64(u64::from(token_id));
    let traits = DETAIL_TRAITS
        .iter()
        .filter_map(|(kind, values)| values.choose(&mut rng).map(|value| Trait::new(kind, value)))
        .collect();

    let price = round2(c.floor_price * rng.random_range(0.85..2.5));
    let last_sale = round2(price * rng.random_range(0.85..0.95));
    let listed = rng.random_bool(0.6);
    let listing = nft_listing(c, token_id);

    Some(NftDetail {
        id: listing.id,
        token_id,
        name: listing.name,
        collection: c.id.to_string(),
        contract: listing.contract,
        image: listing.image,
        price,
        last_sale,
        listed,
        floor_price: c.floor_price,
        currency: "HYPE".to_string(),
        traits,
        blockchain: listing.blockchain,
        chain_id: CHAIN_ID,
        marketplace_url: listing.marketplace_url,
        explorer_url: listing.explorer_url,
    })
}

/// Launchpad projects relative to `now`
pub fn launchpad(now: DateTime<Utc>) -> Vec<LaunchpadProject> {
    vec![
        LaunchpadProject {
            id: "quantum-beings".to_string(),
            name: "Quantum Beings".to_string(),
            description: "AI-generated quantum entities living on HyperEVM".to_string(),
            image: "https://via.placeholder.com/600x400/8b5cf6/ffffff?text=Quantum+Beings".to_string(),
            mint_price: 0.5,
            total_supply: 8888,
            minted: 3247,
            launch_date: now + Duration::days(2),
            status: LaunchStatus::Upcoming,
            verified: true,
            whitelist_spots: Some(2000),
            whitelist_filled: Some(1567),
            floor_price: None,
        },
        LaunchpadProject {
            id: "defi-warriors".to_string(),
            name: "DeFi Warriors".to_string(),
            description: "Elite warriors protecting the DeFi ecosystem".to_string(),
            image: "https://via.placeholder.com/600x400/ef4444/ffffff?text=DeFi+Warriors".to_string(),
            mint_price: 0.25,
            total_supply: 5000,
            minted: 5000,
            launch_date: now - Duration::days(7),
            status: LaunchStatus::SoldOut,
            verified: true,
            whitelist_spots: None,
            whitelist_filled: None,
            floor_price: Some(2.1),
        },
        LaunchpadProject {
            id: "hyperliquid-spirits".to_string(),
            name: "HyperLiquid Spirits".to_string(),
            description: "Mystical spirits of the HyperLiquid protocol".to_string(),
            image: "https://via.placeholder.com/600x400/2dd4bf/ffffff?text=HyperLiquid+Spirits".to_string(),
            mint_price: 0.8,
            total_supply: 3333,
            minted: 1892,
            launch_date: now,
            status: LaunchStatus::Live,
            verified: true,
            whitelist_spots: Some(1000),
            whitelist_filled: Some(743),
            floor_price: None,
        },
    ]
}

/// A simulated activity feed for the default collection
pub fn activities<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Vec<Activity> {
    let c = default_collection();

    (0..ACTIVITY_COUNT)
        .map(|i| {
            let token_id = rng.random_range(1..=c.total_supply);
            let kind = ACTIVITY_KINDS[rng.random_range(0..ACTIVITY_KINDS.len())];
            let color = pick_color(c.listing_palette, &format!("{}_{}", c.id, token_id));
            Activity {
                id: format!("activity_{}", i),
                kind,
                nft: ActivityNft {
                    name: format!("{} #{}", c.name, token_id),
                    image: placeholder_url(100, color, c.short_name, token_id),
                    collection: c.name.to_string(),
                },
                price: round2(rng.random_range(45.0..=150.0)),
                timestamp: now - Duration::minutes(rng.random_range(1..=1440)),
                simulated: true,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests;

#[cfg(test)]
mod prop_tests;
