use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

const USER_AGENT: &str = "HyperFlow-NFT-Marketplace/1.0";
const IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

/// Name and image reported by the explorer for one token
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RemoteMetadata {
    pub name: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenInstance {
    metadata: Option<RemoteMetadata>,
}

/// Rewrites `ipfs://<cid>` into a public gateway URL; other URLs pass through
pub fn normalize_image_url(url: &str) -> String {
    match url.strip_prefix("ipfs://") {
        Some(cid) => format!("{}{}", IPFS_GATEWAY, cid),
        None => url.to_string(),
    }
}

/// Pulls the usable metadata out of a token-instance response body
pub fn parse_instance(body: &str) -> Option<RemoteMetadata> {
    let instance: TokenInstance = serde_json::from_str(body).ok()?;
    let metadata = instance.metadata?;
    if metadata.name.is_none() && metadata.image.is_none() {
        return None;
    }
    Some(RemoteMetadata {
        name: metadata.name,
        image: metadata.image.as_deref().map(normalize_image_url),
    })
}

/// Best-effort client for the HyperScan token-instance API
///
/// Lookups never fail from the caller's point of view. Any problem is logged
/// and reported as `None`, leaving the fixture data in place.
#[derive(Debug, Clone)]
pub struct HyperScanClient {
    base_url: String,
    client: Client,
}

impl HyperScanClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn instance_url(&self, contract: &str, token_id: u32) -> String {
        format!("{}/api/v2/tokens/{}/instances/{}", self.base_url, contract, token_id)
    }

    /// Fetches the explorer's metadata for one token
    pub async fn fetch(&self, contract: &str, token_id: u32) -> Option<RemoteMetadata> {
        let url = self.instance_url(contract, token_id);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("HyperScan request for token {} failed: {}", token_id, err);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("HyperScan returned {} for token {}", response.status(), token_id);
            return None;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                warn!("HyperScan body for token {} unreadable: {}", token_id, err);
                return None;
            }
        };

        let metadata = parse_instance(&body);
        if metadata.is_none() {
            warn!("HyperScan response for token {} had no usable metadata", token_id);
        } else {
            debug!("Fetched remote metadata for token {}", token_id);
        }
        metadata
    }
}
