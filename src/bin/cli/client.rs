use hyperflow::catalog::{CollectionSummary, NftDetail, NftListing, TrendingCollection};
use hyperflow::dto::{
    AddWhitelistDto, AddWhitelistResponse, CsvUploadResponse, MessageResponse, MintDto,
    MintResponse, PhaseInfoResponse, SetPhaseDto, SetPhasesDto, WhitelistResponse,
};
use hyperflow::scratch::{CardResult, CardType, ScratchStats};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for CLI client operations
#[derive(Debug)]
pub enum ClientError {
    /// Server returned an error status with a message body
    Server { status: reqwest::StatusCode, message: String },
    /// Network/connection/request error
    Request(reqwest::Error),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status.as_u16(), message)
            }
            ClientError::Request(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Request(err) => Some(err),
            ClientError::Server { .. } => None,
        }
    }
}

/// Extension trait for checking HTTP responses and extracting server error messages
trait ResponseExt {
    /// Checks for error status and extracts the server's error message body
    async fn check(self) -> Result<reqwest::Response, ClientError>;
}

impl ResponseExt for reqwest::Response {
    async fn check(self) -> Result<reqwest::Response, ClientError> {
        if self.status().is_success() {
            return Ok(self);
        }
        let status = self.status();
        let message = match self.json::<serde_json::Value>().await {
            Ok(body) => body.get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("Unknown error")
                .to_string(),
            Err(_) => format!("HTTP {}", status),
        };
        Err(ClientError::Server { status, message })
    }
}

/// HTTP client wrapper for communicating with the HyperFlow server
pub struct HyperflowClient {
    /// The base URL of the server (e.g. "http://localhost:5000")
    base_url: String,
    /// The underlying HTTP client
    client: Client,
}

impl HyperflowClient {
    /// Creates a new HyperflowClient
    ///
    /// ### Arguments
    ///
    /// * `base_url` - The base URL of the HyperFlow server
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ClientError> {
        let response = self.client.get(self.url(path)).query(query).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    async fn post<B: serde::Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ClientError> {
        let response = self.client.post(self.url(path)).json(body).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    // ── Marketplace endpoints ────────────────────────────────────────

    /// Lists the trending collections
    pub async fn trending_collections(&self) -> Result<Vec<TrendingCollection>, ClientError> {
        self.get("/api/trending-collections", &[]).await
    }

    /// Lists collection summaries
    pub async fn collections(&self) -> Result<Vec<CollectionSummary>, ClientError> {
        self.get("/api/collections", &[]).await
    }

    /// Fetches a page of listings
    pub async fn collection_nfts(&self, collection: Option<&str>, count: Option<u32>, start: Option<u32>) -> Result<Vec<NftListing>, ClientError> {
        let mut params = Vec::new();
        if let Some(collection) = collection {
            params.push(("collection", collection.to_string()));
        }
        if let Some(count) = count {
            params.push(("count", count.to_string()));
        }
        if let Some(start) = start {
            params.push(("start", start.to_string()));
        }
        self.get("/api/collection-nfts", &params).await
    }

    /// Fetches one token's detail view
    pub async fn nft(&self, token_id: u32, collection: Option<&str>) -> Result<NftDetail, ClientError> {
        let params: Vec<(&str, String)> = collection
            .map(|c| vec![("collection", c.to_string())])
            .unwrap_or_default();
        self.get(&format!("/api/nft/{}", token_id), &params).await
    }

    // ── Whitelist endpoints ──────────────────────────────────────────

    /// Lists the whitelist
    pub async fn whitelist(&self) -> Result<WhitelistResponse, ClientError> {
        self.get("/api/whitelist", &[]).await
    }

    /// Whitelists a single address
    pub async fn add_whitelist(&self, address: String) -> Result<AddWhitelistResponse, ClientError> {
        self.post("/api/add-whitelist", &AddWhitelistDto { address }).await
    }

    /// Uploads raw CSV text for bulk whitelisting
    pub async fn upload_csv(&self, csv: String) -> Result<CsvUploadResponse, ClientError> {
        let response = self.client
            .post(self.url("/api/upload-csv"))
            .header(reqwest::header::CONTENT_TYPE, "text/csv")
            .body(csv)
            .send()
            .await
            .map_err(ClientError::Request)?
            .check()
            .await?;
        response.json().await.map_err(ClientError::Request)
    }

    // ── Phase endpoints ──────────────────────────────────────────────

    /// Fetches the current phase and schedule
    pub async fn phase_info(&self) -> Result<PhaseInfoResponse, ClientError> {
        self.get("/api/phase-info", &[]).await
    }

    /// Forces a phase
    pub async fn set_phase(&self, phase: String) -> Result<MessageResponse, ClientError> {
        self.post("/api/set-phase", &SetPhaseDto { phase }).await
    }

    /// Schedules the whitelist and public windows
    pub async fn set_phases(&self, schedule: &SetPhasesDto) -> Result<MessageResponse, ClientError> {
        self.post("/api/set-phases", schedule).await
    }

    /// Stops minting until a phase is forced again
    pub async fn emergency_pause(&self) -> Result<MessageResponse, ClientError> {
        self.post("/api/emergency-pause", &serde_json::json!({})).await
    }

    // ── Mint endpoint ────────────────────────────────────────────────

    /// Records a mint in the server's ledger
    pub async fn mint(&self, dto: &MintDto) -> Result<MintResponse, ClientError> {
        self.post("/api/mint", dto).await
    }

    // ── Scratch card endpoints ───────────────────────────────────────

    /// Scratches one card
    pub async fn scratch_card(&self, card_type: CardType) -> Result<CardResult, ClientError> {
        self.get("/api/scratch-card", &[("type", card_type.to_string())]).await
    }

    /// Fetches the game statistics
    pub async fn scratch_stats(&self) -> Result<ScratchStats, ClientError> {
        self.get("/api/scratch-stats", &[]).await
    }
}
