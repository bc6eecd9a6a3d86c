use std::sync::Arc;

use axum::extract::FromRef;
use tokio::sync::Mutex;

use crate::crash::{self, CrashFeed};
use crate::db::DbPool;
use crate::live::{self, LiveFeed};
use crate::metadata::HyperScanClient;
use crate::scratch::ScratchGame;

/// Everything the request handlers share
///
/// Handlers that only need one part extract it directly, e.g.
/// `State(pool): State<Arc<DbPool>>`.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<DbPool>,
    pub scratch: Arc<Mutex<ScratchGame>>,
    pub live: LiveFeed,
    pub crash: CrashFeed,
    pub metadata: Option<HyperScanClient>,
    pub sol_price_usd: f64,
}

impl AppState {
    /// State with fresh games and feed, no remote metadata and SOL at $100
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            pool,
            scratch: Arc::new(Mutex::new(ScratchGame::new())),
            live: live::new_feed(),
            crash: crash::new_feed(),
            metadata: None,
            sol_price_usd: 100.0,
        }
    }

    pub fn with_metadata(mut self, client: HyperScanClient) -> Self {
        self.metadata = Some(client);
        self
    }

    pub fn with_sol_price(mut self, sol_price_usd: f64) -> Self {
        self.sol_price_usd = sol_price_usd;
        self
    }
}

impl FromRef<AppState> for Arc<DbPool> {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Arc<Mutex<ScratchGame>> {
    fn from_ref(state: &AppState) -> Self {
        state.scratch.clone()
    }
}

impl FromRef<AppState> for LiveFeed {
    fn from_ref(state: &AppState) -> Self {
        state.live.clone()
    }
}

impl FromRef<AppState> for CrashFeed {
    fn from_ref(state: &AppState) -> Self {
        state.crash.clone()
    }
}
