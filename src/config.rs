use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use directories::ProjectDirs;
use clap::Parser;
use std::fs;
use tracing::{info, warn};

/// Configuration for the HyperFlow server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL for the database connection
    pub database_url: String,
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Milliseconds between live feed updates
    pub live_tick_ms: u64,
    /// Base URL of the HyperScan explorer API
    pub hyperscan_url: String,
    /// Whether NFT listings try HyperScan before falling back to fixtures
    pub remote_metadata: bool,
    /// Timeout for a single HyperScan request in milliseconds
    pub metadata_timeout_ms: u64,
    /// SOL price used to value whale wallets
    pub sol_price_usd: f64,
    /// Directory for rolling log files, if any
    pub log_dir: Option<PathBuf>,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub bind_address: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub live_tick_ms: Option<u64>,
    #[serde(default)]
    pub hyperscan_url: Option<String>,
    #[serde(default)]
    pub remote_metadata: Option<bool>,
    #[serde(default)]
    pub metadata_timeout_ms: Option<u64>,
    #[serde(default)]
    pub sol_price_usd: Option<f64>,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default)]
    pub log_json: Option<bool>,
    /// Server URL used by the CLI client; ignored by the server
    #[serde(default)]
    pub server_url: Option<String>,
}

/// Command line arguments for the server
#[derive(Parser, Debug, Default)]
#[clap(name = "hyperflow", about = "HyperFlow demo marketplace server")]
pub struct CliArgs {
    /// Database URL
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Bind address
    #[clap(long, env = "HYPERFLOW_BIND")]
    pub bind_address: Option<String>,

    /// Listen port
    #[clap(long, env = "HYPERFLOW_PORT")]
    pub port: Option<u16>,

    /// Live feed tick interval in milliseconds
    #[clap(long, env = "HYPERFLOW_LIVE_TICK_MS")]
    pub live_tick_ms: Option<u64>,

    /// HyperScan API base URL
    #[clap(long, env = "HYPERSCAN_URL")]
    pub hyperscan_url: Option<String>,

    /// Fetch NFT metadata from HyperScan
    #[clap(long, env = "HYPERFLOW_REMOTE_METADATA")]
    pub remote_metadata: Option<bool>,

    /// HyperScan request timeout in milliseconds
    #[clap(long, env = "HYPERFLOW_METADATA_TIMEOUT_MS")]
    pub metadata_timeout_ms: Option<u64>,

    /// SOL price in USD for the whale dashboard
    #[clap(long, env = "HYPERFLOW_SOL_PRICE_USD")]
    pub sol_price_usd: Option<f64>,

    /// Directory for rolling log files
    #[clap(long, env = "HYPERFLOW_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Emit JSON logs
    #[clap(long, env = "HYPERFLOW_LOG_JSON")]
    pub log_json: Option<bool>,

    /// Debug mode
    #[clap(long, env = "HYPERFLOW_DEBUG", default_value_t = false)]
    pub debug: bool,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            database_url: update.database_url.unwrap_or(self.database_url),
            bind_address: update.bind_address.unwrap_or(self.bind_address),
            port: update.port.unwrap_or(self.port),
            live_tick_ms: update.live_tick_ms.unwrap_or(self.live_tick_ms),
            hyperscan_url: update.hyperscan_url.unwrap_or(self.hyperscan_url),
            remote_metadata: update.remote_metadata.unwrap_or(self.remote_metadata),
            metadata_timeout_ms: update.metadata_timeout_ms.unwrap_or(self.metadata_timeout_ms),
            sol_price_usd: update.sol_price_usd.unwrap_or(self.sol_price_usd),
            log_dir: update.log_dir.or(self.log_dir),
            log_json: update.log_json.unwrap_or(self.log_json),
        }
    }

    /// Returns the live feed tick interval as a Duration
    pub fn live_tick_interval(&self) -> Duration {
        Duration::from_millis(self.live_tick_ms.max(1))
    }

    /// Returns the HyperScan request timeout as a Duration
    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_millis(self.metadata_timeout_ms)
    }

    /// The `host:port` string the server listens on
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Returns the base (default) configuration
pub fn base_config(config_path: Option<PathBuf>) -> Config {
    let database_url = config_path.map_or("hyperflow.db".to_string(), |path| {
        path.join("hyperflow.db").to_string_lossy().to_string()
    });

    Config {
        database_url,
        bind_address: "0.0.0.0".to_string(),
        port: 5000,
        live_tick_ms: 2000,
        hyperscan_url: "https://www.hyperscan.com".to_string(),
        remote_metadata: false,
        metadata_timeout_ms: 3000,
        sol_price_usd: 100.0,
        log_dir: None,
        log_json: false,
    }
}

/// Loads configuration from a TOML file
pub fn config_from_file(config_path: Option<PathBuf>) -> Result<ConfigUpdate, String> {
    let Some(config_path) = config_path else {
        return Ok(ConfigUpdate::default());
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    match fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str::<ConfigUpdate>(&content) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", config_path);
                Ok(config)
            },
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                Err(format!("Failed to parse config file: {}", e))
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            Err(format!("Failed to read config file: {}", e))
        }
    }
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        database_url: args.database_url,
        bind_address: args.bind_address,
        port: args.port,
        live_tick_ms: args.live_tick_ms,
        hyperscan_url: args.hyperscan_url,
        remote_metadata: args.remote_metadata,
        metadata_timeout_ms: args.metadata_timeout_ms,
        sol_price_usd: args.sol_price_usd,
        log_dir: args.log_dir,
        log_json: args.log_json,
        server_url: None,
    }
}

/// Returns the XDG config directory for HyperFlow, if one can be determined
pub fn get_config_dir_path() -> Option<PathBuf> {
    match ProjectDirs::from("xyz", "hyperflow", "hyperflow") {
        Some(proj_dirs) => Some(proj_dirs.config_dir().to_path_buf()),
        None => {
            warn!("Could not determine XDG config directory, skipping config file");
            None
        }
    }
}

/// Gets the complete configuration by combining defaults with
/// values from config file, environment variables, and command line arguments
/// in order of increasing precedence
pub fn get_config(args: CliArgs) -> Config {
    let config_path = get_config_dir_path().and_then(|path| {
        if !path.exists() {
            info!("Config path not found at {:?}, using defaults", path);
            None
        } else {
            Some(path)
        }
    });

    let base = base_config(config_path.clone());
    let file_update = config_from_file(config_path.map(|p| p.join("config.toml"))).unwrap_or_default();

    base
        .apply_update(file_update)
        .apply_update(config_from_args(args))
}

#[cfg(test)]
mod tests;
#[cfg(test)]
mod prop_tests;
