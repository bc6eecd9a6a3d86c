use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use hyperflow::config::{self, CliArgs};
use hyperflow::logging::{init_logging, LogSettings};
use hyperflow::metadata::HyperScanClient;
use hyperflow::{crash, create_app, db, live, AppState};
use tracing::{info, warn};

/// Resolves when Ctrl-C is received
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Load environment variables
    if dotenv::dotenv().is_ok() {
        println!("Loaded .env file");
    }

    let debug = args.debug;
    let config = config::get_config(args);

    // The guard flushes the file log when dropped at the end of main
    let _log_guard = init_logging(&LogSettings::new(&config, debug));
    info!(
        "Configuration: database_url={}, listen={}, live_tick={}ms, remote_metadata={}",
        config.database_url,
        config.listen_addr(),
        config.live_tick_ms,
        config.remote_metadata
    );

    // Initialize the database pool
    let pool = db::init_pool(&config.database_url)?;
    {
        let mut conn = pool.get().context("Failed to get a database connection")?;
        db::run_migrations(&mut conn)?;
    }

    let mut state = AppState::new(Arc::new(pool)).with_sol_price(config.sol_price_usd);
    if config.remote_metadata {
        let client = HyperScanClient::new(&config.hyperscan_url, config.metadata_timeout())?;
        info!("Remote metadata enabled via {}", config.hyperscan_url);
        state = state.with_metadata(client);
    }

    let ticker = live::spawn_ticker(state.live.clone(), config.live_tick_interval());
    let crash_loop = crash::spawn_round_loop(state.crash.clone(), crash::CRASH_TICK);

    let app = create_app(state);

    let listen_addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", listen_addr))?;

    info!("HyperFlow demo marketplace listening on http://{}", listen_addr);
    info!("All marketplace, trading and protocol figures are demo data");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    ticker.abort();
    crash_loop.abort();
    info!("Server stopped");

    Ok(())
}
