mod client;
mod commands;
mod output;

use clap::{Parser, Subcommand};
use client::HyperflowClient;
use hyperflow::config;
use output::{OutputConfig, OutputFormat};
use std::process;

/// CLI for the HyperFlow demo marketplace
#[derive(Parser, Debug)]
#[clap(name = "hyperflow-cli", about = "CLI for the HyperFlow demo marketplace")]
struct Cli {
    /// Server URL to connect to
    #[clap(
        long,
        env = "HYPERFLOW_URL",
        global = true
    )]
    server_url: Option<String>,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::Human, global = true)]
    format: OutputFormat,

    /// Quiet mode: minimal output (just IDs or counts)
    #[clap(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Browse marketplace collections and NFTs
    #[command(subcommand)]
    Market(commands::market::MarketCommands),
    /// Manage the mint whitelist
    #[command(subcommand)]
    Whitelist(commands::whitelist::WhitelistCommands),
    /// Inspect and control the mint phases
    #[command(subcommand)]
    Phase(commands::phase::PhaseCommands),
    /// Record a mint in the server's ledger
    Mint(commands::mint::MintArgs),
    /// Play the scratch-card game
    #[command(subcommand)]
    Scratch(commands::scratch::ScratchCommands),
    /// Generate procedural art locally
    #[command(subcommand)]
    Art(commands::art::ArtCommands),
}

/// Resolves the server URL from CLI args, config file, or defaults
///
/// Precedence: CLI flag / env var > config file > default
fn resolve_server_url(cli_url: Option<String>) -> String {
    if let Some(url) = cli_url {
        return url;
    }

    // Try reading from config file
    let config_dir = config::get_config_dir_path();
    if let Some(ref dir) = config_dir {
        let config_path = dir.join("config.toml");
        if let Ok(update) = config::config_from_file(Some(config_path)) {
            if let Some(url) = update.server_url {
                return url;
            }
        }
    }

    "http://localhost:5000".to_string()
}

/// Formats an error for human-readable stderr output
fn format_error(err: &dyn std::error::Error) -> String {
    let err_string = err.to_string();

    if err_string.contains("error sending request")
        || err_string.contains("connection refused")
        || err_string.contains("Connection refused")
        || err_string.contains("tcp connect error")
    {
        return format!(
            "Could not connect to server. Is hyperflow running?\n  {}",
            err_string
        );
    }

    err_string
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let output_config = OutputConfig {
        format: cli.format,
        quiet: cli.quiet,
    };

    let client = HyperflowClient::new(resolve_server_url(cli.server_url));

    let result = match cli.command {
        Commands::Market(cmd) => commands::market::execute(&client, cmd, &output_config).await,
        Commands::Whitelist(cmd) => commands::whitelist::execute(&client, cmd, &output_config).await,
        Commands::Phase(cmd) => commands::phase::execute(&client, cmd, &output_config).await,
        Commands::Mint(args) => commands::mint::execute(&client, args, &output_config).await,
        Commands::Scratch(cmd) => commands::scratch::execute(&client, cmd, &output_config).await,
        Commands::Art(cmd) => commands::art::execute(cmd, &output_config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", format_error(e.as_ref()));
        process::exit(1);
    }
}
