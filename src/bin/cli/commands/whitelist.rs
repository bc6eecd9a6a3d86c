use std::fs;
use std::path::PathBuf;

use clap::Subcommand;

use crate::client::HyperflowClient;
use crate::output::{self, OutputConfig};

/// Whitelist management commands
#[derive(Subcommand, Debug)]
pub enum WhitelistCommands {
    /// List whitelisted addresses
    List,
    /// Whitelist a single address
    Add {
        /// The wallet address (0x followed by 40 hex digits)
        address: String,
    },
    /// Whitelist every address in the first column of a CSV file
    Import {
        /// Path to the CSV file
        file: PathBuf,
    },
}

/// Executes a whitelist command
pub async fn execute(
    client: &HyperflowClient,
    cmd: WhitelistCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        WhitelistCommands::List => {
            let whitelist = client.whitelist().await?;
            output::print_whitelist(&whitelist, config);
        }
        WhitelistCommands::Add { address } => {
            let response = client.add_whitelist(address).await?;
            output::print_success(
                &format!("{} ({} total)", response.message, response.total_count),
                config,
            );
        }
        WhitelistCommands::Import { file } => {
            let csv = fs::read_to_string(&file)
                .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
            let response = client.upload_csv(csv).await?;
            output::print_csv_upload(&response, config);
        }
    }
    Ok(())
}
