use clap::Subcommand;

use crate::client::HyperflowClient;
use crate::output::{self, OutputConfig};

/// Marketplace browsing commands
#[derive(Subcommand, Debug)]
pub enum MarketCommands {
    /// Show the trending collections
    Trending,
    /// List collection summaries
    Collections,
    /// List a page of NFTs from a collection
    Nfts {
        /// Collection id or slug (defaults to Hypio Babies)
        #[clap(long)]
        collection: Option<String>,
        /// Number of NFTs to list (1-50)
        #[clap(long)]
        count: Option<u32>,
        /// First token id of the page (random when omitted)
        #[clap(long)]
        start: Option<u32>,
    },
    /// Show a single NFT
    Nft {
        /// The token id
        token_id: u32,
        /// Collection id or slug (defaults to Hypio Babies)
        #[clap(long)]
        collection: Option<String>,
    },
}

/// Executes a marketplace command
pub async fn execute(
    client: &HyperflowClient,
    cmd: MarketCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        MarketCommands::Trending => {
            let collections = client.trending_collections().await?;
            output::print_trending(&collections, config);
        }
        MarketCommands::Collections => {
            let collections = client.collections().await?;
            output::print_collections(&collections, config);
        }
        MarketCommands::Nfts { collection, count, start } => {
            let listings = client.collection_nfts(collection.as_deref(), count, start).await?;
            output::print_listings(&listings, config);
        }
        MarketCommands::Nft { token_id, collection } => {
            let nft = client.nft(token_id, collection.as_deref()).await?;
            output::print_nft(&nft, config);
        }
    }
    Ok(())
}
