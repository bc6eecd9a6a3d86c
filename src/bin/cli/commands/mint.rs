use clap::Args;
use hyperflow::dto::MintDto;
use hyperflow::models::Currency;

use crate::client::HyperflowClient;
use crate::output::{self, OutputConfig};

/// Arguments for recording a mint
#[derive(Args, Debug)]
pub struct MintArgs {
    /// The minting wallet address
    pub address: String,
    /// Number of tokens to mint
    pub quantity: i64,
    /// Payment currency (ETH or HYPE)
    #[clap(long, default_value = "HYPE", value_parser = parse_currency)]
    pub currency: Currency,
}

fn parse_currency(raw: &str) -> Result<Currency, String> {
    raw.parse()
}

/// Executes the mint command
pub async fn execute(
    client: &HyperflowClient,
    args: MintArgs,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let dto = MintDto {
        address: args.address,
        quantity: args.quantity,
        currency: args.currency,
    };
    let response = client.mint(&dto).await?;
    output::print_mint(&response, config);
    Ok(())
}
