use clap::Subcommand;
use hyperflow::scratch::CardType;

use crate::client::HyperflowClient;
use crate::output::{self, OutputConfig};

fn parse_card_type(raw: &str) -> Result<CardType, String> {
    raw.parse()
}

/// Scratch-card commands
#[derive(Subcommand, Debug)]
pub enum ScratchCommands {
    /// Scratch one card (bronze, silver, gold or diamond)
    Play {
        #[clap(value_parser = parse_card_type)]
        card_type: CardType,
    },
    /// Show the game statistics
    Stats,
}

/// Executes a scratch-card command
pub async fn execute(
    client: &HyperflowClient,
    cmd: ScratchCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ScratchCommands::Play { card_type } => {
            let card = client.scratch_card(card_type).await?;
            output::print_card(&card, config);
        }
        ScratchCommands::Stats => {
            let stats = client.scratch_stats().await?;
            output::print_scratch_stats(&stats, config);
        }
    }
    Ok(())
}
