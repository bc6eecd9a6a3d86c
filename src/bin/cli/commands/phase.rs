use clap::Subcommand;
use hyperflow::dto::SetPhasesDto;

use crate::client::HyperflowClient;
use crate::output::{self, OutputConfig};

/// Mint phase commands
#[derive(Subcommand, Debug)]
pub enum PhaseCommands {
    /// Show the current phase and schedule
    Show,
    /// Force a phase (closed, whitelist or public)
    Set {
        /// The phase to force
        phase: String,
    },
    /// Schedule the whitelist and public windows (Unix timestamps in seconds)
    Schedule {
        whitelist_start: i64,
        whitelist_end: i64,
        public_start: i64,
        public_end: i64,
    },
    /// Stop minting immediately
    Pause,
}

/// Executes a phase command
pub async fn execute(
    client: &HyperflowClient,
    cmd: PhaseCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        PhaseCommands::Show => {
            let info = client.phase_info().await?;
            output::print_phase_info(&info, config);
        }
        PhaseCommands::Set { phase } => {
            let response = client.set_phase(phase).await?;
            output::print_success(&response.message, config);
        }
        PhaseCommands::Schedule { whitelist_start, whitelist_end, public_start, public_end } => {
            let schedule = SetPhasesDto { whitelist_start, whitelist_end, public_start, public_end };
            let response = client.set_phases(&schedule).await?;
            output::print_success(&response.message, config);
        }
        PhaseCommands::Pause => {
            let response = client.emergency_pause().await?;
            output::print_success(&response.message, config);
        }
    }
    Ok(())
}
