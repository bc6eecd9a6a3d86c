use std::path::PathBuf;

use clap::Subcommand;
use hyperflow::art;

use crate::output::{self, OutputConfig};

/// Procedural art commands; these run locally without a server
#[derive(Subcommand, Debug)]
pub enum ArtCommands {
    /// Render a collection of PNGs with metadata into a directory
    Generate {
        /// Number of tokens to render (1-100)
        #[clap(long, default_value_t = 10)]
        count: u32,
        /// Output directory
        #[clap(long, default_value = "generated_art")]
        out: PathBuf,
    },
}

/// Executes an art command
pub fn execute(cmd: ArtCommands, config: &OutputConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ArtCommands::Generate { count, out } => {
            let manifest = art::generate_collection(&out, count)?;
            output::print_manifest(&manifest, &out, config);
        }
    }
    Ok(())
}
