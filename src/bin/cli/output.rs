use std::path::Path;

use chrono::DateTime;
use clap::ValueEnum;
use hyperflow::art::CollectionManifest;
use hyperflow::catalog::{CollectionSummary, NftDetail, NftListing, TrendingCollection};
use hyperflow::dto::{CsvUploadResponse, MintResponse, PhaseInfoResponse, WhitelistResponse};
use hyperflow::scratch::{CardResult, ScratchStats};
use serde::Serialize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Bundled output configuration passed to all print functions
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// The output format
    pub format: OutputFormat,
    /// When true, print minimal output (just IDs or counts)
    pub quiet: bool,
}

/// Pretty-prints any response as JSON
fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => eprintln!("Failed to encode output: {}", err),
    }
}

fn format_timestamp(seconds: i64) -> String {
    if seconds == 0 {
        return "unset".to_string();
    }
    DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| seconds.to_string())
}

/// Prints the trending collections
pub fn print_trending(collections: &[TrendingCollection], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                for c in collections {
                    println!("{}", c.id);
                }
                return;
            }
            let max_name = collections.iter().map(|c| c.name.len()).max().unwrap_or(4);
            println!("{:<width$}  {:>8}  {:>10}  {:>7}", "NAME", "FLOOR", "VOL 24H", "CHANGE", width = max_name);
            for c in collections {
                println!(
                    "{:<width$}  {:>8.2}  {:>10.1}  {:>+6.1}%",
                    c.name, c.floor_price, c.volume_24h, c.volume_change,
                    width = max_name,
                );
            }
        }
        OutputFormat::Json => print_json(collections),
    }
}

/// Prints the collection summaries
pub fn print_collections(collections: &[CollectionSummary], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                for c in collections {
                    println!("{}", c.id);
                }
                return;
            }
            let max_id = collections.iter().map(|c| c.id.len()).max().unwrap_or(2);
            println!("{:<width$}  {:>6}  {:>8}  CONTRACT", "ID", "SUPPLY", "FLOOR", width = max_id);
            for c in collections {
                println!(
                    "{:<width$}  {:>6}  {:>8.2}  {}",
                    c.id, c.total_supply, c.floor_price, c.contract,
                    width = max_id,
                );
            }
        }
        OutputFormat::Json => print_json(collections),
    }
}

/// Prints a page of listings
pub fn print_listings(listings: &[NftListing], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if listings.is_empty() {
                if !config.quiet {
                    println!("No listings found.");
                }
                return;
            }
            if config.quiet {
                for nft in listings {
                    println!("{}", nft.token_id);
                }
                return;
            }
            let max_name = listings.iter().map(|n| n.name.len()).max().unwrap_or(4);
            println!("{:<width$}  {:>8}  {:>9}  LISTED", "NAME", "PRICE", "LAST SALE", width = max_name);
            for nft in listings {
                println!(
                    "{:<width$}  {:>8.2}  {:>9.2}  {}",
                    nft.name, nft.price, nft.last_sale, if nft.listed { "yes" } else { "no" },
                    width = max_name,
                );
            }
        }
        OutputFormat::Json => print_json(listings),
    }
}

/// Prints one token's detail view
pub fn print_nft(nft: &NftDetail, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", nft.token_id);
                return;
            }
            println!("Name:       {}", nft.name);
            println!("Collection: {}", nft.collection);
            println!("Price:      {:.2} {}", nft.price, nft.currency);
            println!("Last sale:  {:.2} {}", nft.last_sale, nft.currency);
            println!("Listed:     {}", if nft.listed { "yes" } else { "no" });
            println!("Traits:");
            for t in &nft.traits {
                println!("  {}: {}", t.trait_type, t.value);
            }
            println!("Explorer:   {}", nft.explorer_url);
        }
        OutputFormat::Json => print_json(nft),
    }
}

/// Prints the whitelist
pub fn print_whitelist(whitelist: &WhitelistResponse, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", whitelist.count);
                return;
            }
            if whitelist.whitelist.is_empty() {
                println!("Whitelist is empty.");
                return;
            }
            for address in &whitelist.whitelist {
                println!("{}", address);
            }
            println!("{} addresses", whitelist.count);
        }
        OutputFormat::Json => print_json(whitelist),
    }
}

/// Prints the result of a CSV import
pub fn print_csv_upload(upload: &CsvUploadResponse, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", upload.added_count);
                return;
            }
            println!("{}", upload.message);
            println!("Whitelist now holds {} addresses", upload.total_count);
        }
        OutputFormat::Json => print_json(upload),
    }
}

/// Prints the current phase and schedule
pub fn print_phase_info(info: &PhaseInfoResponse, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", info.current_phase);
                return;
            }
            println!("Current phase:   {}", info.current_phase);
            println!("Whitelist start: {}", format_timestamp(info.whitelist_start));
            println!("Whitelist end:   {}", format_timestamp(info.whitelist_end));
            println!("Public start:    {}", format_timestamp(info.public_start));
            println!("Public end:      {}", format_timestamp(info.public_end));
            if info.time_until_next_phase > 0 {
                println!("Next phase in:   {}s", info.time_until_next_phase);
            }
        }
        OutputFormat::Json => print_json(info),
    }
}

/// Prints a recorded mint
pub fn print_mint(mint: &MintResponse, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", mint.mint.id);
                return;
            }
            println!("{}", mint.message);
            println!("Ledger id: {}", mint.mint.id);
            println!("Phase:     {}", mint.mint.phase);
            println!("Paid:      {} {}", mint.mint.total_price, mint.mint.currency);
        }
        OutputFormat::Json => print_json(mint),
    }
}

/// Prints a scratched card
pub fn print_card(card: &CardResult, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{:.2}", card.prize);
                return;
            }
            if card.jackpot {
                println!("JACKPOT! {} card won ${:.2}", card.card_type, card.prize);
            } else if card.winner {
                println!("{} card won ${:.2} (x{} bonus)", card.card_type, card.prize, card.bonus_multiplier);
            } else {
                println!("{} card: no win", card.card_type);
            }
        }
        OutputFormat::Json => print_json(card),
    }
}

/// Prints the scratch-card statistics
pub fn print_scratch_stats(stats: &ScratchStats, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", stats.total_cards_sold);
                return;
            }
            println!("Cards sold:     {}", stats.total_cards_sold);
            println!("Prizes won:     ${:.2}", stats.total_prizes_won);
            println!("Biggest win:    ${:.2}", stats.biggest_win);
            println!("Prize pool:     ${:.2}", stats.prize_pool);
            println!("Active players: {}", stats.active_players);
            for win in &stats.recent_wins {
                println!("  {} won ${:.2} on {} at {}", win.player, win.prize, win.card_type, win.time);
            }
        }
        OutputFormat::Json => print_json(stats),
    }
}

/// Prints the manifest of a locally generated art collection
pub fn print_manifest(manifest: &CollectionManifest, dir: &Path, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", manifest.total_supply);
                return;
            }
            println!("Generated {} artworks in {}", manifest.total_supply, dir.display());
            if let Some(rarest) = manifest.items.iter().max_by_key(|item| item.rarity_score) {
                println!("Rarest: {} (score {})", rarest.name, rarest.rarity_score);
            }
        }
        OutputFormat::Json => print_json(manifest),
    }
}

/// Prints a simple success message (for operations that don't return data)
pub fn print_success(message: &str, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if !config.quiet {
                println!("{}", message);
            }
        }
        OutputFormat::Json => {
            print_json(&serde_json::json!({"status": "ok", "message": message}));
        }
    }
}
