/// Scratch-card game played with demo HYPE
///
/// All state lives in memory. Handlers share one [`ScratchGame`] behind a
/// mutex, so pool and stats updates from concurrent plays never interleave.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::round2;

pub const HYPE_LOGO: &str = "https://assets.coingecko.com/coins/images/31503/thumb/hyperliquid.jpg";
pub const ETH_LOGO: &str = "https://assets.coingecko.com/coins/images/279/thumb/ethereum.png";
pub const BTC_LOGO: &str = "https://assets.coingecko.com/coins/images/1/thumb/bitcoin.png";

const CELLS: usize = 9;
const WINNING_MATCHES: usize = 3;
const RECENT_WINS_CAP: usize = 15;
const INITIAL_PRIZE_POOL: f64 = 500.0;
const HOUSE_EDGE: f64 = 0.15;
const WIN_RATE: f64 = 0.3;
const JACKPOT_CHANCE: f64 = 0.001;
const JACKPOT_MULTIPLIER: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Bronze,
    Silver,
    Gold,
    Diamond,
}

/// Price and payout table for one card type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTier {
    pub cost: f64,
    pub min_prize: f64,
    pub max_prize: f64,
    pub jackpot: f64,
}

impl CardType {
    pub const ALL: [CardType; 4] = [CardType::Bronze, CardType::Silver, CardType::Gold, CardType::Diamond];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Bronze => "bronze",
            CardType::Silver => "silver",
            CardType::Gold => "gold",
            CardType::Diamond => "diamond",
        }
    }

    pub fn tier(&self) -> CardTier {
        let (cost, min_prize, max_prize, jackpot) = match self {
            CardType::Bronze => (1.0, 0.5, 3.0, 10.0),
            CardType::Silver => (5.0, 2.0, 15.0, 50.0),
            CardType::Gold => (20.0, 10.0, 80.0, 250.0),
            CardType::Diamond => (100.0, 50.0, 500.0, 1000.0),
        };
        CardTier { cost, min_prize, max_prize, jackpot }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardType::ALL
            .into_iter()
            .find(|card| card.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid card type: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentWin {
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub prize: f64,
    pub bonus: bool,
    pub time: String,
    pub player: String,
}

/// The outcome of one card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardResult {
    pub card_type: CardType,
    pub winner: bool,
    pub prize: f64,
    pub bonus_multiplier: u32,
    pub jackpot: bool,
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScratchStats {
    pub total_cards_sold: u64,
    pub total_prizes_won: f64,
    pub biggest_win: f64,
    pub active_players: u32,
    pub house_edge: f64,
    pub prize_pool: f64,
    pub recent_wins: Vec<RecentWin>,
}

/// Base prize from the 60/25/15 split across the thirds of `[min, max]`
fn draw_prize<R: Rng + ?Sized>(tier: &CardTier, rng: &mut R) -> f64 {
    let third = (tier.max_prize - tier.min_prize) / 3.0;
    let band = rng.random::<f64>();
    let (low, high) = if band < 0.6 {
        (tier.min_prize, tier.min_prize + third)
    } else if band < 0.85 {
        (tier.min_prize + third, tier.min_prize + 2.0 * third)
    } else {
        (tier.min_prize + 2.0 * third, tier.max_prize)
    };
    round2(rng.random_range(low..=high))
}

fn bonus_multiplier<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.random_bool(0.05) {
        2
    } else if rng.random_bool(0.02) {
        5
    } else {
        1
    }
}

/// Nine cells with exactly three HYPE logos
pub fn winning_symbols<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let positions = rand::seq::index::sample(rng, CELLS, WINNING_MATCHES);
    let mut cells: Vec<String> = (0..CELLS)
        .map(|_| [ETH_LOGO, BTC_LOGO][rng.random_range(0..2)].to_string())
        .collect();
    for position in positions.iter() {
        cells[position] = HYPE_LOGO.to_string();
    }
    cells
}

/// Nine cells with at most two HYPE logos
pub fn losing_symbols<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let mut hype_count = 0;
    (0..CELLS)
        .map(|_| {
            let choices: &[&str] = if hype_count < WINNING_MATCHES - 1 {
                &[HYPE_LOGO, ETH_LOGO, BTC_LOGO]
            } else {
                &[ETH_LOGO, BTC_LOGO]
            };
            let symbol = choices.choose(rng).copied().unwrap_or(ETH_LOGO);
            if symbol == HYPE_LOGO {
                hype_count += 1;
            }
            symbol.to_string()
        })
        .collect()
}

fn player_handle<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("@user{}", rng.random_range(1000..=9999))
}

/// The shared game state
#[derive(Debug)]
pub struct ScratchGame<R = StdRng> {
    rng: R,
    prize_pool: f64,
    total_cards_sold: u64,
    total_prizes_won: f64,
    biggest_win: f64,
    active_players: u32,
    recent_wins: Vec<RecentWin>,
}

impl ScratchGame<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl Default for ScratchGame<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ScratchGame<R> {
    /// A game seeded with 5 to 12 simulated plays
    ///
    /// Simulated plays count towards stats and recent wins but leave the
    /// prize pool untouched.
    pub fn with_rng(mut rng: R) -> Self {
        let active_players = rng.random_range(150..=400);
        let mut game = ScratchGame {
            rng,
            prize_pool: INITIAL_PRIZE_POOL,
            total_cards_sold: 0,
            total_prizes_won: 0.0,
            biggest_win: 0.0,
            active_players,
            recent_wins: Vec::new(),
        };

        let simulated = game.rng.random_range(5..=12);
        for _ in 0..simulated {
            game.simulate_play();
        }
        debug!("Scratch game seeded with {} simulated cards", simulated);

        game
    }

    fn simulate_play(&mut self) {
        let card_type = CardType::ALL[self.rng.random_range(0..CardType::ALL.len())];
        self.total_cards_sold += 1;

        if !self.rng.random_bool(WIN_RATE) {
            return;
        }
        let multiplier = bonus_multiplier(&mut self.rng);
        let prize = round2(draw_prize(&card_type.tier(), &mut self.rng) * f64::from(multiplier));
        self.record_win(card_type, prize, multiplier > 1);
    }

    fn record_win(&mut self, card_type: CardType, prize: f64, bonus: bool) {
        self.total_prizes_won = round2(self.total_prizes_won + prize);
        if prize > self.biggest_win {
            self.biggest_win = prize;
        }
        let win = RecentWin {
            card_type,
            prize,
            bonus,
            time: Utc::now().format("%H:%M:%S").to_string(),
            player: player_handle(&mut self.rng),
        };
        self.recent_wins.insert(0, win);
        self.recent_wins.truncate(RECENT_WINS_CAP);
    }

    /// Plays one card of the given type
    pub fn play(&mut self, card_type: CardType) -> CardResult {
        let tier = card_type.tier();
        let house_take = (tier.cost * HOUSE_EDGE).trunc();
        self.prize_pool += tier.cost - house_take;
        self.total_cards_sold += 1;

        if !self.rng.random_bool(WIN_RATE) {
            return CardResult {
                card_type,
                winner: false,
                prize: 0.0,
                bonus_multiplier: 1,
                jackpot: false,
                symbols: losing_symbols(&mut self.rng),
            };
        }

        let base = draw_prize(&tier, &mut self.rng);
        let (prize, multiplier, jackpot) = if self.rng.random_bool(JACKPOT_CHANCE) {
            (tier.jackpot, JACKPOT_MULTIPLIER, true)
        } else {
            let multiplier = bonus_multiplier(&mut self.rng);
            (round2(base * f64::from(multiplier)), multiplier, false)
        };

        self.prize_pool = round2((self.prize_pool - prize).max(0.0));
        self.record_win(card_type, prize, multiplier > 1);

        if jackpot {
            info!("Jackpot on a {} card: {} HYPE", card_type, prize);
        }

        CardResult {
            card_type,
            winner: true,
            prize,
            bonus_multiplier: multiplier,
            jackpot,
            symbols: winning_symbols(&mut self.rng),
        }
    }

    pub fn stats(&self) -> ScratchStats {
        ScratchStats {
            total_cards_sold: self.total_cards_sold,
            total_prizes_won: self.total_prizes_won,
            biggest_win: self.biggest_win,
            active_players: self.active_players,
            house_edge: HOUSE_EDGE,
            prize_pool: self.prize_pool,
            recent_wins: self.recent_wins.clone(),
        }
    }
}
