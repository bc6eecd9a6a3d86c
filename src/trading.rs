use rand::Rng;
use serde::Serialize;

/// (symbol, name, price, change %, volume)
const TOKENS: [(&str, &str, f64, f64, f64); 8] = [
    ("BONK", "Bonk", 0.000012, 15.6, 12_400_000.0),
    ("WIF", "dogwifhat", 2.34, -8.2, 45_600_000.0),
    ("PEPE", "Pepe", 0.0000087, 23.1, 67_800_000.0),
    ("PNUT", "Peanut", 0.45, 156.7, 89_200_000.0),
    ("GOAT", "Goatseus Maximus", 0.67, -12.3, 34_500_000.0),
    ("MEW", "Cat in a Dogs World", 0.0089, 45.2, 23_400_000.0),
    ("POPCAT", "Popcat", 1.23, 67.8, 56_700_000.0),
    ("MOODENG", "Moo Deng", 0.234, -5.6, 12_300_000.0),
];

/// (label, wallet, SOL balance)
const WHALES: [(&str, &str, f64); 4] = [
    ("Whale Alpha", "6dMH3H3revFkX9M2Gzzj8XPUX5t7hAUKAP2Ld8iRj4P1", 45670.5),
    ("DeFi Maxi", "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM", 78923.2),
    ("MEV Bot", "3tLPE2f5YvCn3C9KQbXQHvBRF2kbwSJXi4QNWT1z8QRG", 23456.8),
    ("Pump Hunter", "5kTzWXGTN4L8h2vMd9LKQpRX3G4mDxYP7qJmV9H6rK3S", 12789.4),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingToken {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhaleWallet {
    pub label: String,
    pub address: String,
    pub sol_balance: f64,
    pub value_usd: f64,
    pub pnl_24h: f64,
    pub tokens_count: u32,
}

/// The trending meme tokens with a little noise on every read
pub fn trending_tokens<R: Rng + ?Sized>(rng: &mut R) -> Vec<TrendingToken> {
    TOKENS
        .iter()
        .map(|&(symbol, name, price, change, volume)| TrendingToken {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price: price * (1.0 + rng.random_range(-0.05..=0.05)),
            change: change + rng.random_range(-2.0..=2.0),
            volume: volume * (1.0 + rng.random_range(-0.1..=0.1)),
        })
        .collect()
}

/// The tracked whale wallets, valued at `sol_price` USD per SOL
pub fn whales<R: Rng + ?Sized>(rng: &mut R, sol_price: f64) -> Vec<WhaleWallet> {
    WHALES
        .iter()
        .map(|&(label, address, balance)| {
            let sol_balance = balance * (1.0 + rng.random_range(-0.02..=0.02));
            WhaleWallet {
                label: label.to_string(),
                address: address.to_string(),
                sol_balance,
                value_usd: sol_balance * sol_price,
                pnl_24h: rng.random_range(-50_000.0..=50_000.0),
                tokens_count: rng.random_range(15..=45),
            }
        })
        .collect()
}
