/// Crash game with a shared round loop
///
/// One round runs at a time for every viewer: ten seconds of betting, then
/// a multiplier that climbs until it reaches the round's crash point, then
/// a short cool-down before the next round. A background task advances the
/// round under a write lock; readers copy out a [`CrashView`].
///
/// Bets are not taken server side. The game only publishes the multiplier
/// and the round history.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::catalog::round2;

/// Seconds of betting before the multiplier starts climbing
pub const BETTING_SECONDS: f64 = 10.0;

/// Seconds between a crash and the next round
pub const COOLDOWN_SECONDS: f64 = 5.0;

/// How often the background loop advances the round
pub const CRASH_TICK: Duration = Duration::from_millis(100);

const HISTORY_CAP: usize = 20;
const HISTORY_SHOWN: usize = 10;

/// Crash point bands as (cumulative probability, low end, width)
const CRASH_BANDS: [(f64, f64, f64); 4] = [
    (0.50, 1.1, 2.0),
    (0.80, 3.1, 4.0),
    (0.95, 7.1, 15.0),
    (1.00, 22.1, 78.0),
];

/// Shared handle to the running game
pub type CrashFeed = Arc<RwLock<CrashGame>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundPhase {
    Betting,
    Flying,
    Crashed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrashHistoryEntry {
    pub round: u64,
    pub multiplier: f64,
    pub time: String,
}

/// What clients see of the current round
///
/// The crash point stays hidden until the round has crashed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrashView {
    pub round: u64,
    pub phase: RoundPhase,
    pub active: bool,
    pub betting: bool,
    pub multiplier: f64,
    pub crash_point: Option<f64>,
    pub seconds_until_launch: f64,
    pub history: Vec<CrashHistoryEntry>,
}

/// Draws a crash point: 50% in 1.1x-3.1x, 30% in 3.1x-7.1x, 15% in
/// 7.1x-22.1x and 5% in 22.1x-100x
pub fn draw_crash_point<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let roll = rng.random::<f64>();
    let (_, low, width) = CRASH_BANDS
        .iter()
        .copied()
        .find(|(cumulative, _, _)| roll < *cumulative)
        .unwrap_or(CRASH_BANDS[CRASH_BANDS.len() - 1]);
    round2(low + rng.random::<f64>() * width)
}

/// The multiplier `seconds` into a flight
pub fn multiplier_at(seconds: f64) -> f64 {
    let t = seconds.max(0.0);
    1.0 + t * 0.1 * (1.0 + t * 0.02)
}

fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0
}

#[derive(Debug, Clone)]
pub struct CrashGame {
    round: u64,
    phase: RoundPhase,
    started_at: DateTime<Utc>,
    crashed_at: Option<DateTime<Utc>>,
    crash_point: f64,
    multiplier: f64,
    history: Vec<CrashHistoryEntry>,
}

impl CrashGame {
    /// A game whose first round opens for bets at `now`
    pub fn new<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Self {
        let mut game = CrashGame {
            round: 0,
            phase: RoundPhase::Betting,
            started_at: now,
            crashed_at: None,
            crash_point: 1.0,
            multiplier: 1.0,
            history: Vec::new(),
        };
        game.start_round(rng, now);
        game
    }

    fn start_round<R: Rng + ?Sized>(&mut self, rng: &mut R, now: DateTime<Utc>) {
        self.round += 1;
        self.phase = RoundPhase::Betting;
        self.started_at = now;
        self.crashed_at = None;
        self.crash_point = draw_crash_point(rng);
        self.multiplier = 1.0;
        debug!("Crash round {} open for bets", self.round);
    }

    fn crash(&mut self, now: DateTime<Utc>) {
        self.phase = RoundPhase::Crashed;
        self.crashed_at = Some(now);
        self.multiplier = self.crash_point;
        self.history.insert(0, CrashHistoryEntry {
            round: self.round,
            multiplier: self.crash_point,
            time: now.format("%H:%M:%S").to_string(),
        });
        self.history.truncate(HISTORY_CAP);
        info!("Crash round {} crashed at {:.2}x", self.round, self.crash_point);
    }

    /// Moves the round forward to `now`
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R, now: DateTime<Utc>) {
        if self.phase == RoundPhase::Crashed {
            let crashed_at = self.crashed_at.unwrap_or(now);
            if seconds_between(crashed_at, now) < COOLDOWN_SECONDS {
                return;
            }
            self.start_round(rng, now);
        }

        let elapsed = seconds_between(self.started_at, now);
        if elapsed < BETTING_SECONDS {
            return;
        }
        self.phase = RoundPhase::Flying;

        let multiplier = multiplier_at(elapsed - BETTING_SECONDS);
        if multiplier >= self.crash_point {
            self.crash(now);
        } else {
            self.multiplier = round2(multiplier);
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn history(&self) -> &[CrashHistoryEntry] {
        &self.history
    }

    /// The client view as of `now`
    pub fn view(&self, now: DateTime<Utc>) -> CrashView {
        let seconds_until_launch = if self.phase == RoundPhase::Betting {
            round2((BETTING_SECONDS - seconds_between(self.started_at, now)).max(0.0))
        } else {
            0.0
        };

        CrashView {
            round: self.round,
            phase: self.phase,
            active: self.phase == RoundPhase::Flying,
            betting: self.phase == RoundPhase::Betting,
            multiplier: self.multiplier,
            crash_point: (self.phase == RoundPhase::Crashed).then_some(self.crash_point),
            seconds_until_launch,
            history: self.history.iter().take(HISTORY_SHOWN).cloned().collect(),
        }
    }
}

/// A game with its first round opening now
pub fn new_feed() -> CrashFeed {
    let mut rng = StdRng::from_os_rng();
    Arc::new(RwLock::new(CrashGame::new(&mut rng, Utc::now())))
}

/// Starts the background task that advances `feed` every `interval`
///
/// The task runs until the returned handle is aborted.
pub fn spawn_round_loop(feed: CrashFeed, interval: Duration) -> JoinHandle<()> {
    info!("Starting crash game loop every {:?}", interval);

    tokio::spawn(async move {
        let mut rng = StdRng::from_os_rng();
        let mut timer = tokio::time::interval(interval);

        loop {
            timer.tick().await;
            feed.write().await.advance(&mut rng, Utc::now());
        }
    })
}
