use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Currency, MintPhase};

/// The single row of minting configuration managed by the admin panel
#[derive(Queryable, Selectable, Identifiable, AsChangeset, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::mint_settings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct MintSettings {
    #[serde(skip)]
    pub id: i32,
    pub collection_name: String,
    pub collection_symbol: String,
    pub max_supply: i64,
    pub max_mint_per_wallet: i64,
    pub base_uri: String,
    pub whitelist_eth_price: f64,
    pub public_eth_price: f64,
    pub whitelist_hype_price: f64,
    pub public_hype_price: f64,
    /// Unix seconds; 0 means unset
    pub whitelist_start: i64,
    pub whitelist_end: i64,
    pub public_start: i64,
    pub public_end: i64,
    /// Manually selected phase, taking precedence over the schedule
    pub phase_override: Option<MintPhase>,
    /// Emergency pause; forces CLOSED while set
    pub paused: bool,
}

impl MintSettings {
    /// The phase implied by the configured windows alone
    pub fn scheduled_phase(&self, now: i64) -> MintPhase {
        if self.whitelist_start <= now && now <= self.whitelist_end {
            MintPhase::Whitelist
        } else if self.public_start <= now && now <= self.public_end {
            MintPhase::Public
        } else {
            MintPhase::Closed
        }
    }

    /// The phase minting actually runs under: pause, then override, then schedule
    pub fn effective_phase(&self, now: i64) -> MintPhase {
        if self.paused {
            MintPhase::Closed
        } else if let Some(phase) = self.phase_override {
            phase
        } else {
            self.scheduled_phase(now)
        }
    }

    /// Seconds until the next scheduled window opens, or 0 when none is ahead
    pub fn time_until_next_phase(&self, now: i64) -> i64 {
        if now < self.whitelist_start {
            self.whitelist_start - now
        } else if now < self.public_start {
            self.public_start - now
        } else {
            0
        }
    }

    /// Unit price for a mint in the given phase, `None` while closed
    pub fn unit_price(&self, phase: MintPhase, currency: Currency) -> Option<f64> {
        match (phase, currency) {
            (MintPhase::Closed, _) => None,
            (MintPhase::Whitelist, Currency::Eth) => Some(self.whitelist_eth_price),
            (MintPhase::Whitelist, Currency::Hype) => Some(self.whitelist_hype_price),
            (MintPhase::Public, Currency::Eth) => Some(self.public_eth_price),
            (MintPhase::Public, Currency::Hype) => Some(self.public_hype_price),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> MintSettings {
        MintSettings {
            id: 1,
            collection_name: "HyperFlow Genesis".to_string(),
            collection_symbol: "HFGEN".to_string(),
            max_supply: 10000,
            max_mint_per_wallet: 5,
            base_uri: "https://metadata.hyperflow.xyz/".to_string(),
            whitelist_eth_price: 0.05,
            public_eth_price: 0.08,
            whitelist_hype_price: 100.0,
            public_hype_price: 150.0,
            whitelist_start: 1000,
            whitelist_end: 2000,
            public_start: 3000,
            public_end: 4000,
            phase_override: None,
            paused: false,
        }
    }

    #[test]
    fn test_scheduled_phase_windows_are_inclusive() {
        let s = settings();
        assert_eq!(s.scheduled_phase(999), MintPhase::Closed);
        assert_eq!(s.scheduled_phase(1000), MintPhase::Whitelist);
        assert_eq!(s.scheduled_phase(2000), MintPhase::Whitelist);
        assert_eq!(s.scheduled_phase(2500), MintPhase::Closed);
        assert_eq!(s.scheduled_phase(3000), MintPhase::Public);
        assert_eq!(s.scheduled_phase(4000), MintPhase::Public);
        assert_eq!(s.scheduled_phase(4001), MintPhase::Closed);
    }

    #[test]
    fn test_unset_schedule_is_closed() {
        let mut s = settings();
        s.whitelist_start = 0;
        s.whitelist_end = 0;
        s.public_start = 0;
        s.public_end = 0;
        assert_eq!(s.scheduled_phase(1_700_000_000), MintPhase::Closed);
        assert_eq!(s.time_until_next_phase(1_700_000_000), 0);
    }

    #[test]
    fn test_override_survives_schedule_and_pause_wins() {
        let mut s = settings();
        s.phase_override = Some(MintPhase::Public);
        assert_eq!(s.effective_phase(1500), MintPhase::Public);

        s.paused = true;
        assert_eq!(s.effective_phase(1500), MintPhase::Closed);
    }

    #[test]
    fn test_time_until_next_phase() {
        let s = settings();
        assert_eq!(s.time_until_next_phase(400), 600);
        assert_eq!(s.time_until_next_phase(1500), 1500);
        assert_eq!(s.time_until_next_phase(3000), 0);
    }

    #[test]
    fn test_unit_price_by_phase_and_currency() {
        let s = settings();
        assert_eq!(s.unit_price(MintPhase::Whitelist, Currency::Eth), Some(0.05));
        assert_eq!(s.unit_price(MintPhase::Public, Currency::Hype), Some(150.0));
        assert_eq!(s.unit_price(MintPhase::Closed, Currency::Eth), None);
    }
}
