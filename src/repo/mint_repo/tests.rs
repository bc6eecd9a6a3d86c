use super::*;
use crate::test_utils::setup_test_db;
use crate::repo::add_to_whitelist;

fn addr(suffix: &str) -> WalletAddress {
    WalletAddress::parse(&format!("0x{:0>40}", suffix)).unwrap()
}

fn open_public(pool: &DbPool) {
    let mut settings = get_mint_settings(pool).unwrap();
    settings.phase_override = Some(MintPhase::Public);
    save_mint_settings(pool, &settings).unwrap();
}

#[test]
fn test_default_settings_are_seeded() {
    let pool = setup_test_db();
    let settings = get_mint_settings(&pool).unwrap();

    assert_eq!(settings.collection_name, "HyperFlow Genesis");
    assert_eq!(settings.collection_symbol, "HFGEN");
    assert_eq!(settings.max_supply, 10000);
    assert_eq!(settings.max_mint_per_wallet, 5);
    assert_eq!(settings.whitelist_eth_price, 0.05);
    assert_eq!(settings.public_hype_price, 150.0);
    assert_eq!(settings.phase_override, None);
    assert!(!settings.paused);
}

#[test]
fn test_save_settings_round_trips_override() {
    let pool = setup_test_db();
    let mut settings = get_mint_settings(&pool).unwrap();
    settings.phase_override = Some(MintPhase::Whitelist);
    settings.paused = true;

    save_mint_settings(&pool, &settings).unwrap();
    let reloaded = get_mint_settings(&pool).unwrap();

    assert_eq!(reloaded.phase_override, Some(MintPhase::Whitelist));
    assert!(reloaded.paused);

    settings.phase_override = None;
    save_mint_settings(&pool, &settings).unwrap();
    assert_eq!(get_mint_settings(&pool).unwrap().phase_override, None);
}

#[test]
fn test_update_settings_refusal_writes_nothing() {
    let pool = setup_test_db();

    let result = update_mint_settings(&pool, |settings, _| {
        settings.max_supply = 1;
        Err("nope".to_string())
    })
    .unwrap();

    assert_eq!(result, Err("nope".to_string()));
    assert_eq!(get_mint_settings(&pool).unwrap().max_supply, 10000);
}

#[test]
fn test_mint_rejected_while_closed() {
    let pool = setup_test_db();

    let outcome = record_mint(&pool, &addr("a1"), 1, Currency::Eth, 1_000).unwrap();

    assert_eq!(outcome, MintOutcome::Rejected("Minting is closed".to_string()));
    assert_eq!(get_mint_stats(&pool).unwrap().total_minted, 0);
}

#[test]
fn test_public_mint_records_ledger_and_stats() {
    let pool = setup_test_db();
    open_public(&pool);

    let outcome = record_mint(&pool, &addr("a1"), 2, Currency::Hype, 1_000).unwrap();
    let MintOutcome::Minted(record) = outcome else {
        panic!("expected a mint");
    };
    assert_eq!(record.quantity, 2);
    assert_eq!(record.unit_price, 150.0);
    assert_eq!(record.total_price, 300.0);
    assert_eq!(record.phase, MintPhase::Public);

    record_mint(&pool, &addr("b2"), 1, Currency::Eth, 1_001).unwrap();

    let stats = get_mint_stats(&pool).unwrap();
    assert_eq!(stats.total_minted, 3);
    assert_eq!(stats.hype_collected, 300.0);
    assert!((stats.eth_collected - 0.08).abs() < 1e-9);
}

#[test]
fn test_whitelist_phase_requires_membership() {
    let pool = setup_test_db();
    let mut settings = get_mint_settings(&pool).unwrap();
    settings.phase_override = Some(MintPhase::Whitelist);
    save_mint_settings(&pool, &settings).unwrap();

    let rejected = record_mint(&pool, &addr("a1"), 1, Currency::Eth, 10).unwrap();
    assert_eq!(rejected, MintOutcome::Rejected("Address is not whitelisted".to_string()));

    add_to_whitelist(&pool, &addr("a1"), 5).unwrap();
    let accepted = record_mint(&pool, &addr("a1"), 1, Currency::Eth, 11).unwrap();
    assert!(matches!(accepted, MintOutcome::Minted(ref r) if r.unit_price == 0.05));
}

#[test]
fn test_wallet_limit_and_supply_limit() {
    let pool = setup_test_db();
    let mut settings = get_mint_settings(&pool).unwrap();
    settings.phase_override = Some(MintPhase::Public);
    settings.max_supply = 7;
    save_mint_settings(&pool, &settings).unwrap();

    assert!(matches!(record_mint(&pool, &addr("a1"), 5, Currency::Eth, 1).unwrap(), MintOutcome::Minted(_)));
    assert!(matches!(record_mint(&pool, &addr("a1"), 1, Currency::Eth, 2).unwrap(), MintOutcome::Rejected(_)));
    assert!(matches!(record_mint(&pool, &addr("b2"), 3, Currency::Eth, 3).unwrap(), MintOutcome::Rejected(_)));
    assert!(matches!(record_mint(&pool, &addr("b2"), 2, Currency::Eth, 4).unwrap(), MintOutcome::Minted(_)));

    assert_eq!(get_mint_stats(&pool).unwrap().total_minted, 7);
}

#[test]
fn test_zero_quantity_rejected() {
    let pool = setup_test_db();
    open_public(&pool);

    let outcome = record_mint(&pool, &addr("a1"), 0, Currency::Eth, 1).unwrap();
    assert_eq!(outcome, MintOutcome::Rejected("Quantity must be at least 1".to_string()));
}

#[test]
fn test_history_returns_latest_in_order() {
    let pool = setup_test_db();
    let mut settings = get_mint_settings(&pool).unwrap();
    settings.phase_override = Some(MintPhase::Public);
    settings.max_mint_per_wallet = 100;
    save_mint_settings(&pool, &settings).unwrap();

    for t in 0..5 {
        record_mint(&pool, &addr("a1"), 1, Currency::Eth, 100 + t).unwrap();
    }

    let (history, total) = get_mint_history(&pool, 3).unwrap();
    assert_eq!(total, 5);
    let times: Vec<i64> = history.iter().map(|r| r.minted_at).collect();
    assert_eq!(times, vec![102, 103, 104]);
}

#[test]
fn test_huge_quantity_after_first_mint_is_rejected() {
    let pool = setup_test_db();
    open_public(&pool);

    assert!(matches!(record_mint(&pool, &addr("a1"), 1, Currency::Eth, 1).unwrap(), MintOutcome::Minted(_)));

    let outcome = record_mint(&pool, &addr("a1"), i64::MAX, Currency::Eth, 2).unwrap();
    assert!(matches!(outcome, MintOutcome::Rejected(ref reason) if reason.starts_with("Wallet limit exceeded")));

    let outcome = record_mint(&pool, &addr("b2"), i64::MAX, Currency::Eth, 3).unwrap();
    assert!(matches!(outcome, MintOutcome::Rejected(_)));

    let stats = get_mint_stats(&pool).unwrap();
    assert_eq!(stats.total_minted, 1);
    assert_eq!(get_mint_history(&pool, 50).unwrap().1, 1);
}
