use super::*;
use proptest::prelude::*;

/// Generates an arbitrary Config
fn arb_config() -> impl Strategy<Value = Config> {
    (".*", "[a-z0-9.]{1,15}", any::<u16>(), any::<u64>(), any::<bool>()).prop_map(
        |(database_url, bind_address, port, live_tick_ms, remote_metadata)| Config {
            database_url,
            bind_address,
            port,
            live_tick_ms,
            hyperscan_url: "https://www.hyperscan.com".to_string(),
            remote_metadata,
            metadata_timeout_ms: 3000,
            sol_price_usd: 100.0,
            log_dir: None,
            log_json: false,
        },
    )
}

/// Generates an arbitrary ConfigUpdate touching the server fields
fn arb_config_update() -> impl Strategy<Value = ConfigUpdate> {
    (
        prop::option::of(".*"),
        prop::option::of(any::<u16>()),
        prop::option::of(any::<u64>()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(database_url, port, live_tick_ms, remote_metadata)| ConfigUpdate {
            database_url,
            port,
            live_tick_ms,
            remote_metadata,
            ..Default::default()
        })
}

proptest! {
    /// Applying an empty update leaves the config unchanged
    #[test]
    fn prop_empty_update_is_identity(config in arb_config()) {
        let original = config.clone();
        let updated = config.apply_update(ConfigUpdate::default());

        prop_assert_eq!(updated.database_url, original.database_url);
        prop_assert_eq!(updated.bind_address, original.bind_address);
        prop_assert_eq!(updated.port, original.port);
        prop_assert_eq!(updated.live_tick_ms, original.live_tick_ms);
        prop_assert_eq!(updated.remote_metadata, original.remote_metadata);
    }

    /// Some fields win, None fields keep the previous value
    #[test]
    fn prop_update_fields_are_independent(config in arb_config(), update in arb_config_update()) {
        let original = config.clone();
        let expected_url = update.database_url.clone().unwrap_or(original.database_url.clone());
        let expected_port = update.port.unwrap_or(original.port);
        let expected_tick = update.live_tick_ms.unwrap_or(original.live_tick_ms);
        let expected_remote = update.remote_metadata.unwrap_or(original.remote_metadata);

        let updated = config.apply_update(update);

        prop_assert_eq!(updated.database_url, expected_url);
        prop_assert_eq!(updated.port, expected_port);
        prop_assert_eq!(updated.live_tick_ms, expected_tick);
        prop_assert_eq!(updated.remote_metadata, expected_remote);
        prop_assert_eq!(updated.bind_address, original.bind_address);
    }

    /// The tick interval is never zero
    #[test]
    fn prop_tick_interval_positive(config in arb_config()) {
        prop_assert!(config.live_tick_interval() > Duration::ZERO);
    }
}
