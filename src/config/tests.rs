use super::*;
use tempfile::{tempdir, TempDir};
use std::fs::File;
use std::io::Write;

/// Helper function to create a test configuration file
fn create_test_config_file(dir: &TempDir, content: &str) -> PathBuf {
    let config_path = dir.path().join("config.toml");
    let mut file = File::create(&config_path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    config_path
}

#[test]
fn test_base_config_defaults() {
    let config = base_config(None);

    assert_eq!(config.database_url, "hyperflow.db");
    assert_eq!(config.bind_address, "0.0.0.0");
    assert_eq!(config.port, 5000);
    assert_eq!(config.live_tick_ms, 2000);
    assert!(!config.remote_metadata);
    assert_eq!(config.metadata_timeout_ms, 3000);
    assert_eq!(config.sol_price_usd, 100.0);
    assert!(config.log_dir.is_none());
}

#[test]
fn test_base_config_with_path() {
    let temp_dir = tempdir().unwrap();
    let config = base_config(Some(temp_dir.path().to_path_buf()));

    let expected_db_path = temp_dir.path().join("hyperflow.db").to_string_lossy().to_string();
    assert_eq!(config.database_url, expected_db_path);
}

#[test]
fn test_apply_update_with_partial_values() {
    let config = base_config(None);

    let update = ConfigUpdate {
        port: Some(5002),
        remote_metadata: Some(true),
        ..Default::default()
    };

    let updated = config.apply_update(update);

    assert_eq!(updated.port, 5002);
    assert!(updated.remote_metadata);
    assert_eq!(updated.database_url, "hyperflow.db"); // Unchanged
    assert_eq!(updated.live_tick_ms, 2000); // Unchanged
}

#[test]
fn test_durations_and_listen_addr() {
    let mut config = base_config(None);
    config.live_tick_ms = 250;
    config.metadata_timeout_ms = 1500;
    config.bind_address = "127.0.0.1".to_string();
    config.port = 5003;

    assert_eq!(config.live_tick_interval(), Duration::from_millis(250));
    assert_eq!(config.metadata_timeout(), Duration::from_millis(1500));
    assert_eq!(config.listen_addr(), "127.0.0.1:5003");
}

#[test]
fn test_zero_tick_interval_is_clamped() {
    let mut config = base_config(None);
    config.live_tick_ms = 0;
    assert_eq!(config.live_tick_interval(), Duration::from_millis(1));
}

#[test]
fn test_config_from_args_maps_every_field() {
    let args = CliArgs {
        database_url: Some("args.db".to_string()),
        port: Some(5004),
        sol_price_usd: Some(150.0),
        log_json: Some(true),
        ..Default::default()
    };

    let update = config_from_args(args);

    assert_eq!(update.database_url, Some("args.db".to_string()));
    assert_eq!(update.port, Some(5004));
    assert_eq!(update.sol_price_usd, Some(150.0));
    assert_eq!(update.log_json, Some(true));
    assert_eq!(update.bind_address, None);
    assert_eq!(update.server_url, None);
}

#[test]
fn test_config_from_file_with_no_path() {
    let update = config_from_file(None).unwrap();
    assert_eq!(update.database_url, None);
    assert_eq!(update.port, None);
}

#[test]
fn test_config_from_file_with_valid_toml() {
    let temp_dir = tempdir().unwrap();
    let config_content = r#"
        database_url = "file.db"
        port = 5001
        remote_metadata = true
        hyperscan_url = "http://localhost:9999"
        server_url = "http://localhost:5001"
    "#;

    let config_path = create_test_config_file(&temp_dir, config_content);
    let result = config_from_file(Some(config_path));

    assert!(result.is_ok(), "Failed to parse config file: {}", result.err().unwrap());
    let update = result.unwrap();
    assert_eq!(update.database_url, Some("file.db".to_string()));
    assert_eq!(update.port, Some(5001));
    assert_eq!(update.remote_metadata, Some(true));
    assert_eq!(update.hyperscan_url, Some("http://localhost:9999".to_string()));
    assert_eq!(update.server_url, Some("http://localhost:5001".to_string()));
    assert_eq!(update.live_tick_ms, None);
}

#[test]
fn test_config_from_file_with_invalid_toml() {
    let temp_dir = tempdir().unwrap();
    let config_content = r#"
        port = "not a number"
    "#;

    let config_path = create_test_config_file(&temp_dir, config_content);
    assert!(config_from_file(Some(config_path)).is_err());
}

#[test]
fn test_config_from_file_with_nonexistent_file() {
    let temp_dir = tempdir().unwrap();
    let nonexistent_path = temp_dir.path().join("nonexistent_config.toml");

    let update = config_from_file(Some(nonexistent_path)).unwrap();
    assert_eq!(update.database_url, None);
    assert_eq!(update.port, None);
}

#[test]
fn test_precedence_args_over_file_over_base() {
    let args = CliArgs {
        database_url: Some("args.db".to_string()),
        ..Default::default()
    };

    let file_config = ConfigUpdate {
        database_url: Some("file.db".to_string()),
        port: Some(5005),
        ..Default::default()
    };

    let config = base_config(None)
        .apply_update(file_config)
        .apply_update(config_from_args(args));

    assert_eq!(config.database_url, "args.db"); // From args
    assert_eq!(config.port, 5005); // From file
    assert_eq!(config.live_tick_ms, 2000); // From base
}
