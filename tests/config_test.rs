//! Configuration loading from TOML files.

use std::io::Write;
use strictly_checkers::{CheckersConfig, MatchManager};

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_saved_replays = 5").unwrap();
    writeln!(file, "log_filter = \"debug\"").unwrap();

    let config = CheckersConfig::from_file(file.path()).unwrap();
    assert_eq!(config.max_saved_replays(), &Some(5));
    assert_eq!(config.log_filter(), "debug");

    let manager = MatchManager::from_config(&config);
    assert_eq!(manager.replay_registry().capacity(), Some(5));
}

#[test]
fn test_config_defaults_when_fields_missing() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let config = CheckersConfig::from_file(file.path()).unwrap();
    assert_eq!(config, CheckersConfig::default());
}

#[test]
fn test_malformed_config_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_saved_replays = \"lots\"").unwrap();
    let err = CheckersConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));
}

#[test]
fn test_zero_replay_limit_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_saved_replays = 0").unwrap();
    let err = CheckersConfig::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("max_saved_replays must be at least 1"));
}
