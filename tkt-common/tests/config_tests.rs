//! Database path resolution and config file loading
//!
//! Tests that touch TKT_DATABASE are marked #[serial] so they never run
//! in parallel with each other.

use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use tkt_common::config::{
    default_database_path, resolve_database_path, TomlConfig, DATABASE_ENV_VAR,
};
use tkt_common::Error;

#[test]
#[serial]
fn test_no_overrides_uses_default() {
    env::remove_var(DATABASE_ENV_VAR);

    let path = resolve_database_path(None, &TomlConfig::default());
    assert_eq!(path, default_database_path());
}

#[test]
#[serial]
fn test_env_var_beats_config_file() {
    env::set_var(DATABASE_ENV_VAR, "/tmp/tkt-env.db");
    let config = TomlConfig {
        database_path: Some(PathBuf::from("/tmp/tkt-config.db")),
        ..Default::default()
    };

    let path = resolve_database_path(None, &config);
    env::remove_var(DATABASE_ENV_VAR);

    assert_eq!(path, PathBuf::from("/tmp/tkt-env.db"));
}

#[test]
#[serial]
fn test_cli_beats_env_var() {
    env::set_var(DATABASE_ENV_VAR, "/tmp/tkt-env.db");

    let path = resolve_database_path(Some(Path::new("/tmp/tkt-cli.db")), &TomlConfig::default());
    env::remove_var(DATABASE_ENV_VAR);

    assert_eq!(path, PathBuf::from("/tmp/tkt-cli.db"));
}

#[test]
#[serial]
fn test_blank_env_var_ignored() {
    env::set_var(DATABASE_ENV_VAR, "  ");
    let config = TomlConfig {
        database_path: Some(PathBuf::from("/tmp/tkt-config.db")),
        ..Default::default()
    };

    let path = resolve_database_path(None, &config);
    env::remove_var(DATABASE_ENV_VAR);

    assert_eq!(path, PathBuf::from("/tmp/tkt-config.db"));
}

#[test]
fn test_load_explicit_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        "database_path = \"/data/events.db\"\nlog_level = \"info\"\n",
    )
    .unwrap();

    let config = TomlConfig::load_or_default(Some(&config_path)).unwrap();
    assert_eq!(config.database_path, Some(PathBuf::from("/data/events.db")));
    assert_eq!(config.log_level.as_deref(), Some("info"));
    assert_eq!(config.max_connections, None);
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = TomlConfig::from_toml_str("theme = \"dark\"\nmax_connections = 8\n").unwrap();
    assert_eq!(config.max_connections, Some(8));
}

#[test]
fn test_wrong_type_is_config_error() {
    let err = TomlConfig::from_toml_str("max_connections = \"many\"").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
