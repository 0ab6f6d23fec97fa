//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::{GemwebConfig, LogLevel};
use gemweb_common::ConfigError;
use std::collections::HashMap;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_gemweb_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[credentials]
secure_1psid = "sid"

[client]
locale = "de"
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.credentials.secure_1psid, "sid");
    assert_eq!(config.client.locale, "de");
    // Defaults preserved
    assert_eq!(config.client.request_timeout_secs, 120);
    assert_eq!(config.rotation.interval_secs, 600);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn out_of_range_values_are_returned_unvalidated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[rotation]\ninterval_secs = 5\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.rotation.interval_secs, 5);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gemweb").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config, GemwebConfig::default());
}

#[test]
fn default_config_toml_is_valid() {
    let config: GemwebConfig = toml::from_str(&template::default_config_toml()).unwrap();
    assert_eq!(config.logging.level, LogLevel::Info);
    assert!(config.credentials.secure_1psid.is_empty());
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("gemweb"));
        assert!(path_str.ends_with("config.toml"));
    }
}

#[test]
fn env_overrides_replace_cookies() {
    let env: HashMap<&str, String> = [
        (ENV_SECURE_1PSID, "env-sid".to_string()),
        (ENV_SECURE_1PSIDTS, String::new()),
    ]
    .into_iter()
    .collect();

    let mut config = GemwebConfig::default();
    config.credentials.secure_1psid = "file-sid".into();
    config.credentials.secure_1psidts = "file-ts".into();
    apply_overrides_from(&mut config, |key| env.get(key).cloned());

    assert_eq!(config.credentials.secure_1psid, "env-sid");
    // empty variables leave the file value alone
    assert_eq!(config.credentials.secure_1psidts, "file-ts");
}
