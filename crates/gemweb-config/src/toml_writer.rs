//! Write renewed cookies back to the TOML config on disk.
//!
//! Writes are atomic (write to `.tmp`, then rename) so a crash mid-write
//! never leaves a truncated config behind.

use std::path::Path;

use gemweb_common::ConfigError;

/// Store a renewed `__Secure-1PSIDTS` value in an existing config file.
///
/// Only `credentials.secure_1psidts` changes; every other key the user
/// wrote is kept as-is and no defaults are filled in.
pub fn store_rotated_cookie(path: &Path, rotating_id: &str) -> Result<(), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
    })?;
    let mut table: toml::Table = content
        .parse()
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    let credentials = table
        .entry("credentials")
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    let toml::Value::Table(credentials) = credentials else {
        return Err(ConfigError::ParseError(
            "[credentials] is not a table".into(),
        ));
    };
    credentials.insert(
        "secure_1psidts".into(),
        toml::Value::String(rotating_id.to_string()),
    );

    let toml_str = toml::to_string_pretty(&table)
        .map_err(|e| ConfigError::ParseError(format!("failed to serialize config to TOML: {e}")))?;
    write_atomic(path, &toml_str)
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, contents).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write config to {}: {e}",
            tmp_path.display()
        ))
    })?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        // Rename failed, fall back to a direct write (Windows)
        tracing::warn!("atomic rename failed ({}), falling back to direct write", e);
        std::fs::write(path, contents).map_err(|e2| {
            ConfigError::ParseError(format!(
                "failed to write config to {}: {e2}",
                path.display()
            ))
        })?;
        let _ = std::fs::remove_file(&tmp_path);
    }

    tracing::debug!(path = %path.display(), "config saved to disk");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::GemwebConfig;
    use tempfile::TempDir;

    #[test]
    fn rotated_cookie_write_leaves_no_tmp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[credentials]\nsecure_1psid = \"sid\"\n").unwrap();

        store_rotated_cookie(&path, "ts").unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn rotated_cookie_replaces_only_that_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[credentials]
secure_1psid = "sid"
secure_1psidts = "old"

[client]
locale = "ja"
"#,
        )
        .unwrap();

        store_rotated_cookie(&path, "new").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: GemwebConfig = toml::from_str(&contents).unwrap();
        assert_eq!(parsed.credentials.secure_1psid, "sid");
        assert_eq!(parsed.credentials.secure_1psidts, "new");
        assert_eq!(parsed.client.locale, "ja");
        // untouched sections are not expanded with defaults
        assert!(!contents.contains("[rotation]"));
    }

    #[test]
    fn rotated_cookie_creates_missing_section() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

        store_rotated_cookie(&path, "ts").unwrap();

        let parsed: GemwebConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.credentials.secure_1psidts, "ts");
    }

    #[test]
    fn rotated_cookie_on_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = store_rotated_cookie(&dir.path().join("absent.toml"), "ts").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
