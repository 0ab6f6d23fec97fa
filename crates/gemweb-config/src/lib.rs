//! gemweb configuration system.
//!
//! TOML-based configuration with full validation. All config sections use
//! defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gemweb_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("locale: {}", config.client.locale);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;

pub use schema::GemwebConfig;
pub use toml_writer::store_rotated_cookie;

use gemweb_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path.
///
/// Creates a commented default file if none exists, applies environment
/// overrides for the cookies, then validates the result.
pub fn load_config() -> Result<GemwebConfig, ConfigError> {
    let mut config = toml_loader::load_default()?;
    finish(&mut config)?;
    Ok(config)
}

/// Load config from an explicit path. A missing file is an error here.
pub fn load_config_from(path: &Path) -> Result<GemwebConfig, ConfigError> {
    let mut config = toml_loader::load_from_path(path)?;
    finish(&mut config)?;
    Ok(config)
}

fn finish(config: &mut GemwebConfig) -> Result<(), ConfigError> {
    toml_loader::apply_env_overrides(config);
    validation::validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[client]\nrequest_timeout_secs = 0\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn load_config_from_missing_file_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
        assert!(!path.exists());
    }
}
