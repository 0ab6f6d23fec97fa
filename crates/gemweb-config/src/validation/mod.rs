//! Full configuration validation.
//!
//! Each section has its own check; this orchestrator calls them all and
//! collects errors into a single `ConfigError`.

mod client;
mod helpers;


use crate::schema::GemwebConfig;
use gemweb_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &GemwebConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    client::validate_client(&mut errors, config);
    client::validate_rotation(&mut errors, config);
    client::validate_endpoints(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
