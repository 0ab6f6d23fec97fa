//! Configuration schema types for gemweb.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod client;
mod credentials;
mod system;

pub use client::*;
pub use credentials::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GemwebConfig {
    pub credentials: CredentialsConfig,
    pub client: ClientSection,
    pub rotation: RotationConfig,
    pub endpoints: EndpointsConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = GemwebConfig::default();
        assert_eq!(config.client.locale, "en");
        assert_eq!(config.client.connect_timeout_secs, 10);
        assert_eq!(config.client.request_timeout_secs, 120);
        assert!(config.client.user_agent.is_none());
        assert!(config.rotation.enabled);
        assert_eq!(config.rotation.interval_secs, 600);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.endpoints.overrides().count(), 0);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: GemwebConfig = toml::from_str(
            r#"
[rotation]
interval_secs = 900

[endpoints]
upload = "http://127.0.0.1:9000/upload"
"#,
        )
        .unwrap();
        assert_eq!(config.rotation.interval_secs, 900);
        assert!(config.rotation.enabled);
        assert_eq!(config.client.locale, "en");
        let overrides: Vec<_> = config.endpoints.overrides().collect();
        assert_eq!(overrides, vec![("upload", "http://127.0.0.1:9000/upload")]);
    }

    #[test]
    fn log_level_parses_lowercase() {
        let config: GemwebConfig = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.level.as_str(), "debug");
    }

    #[test]
    fn debug_output_hides_cookies() {
        let mut config = GemwebConfig::default();
        config.credentials.secure_1psid = "g.a000-secret".into();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("g.a000-secret"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(rendered.contains("<unset>"));
    }
}
