use serde::{Deserialize, Serialize};

/// HTTP client behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientSection {
    /// Value sent as the `hl` query parameter.
    pub locale: String,
    /// Overrides the built-in browser User-Agent when set.
    pub user_agent: Option<String>,
    /// Connect timeout in seconds (valid range: 1-600).
    pub connect_timeout_secs: u32,
    /// Whole-request timeout in seconds (valid range: 1-600).
    pub request_timeout_secs: u32,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            locale: "en".into(),
            user_agent: None,
            connect_timeout_secs: 10,
            request_timeout_secs: 120,
        }
    }
}

/// Background cookie rotation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RotationConfig {
    pub enabled: bool,
    /// Seconds between rotations (valid range: 60-86400).
    pub interval_secs: u32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 600,
        }
    }
}

/// Endpoint overrides. Unset entries use the live service URLs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct EndpointsConfig {
    pub landing: Option<String>,
    pub generate: Option<String>,
    pub rotate: Option<String>,
    pub upload: Option<String>,
}

impl EndpointsConfig {
    /// Every configured override as `(name, url)`.
    pub fn overrides(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("landing", &self.landing),
            ("generate", &self.generate),
            ("rotate", &self.rotate),
            ("upload", &self.upload),
        ]
        .into_iter()
        .filter_map(|(name, url)| url.as_deref().map(|u| (name, u)))
    }
}
