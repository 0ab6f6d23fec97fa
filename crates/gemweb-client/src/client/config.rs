//! Client configuration: endpoints, locale, HTTP timeouts, wire layout.

use std::time::Duration;

use crate::protocol::{WireLayout, CURRENT};
use crate::GeminiError;

pub(crate) const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";

/// Service URLs. Overridable so the client can be aimed at a local mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub landing: String,
    pub generate: String,
    pub rotate: String,
    pub upload: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            landing: "https://gemini.google.com/app".into(),
            generate: "https://gemini.google.com/_/BardChatUi/data/assistant.lamda.BardFrontendService/StreamGenerate".into(),
            rotate: "https://accounts.google.com/RotateCookies".into(),
            upload: "https://content-push.googleapis.com/upload".into(),
        }
    }
}

impl Endpoints {
    /// All four endpoints under one base URL, with the live paths.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            landing: format!("{base}/app"),
            generate: format!(
                "{base}/_/BardChatUi/data/assistant.lamda.BardFrontendService/StreamGenerate"
            ),
            rotate: format!("{base}/RotateCookies"),
            upload: format!("{base}/upload"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoints: Endpoints,
    /// Sent as the `hl` query parameter and inside the envelope.
    pub locale: String,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub layout: WireLayout,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            locale: "en".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            layout: CURRENT,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }

    pub fn with_layout(mut self, layout: WireLayout) -> Self {
        self.layout = layout;
        self
    }

    pub(crate) fn build_http(&self) -> Result<reqwest::Client, GeminiError> {
        reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .build()
            .map_err(|e| GeminiError::Network(format!("failed to build HTTP client: {e}")))
    }
}
