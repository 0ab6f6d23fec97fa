//! Access-token bootstrap and session-cookie rotation.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use reqwest::header::{HeaderMap, CONTENT_TYPE, COOKIE, SET_COOKIE, USER_AGENT};
use reqwest::StatusCode;
use tracing::{debug, info};

use crate::credentials::{CredentialCell, Credentials, ROTATING_COOKIE};
use crate::GeminiError;

/// Literal body the rotation endpoint expects.
const ROTATE_BODY: &str = r#"[000,"-0000000000000000000"]"#;

static ACCESS_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""SNlM0e":"(.*?)""#).expect("static regex must compile"));

/// Performs the authenticated landing-page fetch and cookie rotation
/// against a shared `CredentialCell`.
#[derive(Debug, Clone)]
pub struct Authenticator {
    http: reqwest::Client,
    landing_url: String,
    rotate_url: String,
    user_agent: String,
    cookies: Arc<CredentialCell>,
}

impl Authenticator {
    pub fn new(
        http: reqwest::Client,
        landing_url: impl Into<String>,
        rotate_url: impl Into<String>,
        user_agent: impl Into<String>,
        cookies: Arc<CredentialCell>,
    ) -> Self {
        Self {
            http,
            landing_url: landing_url.into(),
            rotate_url: rotate_url.into(),
            user_agent: user_agent.into(),
            cookies,
        }
    }

    /// Fetch the landing page with the current cookies and pull the access
    /// token out of it.
    pub async fn fetch_access_token(&self) -> Result<String, GeminiError> {
        let credentials = self.cookies.snapshot();
        debug!(url = %self.landing_url, "fetching access token");

        let response = self
            .http
            .get(&self.landing_url)
            .header(COOKIE, credentials.cookie_header())
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeminiError::Auth(format!(
                "landing page returned HTTP {status}"
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        match extract_access_token(&html) {
            Some(token) => {
                info!("access token acquired");
                Ok(token.to_string())
            }
            None => Err(GeminiError::Auth(
                "access token not found in landing page, cookies may be invalid or expired"
                    .into(),
            )),
        }
    }

    /// Ask the service for a renewed rotating cookie and swap it into the
    /// cell. On failure the cell is left untouched.
    pub async fn rotate(&self) -> Result<Arc<Credentials>, GeminiError> {
        let credentials = self.cookies.snapshot();
        debug!(url = %self.rotate_url, "rotating session cookie");

        let response = self
            .http
            .post(&self.rotate_url)
            .header(COOKIE, credentials.cookie_header())
            .header(USER_AGENT, &self.user_agent)
            .header(CONTENT_TYPE, "application/json")
            .body(ROTATE_BODY)
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GeminiError::Auth(format!("rotation rejected with HTTP {status}")));
        }
        if !status.is_success() {
            return Err(GeminiError::Network(format!("rotation returned HTTP {status}")));
        }

        let renewed = renewed_rotating_id(response.headers()).ok_or_else(|| {
            GeminiError::Auth(format!("rotation response did not renew {ROTATING_COOKIE}"))
        })?;

        let next = self.cookies.rotate(renewed);
        info!("session cookie rotated");
        Ok(next)
    }
}

/// The token inside the page's `"SNlM0e":"..."` marker. An empty token
/// counts as absent.
pub fn extract_access_token(html: &str) -> Option<&str> {
    ACCESS_TOKEN_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|token| !token.is_empty())
}

/// The renewed rotating cookie value from the response's `Set-Cookie`
/// headers, if present.
pub fn renewed_rotating_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            let pair = cookie.split(';').next()?;
            let (name, value) = pair.split_once('=')?;
            (name.trim() == ROTATING_COOKIE && !value.trim().is_empty())
                .then(|| value.trim().to_string())
        })
}
