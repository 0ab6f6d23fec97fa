//! Client struct, credential handling, and auth/upload delegation.

use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::auth::Authenticator;
use crate::credentials::{CredentialCell, Credentials};
use crate::models::{SessionState, UploadedFileRef};
use crate::session::ChatSession;
use crate::upload::Uploader;
use crate::GeminiError;

use super::config::ClientConfig;

/// Client for the Gemini web chat endpoint.
///
/// Safe to share behind an `Arc`: rotation, uploads and generation may run
/// concurrently.
pub struct GeminiWebClient {
    pub(crate) config: ClientConfig,
    pub(crate) http: reqwest::Client,
    pub(crate) cookies: Arc<CredentialCell>,
    pub(crate) auth: Authenticator,
    pub(crate) uploader: Uploader,
    pub(crate) token: RwLock<Option<String>>,
}

impl GeminiWebClient {
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self, GeminiError> {
        let http = config.build_http()?;
        let cookies = Arc::new(CredentialCell::new(credentials));
        let auth = Authenticator::new(
            http.clone(),
            &config.endpoints.landing,
            &config.endpoints.rotate,
            &config.user_agent,
            Arc::clone(&cookies),
        );
        let uploader = Uploader::new(http.clone(), &config.endpoints.upload);

        Ok(Self {
            config,
            http,
            cookies,
            auth,
            uploader,
            token: RwLock::new(None),
        })
    }

    /// Fetch and store a fresh access token. Must succeed before `generate`.
    pub async fn initialize(&self) -> Result<String, GeminiError> {
        let token = self.auth.fetch_access_token().await?;
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.clone());
        Ok(token)
    }

    /// Renew the rotating cookie. Returns the updated pair for the caller to
    /// persist; on failure the current pair stays in use.
    pub async fn rotate(&self) -> Result<Credentials, GeminiError> {
        let next = self.auth.rotate().await?;
        Ok((*next).clone())
    }

    /// Swap in a new cookie pair (e.g. after the old one expired). The
    /// access token is dropped; call `initialize` again.
    pub fn replace_credentials(&self, credentials: Credentials) {
        self.cookies.store(credentials);
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn credentials(&self) -> Credentials {
        (*self.cookies.snapshot()).clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .filter(|t| !t.is_empty())
    }

    pub fn is_initialized(&self) -> bool {
        self.access_token().is_some()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Underlying HTTP client, e.g. for downloading images.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub async fn upload_bytes(
        &self,
        data: Vec<u8>,
        filename: &str,
    ) -> Result<UploadedFileRef, GeminiError> {
        self.uploader.upload_bytes(data, filename).await
    }

    pub async fn upload_file(&self, path: &Path) -> Result<UploadedFileRef, GeminiError> {
        Ok(self.uploader.upload_file(path).await?.file_ref)
    }

    /// Start a new conversation.
    pub fn start_chat(&self) -> ChatSession {
        ChatSession::new()
    }

    /// Continue a conversation from a persisted triple.
    pub fn resume_chat(&self, state: SessionState) -> ChatSession {
        ChatSession::resume(state)
    }
}

impl std::fmt::Debug for GeminiWebClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiWebClient")
            .field("endpoints", &self.config.endpoints)
            .field("locale", &self.config.locale)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
