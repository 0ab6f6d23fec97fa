//! Client core for the Gemini web chat endpoint.
//!
//! Talks to the browser-facing service with the account's session cookies
//! rather than an API key:
//! - Access-token bootstrap from the landing page
//! - Periodic rotation of the short-lived session cookie
//! - Double-encoded `f.req` envelopes for the generate endpoint
//! - Multi-chunk response decoding with cross-chunk image reassembly
//! - Per-conversation continuation tracking

pub mod auth;
pub mod client;
pub mod credentials;
pub mod image;
pub mod models;
pub mod protocol;
pub mod rotation;
pub mod session;
pub mod upload;

use std::path::PathBuf;

use async_trait::async_trait;

pub use client::{ClientConfig, Endpoints, GeminiWebClient};
pub use credentials::{CredentialCell, Credentials};
pub use models::{Candidate, GeneratedImage, Image, ModelOutput, SessionState, UploadedFileRef};
pub use rotation::spawn_rotation;
pub use session::ChatSession;

/// Anything that can run one generation turn against the service.
///
/// `GeminiWebClient` is the production implementation; sessions only depend
/// on this trait.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        attachments: &[PathBuf],
        state: &SessionState,
    ) -> Result<ModelOutput, GeminiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("client is not initialized, call initialize() first")]
    NotInitialized,
    #[error("upload failed: {0}")]
    Upload(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("no candidates found in the response")]
    EmptyResponse,
    #[error("session is busy with another request")]
    Busy,
    #[error("candidate index {index} out of range ({count} candidates)")]
    InvalidCandidate { index: usize, count: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
