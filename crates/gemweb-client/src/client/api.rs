//! Generate call and the ContentGenerator implementation for GeminiWebClient.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::header::{COOKIE, ORIGIN, REFERER, USER_AGENT};
use reqwest::StatusCode;
use tracing::debug;

use crate::models::{ModelOutput, SessionState};
use crate::protocol::{decode_with, encode_with, Attachment};
use crate::{ContentGenerator, GeminiError};

use super::web_client::GeminiWebClient;

const ORIGIN_VALUE: &str = "https://gemini.google.com";
const REFERER_VALUE: &str = "https://gemini.google.com/";

impl GeminiWebClient {
    /// Upload `attachments`, send one turn and decode the reply.
    pub async fn generate(
        &self,
        prompt: &str,
        attachments: &[PathBuf],
        state: &SessionState,
    ) -> Result<ModelOutput, GeminiError> {
        let token = self.access_token().ok_or(GeminiError::NotInitialized)?;
        let uploaded = self.uploader.upload_all(attachments).await?;
        self.send_turn(&token, prompt, &uploaded, state).await
    }

    /// Like `generate`, for files that were already uploaded.
    pub async fn generate_with_refs(
        &self,
        prompt: &str,
        attachments: &[Attachment],
        state: &SessionState,
    ) -> Result<ModelOutput, GeminiError> {
        let token = self.access_token().ok_or(GeminiError::NotInitialized)?;
        self.send_turn(&token, prompt, attachments, state).await
    }

    async fn send_turn(
        &self,
        token: &str,
        prompt: &str,
        attachments: &[Attachment],
        state: &SessionState,
    ) -> Result<ModelOutput, GeminiError> {
        let layout = &self.config.layout;
        let envelope = encode_with(layout, prompt, attachments, state, &self.config.locale);
        let credentials = self.cookies.snapshot();

        debug!(
            prompt_len = prompt.len(),
            attachments = attachments.len(),
            new_conversation = state.is_new(),
            "Gemini generate request"
        );

        let response = self
            .http
            .post(&self.config.endpoints.generate)
            .query(&[
                ("bl", layout.build_label),
                ("f.sid", layout.session_id),
                ("hl", self.config.locale.as_str()),
                ("_reqid", layout.request_id),
                ("rt", "c"),
            ])
            .header(USER_AGENT, &self.config.user_agent)
            .header("X-Same-Domain", "1")
            .header(ORIGIN, ORIGIN_VALUE)
            .header(REFERER, REFERER_VALUE)
            .header(COOKIE, credentials.cookie_header())
            .form(&[("at", token), ("f.req", envelope.as_str())])
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GeminiError::Auth(format!(
                "generate rejected with HTTP {status}, re-initialize with fresh cookies"
            )));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(GeminiError::Network(format!("HTTP {status}: {text}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        let output = decode_with(layout, &body, &credentials)?;
        debug!(candidates = output.candidates.len(), "Gemini generate response");
        Ok(output)
    }
}

#[async_trait]
impl ContentGenerator for GeminiWebClient {
    async fn generate(
        &self,
        prompt: &str,
        attachments: &[PathBuf],
        state: &SessionState,
    ) -> Result<ModelOutput, GeminiError> {
        GeminiWebClient::generate(self, prompt, attachments, state).await
    }
}
