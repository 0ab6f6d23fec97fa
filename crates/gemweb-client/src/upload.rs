//! File uploads to the content-push endpoint.
//!
//! The endpoint answers a multipart POST with a plain-text reference id
//! that the generate envelope then points at.

use std::path::Path;

use futures_util::future::try_join_all;
use tracing::debug;

use crate::models::UploadedFileRef;
use crate::protocol::Attachment;
use crate::GeminiError;

const PUSH_ID: &str = "feeds/mcudyrk2a4khkz";

#[derive(Debug, Clone)]
pub struct Uploader {
    http: reqwest::Client,
    url: String,
}

impl Uploader {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// Upload raw bytes under `filename` and return the server reference.
    pub async fn upload_bytes(
        &self,
        data: Vec<u8>,
        filename: &str,
    ) -> Result<UploadedFileRef, GeminiError> {
        debug!(filename, size = data.len(), "uploading file");

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| GeminiError::Upload(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(&self.url)
            .header("Push-ID", PUSH_ID)
            .multipart(form)
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeminiError::Upload(format!(
                "{filename}: upload returned HTTP {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;
        let file_ref = body.trim();
        if file_ref.is_empty() {
            return Err(GeminiError::Upload(format!(
                "{filename}: upload returned an empty reference"
            )));
        }
        Ok(file_ref.to_string())
    }

    /// Read a local file and upload it under its own file name.
    pub async fn upload_file(&self, path: &Path) -> Result<Attachment, GeminiError> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| GeminiError::Upload(format!("{} is not a file", path.display())))?;
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| GeminiError::Upload(format!("cannot read {}: {e}", path.display())))?;

        let file_ref = self.upload_bytes(data, &filename).await?;
        Ok(Attachment { file_ref, filename })
    }

    /// Upload every file concurrently. The result follows the input order
    /// regardless of completion order; the first failure aborts the batch.
    pub async fn upload_all<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> Result<Vec<Attachment>, GeminiError> {
        try_join_all(paths.iter().map(|p| self.upload_file(p.as_ref()))).await
    }
}
