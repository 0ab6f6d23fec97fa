//! Downloading reply images to disk.

use std::path::Path;

use reqwest::header::COOKIE;
use tracing::debug;

use crate::models::{GeneratedImage, Image};
use crate::GeminiError;

/// Size suffix the image host understands for the full-resolution variant.
const FULL_SIZE_SUFFIX: &str = "=s2048";

impl Image {
    /// Download to `dest`, creating parent directories as needed.
    pub async fn save(&self, http: &reqwest::Client, dest: &Path) -> Result<(), GeminiError> {
        download(http, &self.url, None, dest).await
    }
}

impl GeneratedImage {
    /// Download to `dest` with the cookies the image was issued under.
    /// `full_size` requests the full-resolution rendition.
    pub async fn save(
        &self,
        http: &reqwest::Client,
        dest: &Path,
        full_size: bool,
    ) -> Result<(), GeminiError> {
        let url = if full_size {
            format!("{}{FULL_SIZE_SUFFIX}", self.image.url)
        } else {
            self.image.url.clone()
        };
        let cookie = self.cookies.cookie_header();
        download(http, &url, Some(&cookie), dest).await
    }
}

async fn download(
    http: &reqwest::Client,
    url: &str,
    cookie: Option<&str>,
    dest: &Path,
) -> Result<(), GeminiError> {
    debug!(url, dest = %dest.display(), "downloading image");

    let mut request = http.get(url);
    if let Some(cookie) = cookie {
        request = request.header(COOKIE, cookie);
    }
    let response = request
        .send()
        .await
        .map_err(|e| GeminiError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(GeminiError::Network(format!(
            "image download returned HTTP {status}"
        )));
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|e| GeminiError::Network(e.to_string()))?;

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(dest, &bytes).await?;
    Ok(())
}
