//! HTTP client for the Go release index and downloads

use crate::core::{GoupError, GoupResult};
use crate::di::traits::{ConfigProvider, ReleaseSource};
use crate::release::types::{Release, ReleaseFile};
use async_trait::async_trait;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{header, Client as HttpClient};
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

const USER_AGENT: &str = concat!("goup/", env!("CARGO_PKG_VERSION"));

/// Release index client
pub struct ReleaseClient {
    http_client: HttpClient,
    config: Arc<dyn ConfigProvider>,
}

impl ReleaseClient {
    /// Create a new release client
    pub fn new(config: Arc<dyn ConfigProvider>) -> GoupResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| GoupError::Fetch(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    async fn get(&self, url: &str) -> GoupResult<reqwest::Response> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| GoupError::Fetch(format!("Failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(GoupError::Fetch(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        Ok(response)
    }

    fn progress_bar(total: Option<u64>) -> ProgressBar {
        match total {
            Some(len) => {
                let pb = ProgressBar::new(len);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template(
                            "[{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec})",
                        )
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("#>-"),
                );
                pb
            }
            None => ProgressBar::new_spinner(),
        }
    }
}

#[async_trait]
impl ReleaseSource for ReleaseClient {
    async fn fetch_releases(&self) -> GoupResult<Vec<Release>> {
        let url = self.config.release_index_url();
        let body = self
            .get(url)
            .await?
            .text()
            .await
            .map_err(|e| GoupError::Fetch(format!("Failed to read release index: {}", e)))?;

        let releases: Vec<Release> = serde_json::from_str(&body)?;
        tracing::debug!(count = releases.len(), url = %url, "fetched release index");
        Ok(releases)
    }

    async fn download(&self, file: &ReleaseFile, dest: &Path) -> GoupResult<u64> {
        let url = self.config.download_url(&file.filename);
        let response = self.get(&url).await?;

        let total = response
            .content_length()
            .or((file.size > 0).then_some(file.size));
        let pb = Self::progress_bar(total);

        let mut out = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                GoupError::Fetch(format!("Failed to read chunk from {}: {}", url, e))
            })?;
            out.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
            pb.set_position(downloaded);
        }
        out.flush().await?;
        pb.finish_and_clear();

        if file.size > 0 && downloaded != file.size {
            return Err(GoupError::Fetch(format!(
                "Incomplete download of {}: expected {} bytes, got {}",
                file.filename, file.size, downloaded
            )));
        }

        tracing::debug!(bytes = downloaded, url = %url, "download finished");
        Ok(downloaded)
    }
}
