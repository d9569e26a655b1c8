use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::settings::Settings;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed for {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

/// Anything that can hand back the HTML behind a URL.
pub trait PageSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Blocking-style HTTP source: one request at a time, fixed pause after each.
pub struct HttpSource {
    client: reqwest::Client,
    delay: Duration,
}

impl HttpSource {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            delay: Duration::from_millis(settings.request_delay_ms),
        })
    }

    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let request_err = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(request_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(request_err)
    }
}

impl PageSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "fetching");
        let result = self.get(url).await;
        // Throttle applies whether or not the request succeeded.
        tokio::time::sleep(self.delay).await;
        result
    }
}

// ── Tests ──
