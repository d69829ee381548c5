//! HTTP client for fetching product pages
//!
//! `PageFetcher` is the seam the scraper depends on; `HttpClient` is the
//! reqwest implementation used outside of tests. One request per call: the
//! retry policy lives with the caller.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::config::ScraperConfig;
use super::scraping_utils::RequestHeaders;

/// Raw page returned by a successful request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    /// URL after redirects
    pub final_url: String,
    /// Body decoded with the charset from `Content-Type` (UTF-8 when absent)
    pub body: String,
}

/// Why a single fetch attempt failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out after {seconds}s: {url}")]
    Timeout { url: String, seconds: u64 },

    #[error("HTTP request failed: {message}")]
    Request { message: String },

    #[error("HTTP error {status}: {url}")]
    Status { status: u16, url: String },

    #[error("failed to read response body: {message}")]
    Body { message: String },
}

/// Performs one GET for the scraper
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get(
        &self,
        url: &str,
        headers: &RequestHeaders,
        timeout: Duration,
    ) -> Result<FetchedPage, FetchError>;
}

/// Configuration for HTTP client behavior
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Whether to follow redirects
    pub follow_redirects: bool,
    /// Maximum redirects followed per request
    pub max_redirects: usize,
    /// Keep cookies between requests of the same session
    pub cookie_store: bool,
}

impl HttpClientConfig {
    /// Create HttpClientConfig from the scraper settings
    pub const fn from_scraper_config(config: &ScraperConfig) -> Self {
        Self {
            follow_redirects: config.follow_redirects,
            max_redirects: config.max_redirects,
            cookie_store: true,
        }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            follow_redirects: true,
            max_redirects: 10,
            cookie_store: true,
        }
    }
}

/// reqwest-backed fetcher; the underlying connection pool is reused across calls
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .cookie_store(config.cookie_store)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(config.max_redirects)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub const fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    fn header_map(headers: &RequestHeaders) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    map.insert(name, value);
                }
                _ => warn!("Dropping malformed request header '{}'", name),
            }
        }
        map
    }

    fn classify(url: &str, timeout: Duration, error: &reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                seconds: timeout.as_secs(),
            }
        } else {
            FetchError::Request {
                message: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn get(
        &self,
        url: &str,
        headers: &RequestHeaders,
        timeout: Duration,
    ) -> Result<FetchedPage, FetchError> {
        info!("🌐 HTTP GET: {}", url);

        let response = self
            .client
            .get(url)
            .headers(Self::header_map(headers))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Self::classify(url, timeout, &e))?;

        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let final_url = response.url().to_string();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                Self::classify(url, timeout, &e)
            } else {
                FetchError::Body {
                    message: e.to_string(),
                }
            }
        })?;

        debug!("Fetched {} ({} bytes, status {})", final_url, body.len(), status);
        Ok(FetchedPage {
            status: status.as_u16(),
            final_url,
            body,
        })
    }
}
