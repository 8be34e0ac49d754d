use std::time::{Duration, Instant};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use reqwest::header::HeaderMap;
use url::Url;

use crate::config::ProbeConfig;
use crate::error::{AppError, Result};

/// A validated probe target plus the headers and timeout to fetch it with.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    url: Url,
    headers: HeaderMap,
    timeout: Duration,
}

impl ProbeRequest {
    pub fn new(url: &str, config: &ProbeConfig) -> Result<Self> {
        let parsed = Url::parse(url)
            .map_err(|e| AppError::InvalidUrl(format!("{}: {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                url,
                parsed.scheme()
            )));
        }

        Ok(ProbeRequest {
            url: parsed,
            headers: config.headers.clone(),
            timeout: config.timeout,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Outcome of a completed HTTP exchange, whatever its status code.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub body: String,
    pub status: u16,
    pub size: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("timeout of {}ms exceeded", .0.as_millis())]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl FetchError {
    fn classify(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(timeout)
        } else if err.is_connect() {
            FetchError::Connect(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

/// Retrieves a page for probing. Implementations make exactly one attempt.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &ProbeRequest) -> std::result::Result<RawResponse, FetchError>;
}

/// Plain HTTP GET via reqwest. Any completed exchange is a success, including 4xx/5xx.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        // The per-request timeout bounds connect and body read together
        let client = ClientBuilder::new()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &ProbeRequest) -> std::result::Result<RawResponse, FetchError> {
        let start = Instant::now();
        let timeout = request.timeout();

        let response = self
            .client
            .get(request.url().clone())
            .headers(request.headers().clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::classify(e, timeout))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::classify(e, timeout))?;

        tracing::debug!(
            "Fetched {} ({} bytes, status {}) in {:?}",
            request.url(),
            body.len(),
            status,
            start.elapsed()
        );

        Ok(RawResponse {
            size: body.len(),
            body,
            status,
        })
    }
}
