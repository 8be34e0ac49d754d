//! Page probe: fetch a target page once and report what it looks like.

pub mod fetcher;
pub mod signals;

use std::sync::Arc;
use std::time::Instant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ProbeConfig;
use crate::error::Result;
use fetcher::{Fetcher, ProbeRequest};
use signals::{probe_page, PageSignals};

pub use fetcher::{FetchError, HttpFetcher, RawResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeMethod {
    #[serde(rename = "fetch-parse")]
    FetchParse,
}

/// Result of one probe method. Failures are recorded here, not returned as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    pub method: ProbeMethod,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageSignals>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResult {
    pub fn succeeded(method: ProbeMethod, size: usize, status: u16, signals: PageSignals) -> Self {
        ProbeResult {
            method,
            success: true,
            response_size: Some(size),
            status_code: Some(status),
            page_info: Some(signals),
            error: None,
        }
    }

    pub fn failed(method: ProbeMethod, err: &FetchError) -> Self {
        ProbeResult {
            method,
            success: false,
            response_size: None,
            status_code: None,
            page_info: None,
            error: Some(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeMethods {
    #[serde(rename = "axios")]
    pub fetch_parse: ProbeResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Success,
}

/// Envelope around the method results.
///
/// `status` only says the probe ran; whether the page was actually fetched
/// is in each method's own `success` flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeReport {
    pub timestamp: DateTime<Utc>,
    pub methods: ProbeMethods,
    pub status: ReportStatus,
}

/// Runs the fetch-parse probe against `url`.
///
/// Network failures end up inside the report. An `Err` means the probe itself
/// could not run: the URL was invalid, or the fetcher or parser panicked.
pub async fn run_probe(fetcher: Arc<dyn Fetcher>, url: &str, config: &ProbeConfig) -> Result<ProbeReport> {
    let request = ProbeRequest::new(url, config)?;
    tracing::info!("Probing {}", request.url());
    let start = Instant::now();

    // Own task so a panicking fetcher comes back as a JoinError
    let task_request = request.clone();
    let fetched = tokio::spawn(async move { fetcher.fetch(&task_request).await }).await?;

    let result = match fetched {
        Ok(RawResponse { body, status, size }) => {
            // html5ever parsing is CPU-bound; a panic here comes back as a JoinError
            let signals = tokio::task::spawn_blocking(move || probe_page(&body)).await?;
            tracing::info!(
                "Probe of {} succeeded: status {}, {} bytes, {} music links in {:?}",
                request.url(),
                status,
                size,
                signals.music_link_count(),
                start.elapsed()
            );
            ProbeResult::succeeded(ProbeMethod::FetchParse, size, status, signals)
        }
        Err(err) => {
            tracing::warn!("Probe of {} failed after {:?}: {}", request.url(), start.elapsed(), err);
            ProbeResult::failed(ProbeMethod::FetchParse, &err)
        }
    };

    Ok(ProbeReport {
        timestamp: Utc::now(),
        methods: ProbeMethods { fetch_parse: result },
        status: ReportStatus::Success,
    })
}
