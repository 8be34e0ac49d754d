use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use reqwest::header::{self, HeaderMap, HeaderValue};
use crate::error::{AppError, Result};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_PROBE_TARGET: &str = "https://www.22a5.com";
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub probe: ProbeConfig,
}

/// Settings for the page probe. Built once at startup and shared read-only.
#[derive(Clone, Debug)]
pub struct ProbeConfig {
    pub target_url: String,
    pub timeout: Duration,
    pub headers: HeaderMap,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            target_url: DEFAULT_PROBE_TARGET.to_string(),
            timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            headers: browser_headers(),
        }
    }
}

/// The fixed header set sent with every probe so the target serves its normal desktop page.
pub fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("zh-CN,zh;q=0.8,zh-TW;q=0.7,zh-HK;q=0.5,en-US;q=0.3,en;q=0.2"),
    );
    headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(header::UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("Invalid port: {}", e)))?,
            None => DEFAULT_PORT,
        };
        let ip = IpAddr::from_str(host.trim())
            .map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;

        let timeout_secs = match lookup("PROBE_TIMEOUT_SECS") {
            Some(secs) => match secs.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(AppError::Config("Probe timeout must be positive".to_string()));
                }
                Ok(secs) => secs,
                Err(e) => return Err(AppError::Config(format!("Invalid probe timeout: {}", e))),
            },
            None => DEFAULT_PROBE_TIMEOUT_SECS,
        };

        let probe = ProbeConfig {
            target_url: lookup("PROBE_TARGET_URL").unwrap_or_else(|| DEFAULT_PROBE_TARGET.to_string()),
            timeout: Duration::from_secs(timeout_secs),
            headers: browser_headers(),
        };

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            probe,
        })
    }
}
