//! reqwest-backed transport for storefront listing pages.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;

use super::{FetchResponse, Transport};
use crate::errors::TransportError;

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Desktop browser user agent. Storefronts serve a captcha far more often
/// to obvious bots.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36";

/// Settings for [`HttpTransport`].
#[derive(Clone, Debug)]
pub struct HttpTransportConfig {
    pub user_agent: String,
    /// Whole-request timeout applied by the client.
    pub timeout: Duration,
    pub max_idle_per_host: usize,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: REQUEST_TIMEOUT,
            max_idle_per_host: 16,
        }
    }
}

/// Transport that issues plain GET requests with browser-like headers.
///
/// Compression (`gzip`, `deflate`, `br`) is negotiated and decoded by reqwest,
/// so callers always receive the decoded body.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with default settings.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(HttpTransportConfig::default())
    }

    pub fn with_config(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(config.user_agent)
            .default_headers(browser_headers())
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, address: &str) -> Result<FetchResponse, TransportError> {
        let response = self.client.get(address).send().await?;
        let status = response.status().as_u16();
        debug!("GET {} -> {}", address, status);

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(FetchResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
    headers
}
