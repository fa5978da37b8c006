use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use pricedrop_core::orders::ReturnWindow;
use pricedrop_core::pricing::AddressScheme;
use pricedrop_core::PipelineConfig;
use pricedrop_market_data::ExtractorKind;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub pipeline: PipelineConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source. Unparsable numbers fall back to their
    /// defaults; an unparsable listen address or enum name is an error.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let listen_addr: SocketAddr = var("PD_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid PD_LISTEN_ADDR")?;
        let cors_allow = var("PD_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let mut pipeline = PipelineConfig::default();
        if let Some(n) = var("PD_MAX_CONCURRENT_FETCHES").and_then(|v| v.parse().ok()) {
            pipeline.max_concurrent_fetches = n;
        }
        if let Some(ms) = var("PD_FETCH_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            pipeline.fetch_timeout = Duration::from_millis(ms);
        }
        pipeline.requests_per_minute =
            var("PD_REQUESTS_PER_MINUTE").and_then(|v| v.parse().ok());
        if let Some(base_url) = var("PD_BASE_URL") {
            pipeline.base_url = base_url;
        }
        if let Some(days) = var("PD_RETURN_WINDOW_DAYS").and_then(|v| v.parse().ok()) {
            pipeline.return_window = ReturnWindow::WithinDays(days);
        }
        if let Some(scheme) = var("PD_ADDRESS_SCHEME") {
            pipeline.address_scheme = scheme.parse::<AddressScheme>().map_err(anyhow::Error::msg)?;
        }
        if let Some(extractor) = var("PD_EXTRACTOR") {
            pipeline.extractor = extractor.parse::<ExtractorKind>().map_err(anyhow::Error::msg)?;
        }
        if let Some(selector) = var("PD_PRICE_SELECTOR") {
            pipeline.markers.price_selector = selector;
        }

        Ok(Self {
            listen_addr,
            cors_allow,
            pipeline,
        })
    }
}
