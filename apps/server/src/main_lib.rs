use std::sync::Arc;

use pricedrop_core::{PriceCheckService, PriceCheckServiceTrait};
use pricedrop_market_data::{HttpTransport, HttpTransportConfig, Transport};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub price_check_service: Arc<dyn PriceCheckServiceTrait>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let transport = HttpTransport::with_config(HttpTransportConfig {
        timeout: config.pipeline.fetch_timeout,
        ..Default::default()
    })?;
    build_state_with_transport(config, Arc::new(transport))
}

/// Wire the service around an explicit transport.
pub fn build_state_with_transport(
    config: &Config,
    transport: Arc<dyn Transport>,
) -> anyhow::Result<Arc<AppState>> {
    let service = PriceCheckService::new(config.pipeline.clone(), transport)?;
    tracing::info!(
        "Price checks use {} with up to {} concurrent fetches",
        config.pipeline.base_url,
        config.pipeline.concurrency()
    );
    Ok(Arc::new(AppState {
        price_check_service: Arc::new(service),
    }))
}
