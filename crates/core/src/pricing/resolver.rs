//! Live price lookup for a single record.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use rust_decimal::Decimal;

use pricedrop_market_data::{
    host_of, inspect_listing, round_currency, HostRateLimiter, ListingPage, PageMarkers,
    PriceExtractor, RateLimitConfig, ScrapeError, Transport,
};

use super::address::AddressScheme;
use crate::config::PipelineConfig;
use crate::orders::PurchaseRecord;

/// Result of one lookup attempt.
#[derive(Debug)]
pub enum ResolutionOutcome {
    /// Current price, rounded to cents.
    Resolved(Decimal),
    Unavailable,
    /// We were served an anti-automation page.
    Blocked,
    FetchError(ScrapeError),
}

impl ResolutionOutcome {
    pub fn price(&self) -> Option<Decimal> {
        match self {
            Self::Resolved(price) => Some(*price),
            _ => None,
        }
    }
}

/// Resolves the live price of one record.
///
/// Every failure is reported as an outcome. Implementations never fail in a
/// way that would abort sibling lookups.
#[async_trait]
pub trait PriceResolver: Send + Sync {
    async fn resolve(&self, record: &PurchaseRecord) -> ResolutionOutcome;
}

/// Resolver that fetches the storefront listing page and reads it.
pub struct ListingPriceResolver {
    transport: Arc<dyn Transport>,
    extractor: Box<dyn PriceExtractor>,
    markers: PageMarkers,
    base_url: String,
    scheme: AddressScheme,
    fetch_timeout: Duration,
    rate_limiter: Option<HostRateLimiter>,
}

impl ListingPriceResolver {
    pub fn new(transport: Arc<dyn Transport>, config: &PipelineConfig) -> Self {
        Self {
            transport,
            extractor: config.extractor.build(&config.markers),
            markers: config.markers.clone(),
            base_url: config.base_url.clone(),
            scheme: config.address_scheme,
            fetch_timeout: config.fetch_timeout,
            rate_limiter: config
                .requests_per_minute
                .map(|rpm| HostRateLimiter::new(RateLimitConfig::per_minute(rpm))),
        }
    }

    /// Swap the price extraction strategy.
    pub fn with_extractor(mut self, extractor: Box<dyn PriceExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn address_for(&self, record: &PurchaseRecord) -> String {
        self.scheme.listing_address(&self.base_url, record)
    }

    /// Fetch a page and return its body when the status is a success.
    async fn fetch_page(&self, address: &str) -> Result<String, ScrapeError> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.acquire(&host_of(address)).await;
        }

        let response = tokio::time::timeout(self.fetch_timeout, self.transport.fetch(address))
            .await
            .map_err(|_| ScrapeError::Timeout(self.fetch_timeout))??;

        if response.status == 429 {
            return Err(ScrapeError::RateLimited {
                host: host_of(address),
            });
        }
        if !response.is_success() {
            return Err(ScrapeError::HttpStatus {
                status: response.status,
                address: address.to_string(),
            });
        }

        Ok(response.text())
    }
}

#[async_trait]
impl PriceResolver for ListingPriceResolver {
    async fn resolve(&self, record: &PurchaseRecord) -> ResolutionOutcome {
        let address = self.address_for(record);
        debug!("Resolving price for '{}' at {}", record.item_id(), address);

        let body = match self.fetch_page(&address).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Fetch failed for '{}': {}", record.item_id(), e);
                return ResolutionOutcome::FetchError(e);
            }
        };

        match inspect_listing(&body, &self.markers, self.extractor.as_ref()) {
            ListingPage::Priced(price) => ResolutionOutcome::Resolved(round_currency(price)),
            ListingPage::Unavailable => {
                info!("'{}' is listed as unavailable", record.name());
                ResolutionOutcome::Unavailable
            }
            ListingPage::Blocked => {
                warn!(
                    "Served an anti-automation page for '{}' ({})",
                    record.name(),
                    address
                );
                ResolutionOutcome::Blocked
            }
            ListingPage::Unpriced => {
                warn!(
                    "No price found by {} extractor for '{}'",
                    self.extractor.name(),
                    record.item_id()
                );
                ResolutionOutcome::FetchError(ScrapeError::PriceNotFound { address })
            }
        }
    }
}
