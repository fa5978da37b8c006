//! Pipeline configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use pricedrop_market_data::{ExtractorKind, PageMarkers, SelectorExtractor};

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_CONCURRENT_FETCHES};
use crate::errors::Error;
use crate::orders::{ColumnMapping, ReturnWindow};
use crate::pricing::AddressScheme;
use crate::Result;

/// Settings for one price check service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    /// Upper bound on simultaneous listing fetches. `0` is treated as `1`.
    pub max_concurrent_fetches: usize,
    /// Timeout applied to each fetch on its own, in milliseconds on the wire.
    #[serde(with = "duration_millis")]
    pub fetch_timeout: Duration,
    pub required_columns: ColumnMapping,
    pub address_scheme: AddressScheme,
    pub base_url: String,
    pub markers: PageMarkers,
    pub extractor: ExtractorKind,
    /// Per-host pacing; `None` disables it.
    pub requests_per_minute: Option<u32>,
    pub return_window: ReturnWindow,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            required_columns: ColumnMapping::default(),
            address_scheme: AddressScheme::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            markers: PageMarkers::default(),
            extractor: ExtractorKind::default(),
            requests_per_minute: None,
            return_window: ReturnWindow::default(),
        }
    }
}

impl PipelineConfig {
    /// Effective concurrency bound.
    pub fn concurrency(&self) -> usize {
        self.max_concurrent_fetches.max(1)
    }

    /// Reject settings that would make every lookup fail.
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::InvalidConfigValue(format!(
                "baseUrl must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.fetch_timeout.is_zero() {
            return Err(Error::InvalidConfigValue(
                "fetchTimeout must be greater than zero".to_string(),
            ));
        }
        if self.extractor == ExtractorKind::Selector
            && SelectorExtractor::new(self.markers.price_selector.as_str()).is_none()
        {
            return Err(Error::InvalidConfigValue(format!(
                "markers.priceSelector is not a valid CSS selector: '{}'",
                self.markers.price_selector
            )));
        }
        if self.requests_per_minute == Some(0) {
            return Err(Error::InvalidConfigValue(
                "requestsPerMinute must be greater than zero when set".to_string(),
            ));
        }
        Ok(())
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
