//! End-to-end price check: parse, filter, enrich, classify.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info};

use pricedrop_market_data::Transport;

use crate::classification::{classify, CategorizedResult};
use crate::config::PipelineConfig;
use crate::errors::Result;
use crate::orders::parse_orders;
use crate::pricing::{enrich_records, ListingPriceResolver, PriceResolver};

/// Runs a whole purchase-history export through the pipeline.
#[async_trait]
pub trait PriceCheckServiceTrait: Send + Sync {
    /// Check every order in `csv` against its live price.
    ///
    /// Fails only for batch-fatal problems (format or row errors). Lookup
    /// failures end up in the `unavailable` bucket.
    async fn check(&self, csv: &str) -> Result<CategorizedResult>;
}

pub struct PriceCheckService {
    config: PipelineConfig,
    resolver: Arc<dyn PriceResolver>,
}

impl PriceCheckService {
    /// Build a service that reads listing pages through `transport`.
    pub fn new(config: PipelineConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        let resolver = ListingPriceResolver::new(transport, &config);
        Ok(Self {
            config,
            resolver: Arc::new(resolver),
        })
    }

    /// Build a service around an arbitrary resolver.
    pub fn with_resolver(config: PipelineConfig, resolver: Arc<dyn PriceResolver>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, resolver })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Same as [`PriceCheckServiceTrait::check`] with an explicit evaluation
    /// date for the return window.
    pub async fn check_as_of(&self, csv: &str, today: NaiveDate) -> Result<CategorizedResult> {
        let records = parse_orders(csv, &self.config.required_columns)?;
        let parsed = records.len();
        let records = self.config.return_window.apply(records, today)?;
        debug!("Checking {} of {} parsed orders", records.len(), parsed);

        let enriched =
            enrich_records(records, self.resolver.as_ref(), self.config.concurrency()).await;
        let result = classify(enriched.records);

        info!(
            "Price check complete: {} reduced, {} unchanged, {} increased, {} unavailable",
            result.reduced.len(),
            result.unchanged.len(),
            result.increased.len(),
            result.unavailable.len()
        );
        Ok(result)
    }
}

#[async_trait]
impl PriceCheckServiceTrait for PriceCheckService {
    async fn check(&self, csv: &str) -> Result<CategorizedResult> {
        self.check_as_of(csv, chrono::Local::now().date_naive()).await
    }
}
