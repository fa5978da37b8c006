//! Pricedrop Core - purchase history parsing, live price enrichment and
//! price change classification.
//!
//! The storefront itself is reached through the `Transport` trait from
//! `pricedrop-market-data`, so nothing here touches the network directly.

pub mod classification;
pub mod config;
pub mod constants;
pub mod errors;
pub mod orders;
pub mod pricing;
pub mod service;

pub use classification::{classify, CategorizedResult};
pub use config::PipelineConfig;
pub use orders::PurchaseRecord;
pub use service::{PriceCheckService, PriceCheckServiceTrait};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
