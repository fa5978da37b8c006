//! Live price resolution.
//!
//! - [`AddressScheme`] builds a listing address from a record
//! - [`PriceResolver`] looks up one record; [`ListingPriceResolver`] does it by
//!   fetching and reading the listing page
//! - [`enrich_records`] runs the resolver over a whole batch with bounded concurrency

mod address;
mod enrichment;
mod resolver;

pub use address::AddressScheme;
pub use enrichment::{enrich_records, Enriched, EnrichmentReport};
pub use resolver::{ListingPriceResolver, PriceResolver, ResolutionOutcome};
