//! Pricedrop Market Data Crate
//!
//! Fetching and reading storefront listing pages for the price drop checker.
//!
//! # Overview
//!
//! - [`Transport`]: the `fetch(address) -> (status, body)` capability, with a
//!   reqwest implementation in [`HttpTransport`]
//! - [`inspect_listing`]: sorts a page into unavailable / blocked / priced / unpriced
//! - [`PriceExtractor`]: pluggable price matching ([`MarkerExtractor`], [`SelectorExtractor`])
//! - [`HostRateLimiter`]: optional per-host pacing
//!
//! ```text
//! address --> Transport --> FetchResponse --> inspect_listing --> ListingPage
//!                                                   |
//!                                             PriceExtractor
//! ```

pub mod errors;
pub mod listing;
pub mod price;
pub mod rate_limiter;
pub mod transport;

pub use errors::{ScrapeError, TransportError};
pub use listing::{
    inspect_listing, ExtractorKind, ListingPage, MarkerExtractor, PageMarkers, PriceExtractor,
    SelectorExtractor,
};
pub use price::{parse_amount, round_currency};
pub use rate_limiter::{host_of, HostRateLimiter, RateLimitConfig};
pub use transport::{FetchResponse, HttpTransport, HttpTransportConfig, Transport};
