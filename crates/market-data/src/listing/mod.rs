//! Listing page inspection.
//!
//! A fetched product page is sorted into one of four shapes: the listing is
//! unavailable, we were served an anti-automation page, a price was found,
//! or nothing usable was found.

mod extract;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use extract::{
    ExtractorKind, MarkerExtractor, PriceExtractor, SelectorExtractor, DEFAULT_PRICE_MARKER,
    DEFAULT_PRICE_SELECTOR,
};

/// Marker that only appears on listings that cannot be bought.
pub const DEFAULT_UNAVAILABLE_MARKER: &str =
    r#"<span class="a-color-price a-text-bold">Currently unavailable.</span>"#;

/// Text that only appears on the captcha page served to automated clients.
pub const DEFAULT_CAPTCHA_MARKER: &str =
    "For information about migrating to our APIs refer to our Marketplace APIs";

/// Marker strings the inspector looks for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMarkers {
    pub unavailable: String,
    pub captcha: String,
    /// Token the marker extractor scans for.
    pub price: String,
    /// CSS selector the selector extractor queries.
    pub price_selector: String,
}

impl Default for PageMarkers {
    fn default() -> Self {
        Self {
            unavailable: DEFAULT_UNAVAILABLE_MARKER.to_string(),
            captcha: DEFAULT_CAPTCHA_MARKER.to_string(),
            price: DEFAULT_PRICE_MARKER.to_string(),
            price_selector: DEFAULT_PRICE_SELECTOR.to_string(),
        }
    }
}

/// What a listing page says about the item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListingPage {
    Unavailable,
    Blocked,
    Priced(Decimal),
    /// No marker matched and the extractor found nothing.
    Unpriced,
}

/// Inspect a decoded page body.
///
/// The unavailable marker wins over the captcha marker, and both win over
/// any price on the page: unavailable listings still show prices for other
/// sellers or related items.
pub fn inspect_listing(
    body: &str,
    markers: &PageMarkers,
    extractor: &dyn PriceExtractor,
) -> ListingPage {
    if contains_marker(body, &markers.unavailable) {
        return ListingPage::Unavailable;
    }
    if contains_marker(body, &markers.captcha) {
        return ListingPage::Blocked;
    }
    match extractor.extract(body) {
        Some(price) => ListingPage::Priced(price),
        None => ListingPage::Unpriced,
    }
}

fn contains_marker(body: &str, marker: &str) -> bool {
    !marker.is_empty() && body.contains(marker)
}
