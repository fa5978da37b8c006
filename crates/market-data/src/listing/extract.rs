//! Price extraction strategies.
//!
//! Scraped listing pages have no stable contract, so the matching strategy
//! lives behind [`PriceExtractor`] and can change without touching callers.

use log::warn;
use rust_decimal::Decimal;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use super::PageMarkers;
use crate::price::{parse_amount, parse_decimal_run};

/// Default price marker: the first off-screen price span on a listing page.
pub const DEFAULT_PRICE_MARKER: &str = r#"<span class="a-offscreen">$"#;

/// Default CSS selector for [`SelectorExtractor`].
pub const DEFAULT_PRICE_SELECTOR: &str = "span.a-offscreen";

/// Pulls the current price out of a listing document.
pub trait PriceExtractor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns the first price found, unrounded, or `None` when the document
    /// carries no usable price.
    fn extract(&self, document: &str) -> Option<Decimal>;
}

/// Which extractor to build from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtractorKind {
    #[default]
    Marker,
    Selector,
}

impl ExtractorKind {
    /// Build the extractor from the configured price marker or selector.
    ///
    /// A selector that does not parse falls back to [`DEFAULT_PRICE_SELECTOR`].
    pub fn build(self, markers: &PageMarkers) -> Box<dyn PriceExtractor> {
        match self {
            Self::Marker => Box::new(MarkerExtractor::new(markers.price.as_str())),
            Self::Selector => match SelectorExtractor::new(markers.price_selector.as_str()) {
                Some(extractor) => Box::new(extractor),
                None => {
                    warn!(
                        "Invalid price selector '{}', using '{}'",
                        markers.price_selector, DEFAULT_PRICE_SELECTOR
                    );
                    Box::new(SelectorExtractor::default())
                }
            },
        }
    }
}

impl std::str::FromStr for ExtractorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "marker" => Ok(Self::Marker),
            "selector" => Ok(Self::Selector),
            other => Err(format!("unknown extractor '{}'", other)),
        }
    }
}

/// Substring scan: the price is the run right after the first marker,
/// up to the next `<`.
#[derive(Clone, Debug)]
pub struct MarkerExtractor {
    marker: String,
}

impl MarkerExtractor {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl Default for MarkerExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE_MARKER)
    }
}

impl PriceExtractor for MarkerExtractor {
    fn name(&self) -> &'static str {
        "marker"
    }

    fn extract(&self, document: &str) -> Option<Decimal> {
        if self.marker.is_empty() {
            return None;
        }
        let start = document.find(&self.marker)? + self.marker.len();
        let rest = &document[start..];
        let end = rest.find('<')?;
        parse_decimal_run(&rest[..end])
    }
}

/// DOM query: the first element matching the selector whose text reads as a price.
#[derive(Clone, Debug)]
pub struct SelectorExtractor {
    selector: String,
}

impl SelectorExtractor {
    /// Build from a CSS selector. Returns `None` when the selector does not parse.
    pub fn new(selector: impl Into<String>) -> Option<Self> {
        let selector = selector.into();
        Selector::parse(&selector).ok()?;
        Some(Self { selector })
    }
}

impl Default for SelectorExtractor {
    fn default() -> Self {
        Self {
            selector: DEFAULT_PRICE_SELECTOR.to_string(),
        }
    }
}

impl PriceExtractor for SelectorExtractor {
    fn name(&self) -> &'static str {
        "selector"
    }

    fn extract(&self, document: &str) -> Option<Decimal> {
        // Validated in `new`; an invalid selector here just yields no price.
        let selector = Selector::parse(&self.selector).ok()?;
        let html = Html::parse_document(document);
        html.select(&selector).find_map(|element| {
            let text: String = element.text().collect();
            parse_amount(&text)
        })
    }
}
