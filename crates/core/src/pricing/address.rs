use serde::{Deserialize, Serialize};
use urlencoding::encode;

use crate::constants::LEGACY_SLUG_LENGTH;
use crate::orders::PurchaseRecord;

/// How a listing address is built from a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddressScheme {
    /// `{base}/dp/{item_id}/`
    #[default]
    Canonical,
    /// `{base}/{slug}/dp/{item_id}/`, slug being the start of the title.
    /// The storefront ignores the slug; older links carried one.
    LegacySlug,
}

impl AddressScheme {
    pub fn listing_address(&self, base_url: &str, record: &PurchaseRecord) -> String {
        let base = base_url.trim_end_matches('/');
        let item_id = encode(record.item_id());
        match self {
            Self::Canonical => format!("{}/dp/{}/", base, item_id),
            Self::LegacySlug => {
                let slug: String = record.name().chars().take(LEGACY_SLUG_LENGTH).collect();
                format!("{}/{}/dp/{}/", base, encode(&slug), item_id)
            }
        }
    }
}

impl std::str::FromStr for AddressScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "canonical" => Ok(Self::Canonical),
            "legacy" | "legacyslug" | "legacy_slug" => Ok(Self::LegacySlug),
            other => Err(format!("unknown address scheme '{}'", other)),
        }
    }
}
