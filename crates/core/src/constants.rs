use std::time::Duration;

/// Storefront the order exports come from
pub const DEFAULT_BASE_URL: &str = "https://www.amazon.com";

/// Simultaneous listing fetches per run
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 10;

/// Per-fetch timeout
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Characters of the product title used by legacy slug addresses
pub const LEGACY_SLUG_LENGTH: usize = 15;

// Header labels of the "Items" order report
pub const TITLE_HEADER: &str = "Title";
pub const ORDER_DATE_HEADER: &str = "Order Date";
pub const ITEM_ID_HEADER: &str = "ASIN/ISBN";
pub const UNIT_PRICE_HEADER: &str = "Purchase Price Per Unit";
