use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pricedrop_market_data::round_currency;

/// One purchase-order line item.
///
/// Created by the parser with no current price. The enrichment step attaches
/// the live price at most once; a record that never gets one stays
/// unresolved (`current_price` is `None`).
///
/// Serialized field names follow the wire format the web frontend reads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    name: String,
    #[serde(rename = "dateOrdered")]
    ordered_at: String,
    #[serde(rename = "asin")]
    item_id: String,
    original_price: Decimal,
    current_price: Option<Decimal>,
    /// `original_price - current_price`; positive means the price dropped.
    #[serde(rename = "priceDrop")]
    price_delta: Option<Decimal>,
}

impl PurchaseRecord {
    pub fn new(
        name: impl Into<String>,
        ordered_at: impl Into<String>,
        item_id: impl Into<String>,
        original_price: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            ordered_at: ordered_at.into(),
            item_id: item_id.into(),
            original_price,
            current_price: None,
            price_delta: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Order date exactly as it appeared in the export.
    pub fn ordered_at(&self) -> &str {
        &self.ordered_at
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn original_price(&self) -> Decimal {
        self.original_price
    }

    pub fn current_price(&self) -> Option<Decimal> {
        self.current_price
    }

    pub fn price_delta(&self) -> Option<Decimal> {
        self.price_delta
    }

    /// True once a live price has been attached.
    pub fn is_resolved(&self) -> bool {
        self.current_price.is_some()
    }

    /// Attach the live price and compute the delta, rounded to cents.
    pub(crate) fn apply_current_price(&mut self, price: Decimal) {
        debug_assert!(
            self.current_price.is_none(),
            "current price written twice for {}",
            self.item_id
        );
        self.current_price = Some(price);
        self.price_delta = Some(round_currency(self.original_price - price));
    }
}
