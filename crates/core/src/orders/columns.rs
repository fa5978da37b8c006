use serde::{Deserialize, Serialize};

use crate::constants::{ITEM_ID_HEADER, ORDER_DATE_HEADER, TITLE_HEADER, UNIT_PRICE_HEADER};
use crate::errors::FormatError;

/// Header label for each logical field the parser needs.
///
/// Export schemas drift between versions, so labels are configuration and
/// matched by name, never by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnMapping {
    pub title: String,
    pub order_date: String,
    pub item_id: String,
    pub unit_purchase_price: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            title: TITLE_HEADER.to_string(),
            order_date: ORDER_DATE_HEADER.to_string(),
            item_id: ITEM_ID_HEADER.to_string(),
            unit_purchase_price: UNIT_PRICE_HEADER.to_string(),
        }
    }
}

/// Column positions found in one particular header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndices {
    pub title: usize,
    pub order_date: usize,
    pub item_id: usize,
    pub unit_purchase_price: usize,
}

impl ColumnMapping {
    /// Locate every required label in `headers`.
    ///
    /// Labels match after trimming, ignoring ASCII case. All missing labels
    /// are reported together.
    pub fn resolve(&self, headers: &[String]) -> Result<ColumnIndices, FormatError> {
        let find = |label: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(label.trim()))
        };

        let title = find(&self.title);
        let order_date = find(&self.order_date);
        let item_id = find(&self.item_id);
        let unit_purchase_price = find(&self.unit_purchase_price);

        match (title, order_date, item_id, unit_purchase_price) {
            (Some(title), Some(order_date), Some(item_id), Some(unit_purchase_price)) => {
                Ok(ColumnIndices {
                    title,
                    order_date,
                    item_id,
                    unit_purchase_price,
                })
            }
            _ => {
                let missing = [
                    (title, &self.title),
                    (order_date, &self.order_date),
                    (item_id, &self.item_id),
                    (unit_purchase_price, &self.unit_purchase_price),
                ]
                .into_iter()
                .filter(|(index, _)| index.is_none())
                .map(|(_, label)| label.clone())
                .collect();
                Err(FormatError::MissingColumns(missing))
            }
        }
    }
}
