//! Price change classification.
//!
//! Enriched records are stable-sorted by descending price delta and then
//! split in one pass into reduced / unchanged / increased / unavailable.
//! Each bucket is the subsequence of the sorted list matching it.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::orders::PurchaseRecord;

/// The four buckets, each ordered by descending price delta.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedResult {
    #[serde(rename = "priceReduced")]
    pub reduced: Vec<PurchaseRecord>,
    #[serde(rename = "priceUnchanged")]
    pub unchanged: Vec<PurchaseRecord>,
    #[serde(rename = "priceIncreased")]
    pub increased: Vec<PurchaseRecord>,
    pub unavailable: Vec<PurchaseRecord>,
}

impl CategorizedResult {
    /// Total number of records across all buckets.
    pub fn len(&self) -> usize {
        self.reduced.len() + self.unchanged.len() + self.increased.len() + self.unavailable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten as reduced, unchanged, increased, unavailable.
    pub fn into_records(self) -> Vec<PurchaseRecord> {
        let mut records = self.reduced;
        records.extend(self.unchanged);
        records.extend(self.increased);
        records.extend(self.unavailable);
        records
    }
}

/// Sort and partition enriched records.
pub fn classify(mut records: Vec<PurchaseRecord>) -> CategorizedResult {
    // sort_by is stable: equal deltas keep input order
    records.sort_by(by_delta_descending);

    let mut result = CategorizedResult::default();
    for record in records {
        // An unresolved record has no meaningful delta, so it is checked
        // before the zero and negative cases.
        match record.price_delta() {
            Some(delta) if delta > Decimal::ZERO => result.reduced.push(record),
            None => result.unavailable.push(record),
            Some(delta) if delta.is_zero() => result.unchanged.push(record),
            Some(_) => result.increased.push(record),
        }
    }
    result
}

/// Descending by delta; records without a delta sort last.
fn by_delta_descending(a: &PurchaseRecord, b: &PurchaseRecord) -> Ordering {
    match (a.price_delta(), b.price_delta()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn resolved(item_id: &str, original: Decimal, current: Decimal) -> PurchaseRecord {
        let mut record = PurchaseRecord::new(item_id, "10/01/22", item_id, original);
        record.apply_current_price(current);
        record
    }

    fn unresolved(item_id: &str, original: Decimal) -> PurchaseRecord {
        PurchaseRecord::new(item_id, "10/01/22", item_id, original)
    }

    fn ids(records: &[PurchaseRecord]) -> Vec<&str> {
        records.iter().map(|r| r.item_id()).collect()
    }

    #[test]
    fn test_scenarios() {
        let records = vec![
            unresolved("gone", dec!(20.99)),
            resolved("same", dec!(20.99), dec!(20.99)),
            resolved("up", dec!(20.99), dec!(25.50)),
            resolved("down", dec!(20.99), dec!(15.00)),
        ];

        let result = classify(records);

        assert_eq!(ids(&result.reduced), vec!["down"]);
        assert_eq!(result.reduced[0].price_delta(), Some(dec!(5.99)));
        assert_eq!(ids(&result.unchanged), vec!["same"]);
        assert_eq!(result.unchanged[0].price_delta(), Some(dec!(0.00)));
        assert_eq!(ids(&result.increased), vec!["up"]);
        assert_eq!(result.increased[0].price_delta(), Some(dec!(-4.51)));
        assert_eq!(ids(&result.unavailable), vec!["gone"]);
        assert_eq!(result.unavailable[0].current_price(), None);
    }

    #[test]
    fn test_buckets_sorted_descending_with_stable_ties() {
        let records = vec![
            resolved("small", dec!(10.00), dec!(9.00)),
            resolved("big", dec!(10.00), dec!(2.00)),
            resolved("tie-first", dec!(10.00), dec!(7.00)),
            resolved("tie-second", dec!(5.00), dec!(2.00)),
            resolved("worse", dec!(1.00), dec!(9.00)),
            resolved("bad", dec!(1.00), dec!(2.00)),
        ];

        let result = classify(records);

        assert_eq!(
            ids(&result.reduced),
            vec!["big", "tie-first", "tie-second", "small"]
        );
        assert_eq!(ids(&result.increased), vec!["bad", "worse"]);
    }

    #[test]
    fn test_unavailable_keeps_input_order() {
        let records = vec![
            unresolved("b", dec!(1.00)),
            resolved("x", dec!(1.00), dec!(1.00)),
            unresolved("a", dec!(2.00)),
        ];
        let result = classify(records);
        assert_eq!(ids(&result.unavailable), vec!["b", "a"]);
    }

    #[test]
    fn test_empty_input() {
        let result = classify(Vec::new());
        assert!(result.is_empty());
    }

    #[test]
    fn test_serialized_bucket_names() {
        let result = classify(vec![resolved("down", dec!(2.00), dec!(1.00))]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["priceReduced"][0]["asin"], "down");
        assert_eq!(json["priceUnchanged"], serde_json::json!([]));
        assert_eq!(json["priceIncreased"], serde_json::json!([]));
        assert_eq!(json["unavailable"], serde_json::json!([]));
    }

    fn arb_record() -> impl Strategy<Value = PurchaseRecord> {
        (1i64..5_000, proptest::option::of(0i64..5_000), 0u8..6).prop_map(
            |(original_cents, current_cents, tag)| {
                let item_id = format!("ITEM{}", tag);
                let original = Decimal::new(original_cents, 2);
                match current_cents {
                    Some(cents) => resolved(&item_id, original, Decimal::new(cents, 2)),
                    None => unresolved(&item_id, original),
                }
            },
        )
    }

    fn non_increasing(records: &[PurchaseRecord]) -> bool {
        records
            .windows(2)
            .all(|pair| pair[0].price_delta() >= pair[1].price_delta())
    }

    proptest! {
        #[test]
        fn prop_partition_is_total(records in proptest::collection::vec(arb_record(), 0..40)) {
            let total = records.len();
            let result = classify(records);
            prop_assert_eq!(result.len(), total);
        }

        #[test]
        fn prop_buckets_match_predicates(records in proptest::collection::vec(arb_record(), 0..40)) {
            let result = classify(records);
            prop_assert!(result.reduced.iter().all(|r| r.price_delta().is_some_and(|d| d > Decimal::ZERO)));
            prop_assert!(result.unchanged.iter().all(|r| r.price_delta() == Some(Decimal::ZERO)));
            prop_assert!(result.increased.iter().all(|r| r.price_delta().is_some_and(|d| d < Decimal::ZERO)));
            prop_assert!(result.unavailable.iter().all(|r| !r.is_resolved()));
        }

        #[test]
        fn prop_each_bucket_non_increasing(records in proptest::collection::vec(arb_record(), 0..40)) {
            let result = classify(records);
            prop_assert!(non_increasing(&result.reduced));
            prop_assert!(non_increasing(&result.unchanged));
            prop_assert!(non_increasing(&result.increased));
        }

        #[test]
        fn prop_resolved_delta_is_rounded_difference(records in proptest::collection::vec(arb_record(), 0..40)) {
            for record in classify(records).into_records() {
                if let Some(current) = record.current_price() {
                    let expected = pricedrop_market_data::round_currency(record.original_price() - current);
                    prop_assert_eq!(record.price_delta(), Some(expected));
                }
            }
        }

        #[test]
        fn prop_classification_is_idempotent(records in proptest::collection::vec(arb_record(), 0..40)) {
            let first = classify(records);
            let second = classify(first.clone().into_records());
            prop_assert_eq!(first, second);
        }
    }
}
