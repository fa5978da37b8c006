//! Bounded concurrent enrichment of a parsed batch.

use futures::stream::{self, StreamExt};
use log::info;
use serde::Serialize;

use super::resolver::{PriceResolver, ResolutionOutcome};
use crate::orders::PurchaseRecord;

/// Outcome counts for one enrichment run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentReport {
    pub resolved: usize,
    pub unavailable: usize,
    pub blocked: usize,
    pub fetch_errors: usize,
}

impl EnrichmentReport {
    fn record(&mut self, outcome: &ResolutionOutcome) {
        match outcome {
            ResolutionOutcome::Resolved(_) => self.resolved += 1,
            ResolutionOutcome::Unavailable => self.unavailable += 1,
            ResolutionOutcome::Blocked => self.blocked += 1,
            ResolutionOutcome::FetchError(_) => self.fetch_errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.resolved + self.unresolved()
    }

    pub fn unresolved(&self) -> usize {
        self.unavailable + self.blocked + self.fetch_errors
    }
}

/// Records after enrichment, in their original order.
#[derive(Debug)]
pub struct Enriched {
    pub records: Vec<PurchaseRecord>,
    pub report: EnrichmentReport,
}

/// Resolve every record's live price with at most `max_concurrent_fetches`
/// lookups in flight.
///
/// Each lookup is tagged with its record's slot. Results are written back
/// after every lookup has finished, so no record is observed half written
/// and completion order does not matter. Never fails: unresolved records
/// simply keep no current price.
pub async fn enrich_records(
    mut records: Vec<PurchaseRecord>,
    resolver: &dyn PriceResolver,
    max_concurrent_fetches: usize,
) -> Enriched {
    let limit = max_concurrent_fetches.max(1);

    let outcomes: Vec<(usize, ResolutionOutcome)> = stream::iter(0..records.len())
        .map(|slot| {
            let record = &records[slot];
            async move { (slot, resolver.resolve(record).await) }
        })
        .buffer_unordered(limit)
        .collect()
        .await;
    debug_assert_eq!(outcomes.len(), records.len());

    let mut report = EnrichmentReport::default();
    for (slot, outcome) in outcomes {
        report.record(&outcome);
        if let ResolutionOutcome::Resolved(price) = outcome {
            records[slot].apply_current_price(price);
        }
    }

    info!(
        "Enriched {} records: {} resolved, {} unavailable, {} blocked, {} fetch errors",
        records.len(),
        report.resolved,
        report.unavailable,
        report.blocked,
        report.fetch_errors
    );

    Enriched { records, report }
}
