//! Optional filter that keeps only orders still inside a return window.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use super::model::PurchaseRecord;
use crate::errors::Error;
use crate::Result;

/// Whether old orders are dropped before any price lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReturnWindow {
    /// Keep every order.
    #[default]
    Disabled,
    /// Keep orders placed at most this many days before the evaluation date.
    WithinDays(u32),
}

impl ReturnWindow {
    /// Apply the window relative to `today`.
    ///
    /// Order dates are only parsed when the window is enabled. An unreadable
    /// date then fails the batch with a row error (1-based record index).
    pub fn apply(
        &self,
        records: Vec<PurchaseRecord>,
        today: NaiveDate,
    ) -> Result<Vec<PurchaseRecord>> {
        let days = match self {
            Self::Disabled => return Ok(records),
            Self::WithinDays(days) => i64::from(*days),
        };

        let total = records.len();
        let mut kept = Vec::with_capacity(total);
        for (idx, record) in records.into_iter().enumerate() {
            let ordered = parse_order_date(record.ordered_at()).ok_or_else(|| {
                Error::row(
                    idx + 1,
                    format!("unreadable order date '{}'", record.ordered_at()),
                )
            })?;
            if (today - ordered).num_days() <= days {
                kept.push(record);
            }
        }

        debug!(
            "Return window of {} days kept {} of {} orders",
            days,
            kept.len(),
            total
        );
        Ok(kept)
    }
}

/// Parse `M/D/YY` or `M/D/YYYY`. Two-digit years are in the 2000s.
pub fn parse_order_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.trim().split('/');
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let year_text = parts.next()?.trim();
    if parts.next().is_some() {
        return None;
    }

    let year: i32 = year_text.parse().ok()?;
    let year = match year_text.len() {
        2 => 2000 + year,
        4 => year,
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}
