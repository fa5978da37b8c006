//! Order export parsing.
//!
//! Turns the raw CSV text of an order report into [`PurchaseRecord`]s.
//! Parsing is all-or-nothing: one bad row fails the whole export, because a
//! silently truncated batch would under-report price drops.

use csv::{ReaderBuilder, StringRecord};
use log::debug;

use pricedrop_market_data::parse_amount;

use super::columns::{ColumnIndices, ColumnMapping};
use super::model::PurchaseRecord;
use crate::errors::{Error, FormatError};
use crate::Result;

/// Parses an order export into records, in input order.
///
/// # Errors
/// * [`FormatError`] when the input is empty, has no header row, or lacks a
///   required column.
/// * [`Error::Row`] for the first data row with the wrong number of fields,
///   a blank title or item id, or a price that is not a positive amount.
pub fn parse_orders(content: &str, columns: &ColumnMapping) -> Result<Vec<PurchaseRecord>> {
    let content = normalize_content(content);
    if content.trim().is_empty() {
        return Err(FormatError::Empty.into());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false) // We handle headers manually to match by name
        .flexible(true) // Field counts are checked per row below
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let headers: Vec<String> = match records.next() {
        Some(Ok(header)) => header.iter().map(|h| h.trim().to_string()).collect(),
        Some(Err(e)) => return Err(FormatError::Malformed(e.to_string()).into()),
        None => return Err(FormatError::MissingHeader.into()),
    };
    if headers.iter().all(|h| h.is_empty()) {
        return Err(FormatError::MissingHeader.into());
    }

    let indices = columns.resolve(&headers)?;

    let mut orders = Vec::new();
    for (idx, result) in records.enumerate() {
        let row = idx + 1;
        let record = result.map_err(|e| Error::row(row, format!("could not read row: {}", e)))?;

        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        if record.len() != headers.len() {
            return Err(Error::row(
                row,
                format!(
                    "expected {} fields, found {}",
                    headers.len(),
                    record.len()
                ),
            ));
        }

        orders.push(parse_row(row, &record, &indices)?);
    }

    debug!("Parsed {} order rows", orders.len());
    Ok(orders)
}

fn parse_row(row: usize, record: &StringRecord, indices: &ColumnIndices) -> Result<PurchaseRecord> {
    let field = |index: usize| record.get(index).unwrap_or_default();

    let name = field(indices.title).trim();
    if name.is_empty() {
        return Err(Error::row(row, "title is empty"));
    }

    let item_id = field(indices.item_id).trim();
    if item_id.is_empty() {
        return Err(Error::row(row, "item id is empty"));
    }

    let raw_price = field(indices.unit_purchase_price);
    let original_price = parse_amount(raw_price)
        .ok_or_else(|| Error::row(row, format!("unparsable price '{}'", raw_price)))?;
    if original_price.is_sign_negative() || original_price.is_zero() {
        return Err(Error::row(
            row,
            format!("price must be positive, got '{}'", raw_price),
        ));
    }

    Ok(PurchaseRecord::new(
        name,
        field(indices.order_date),
        item_id,
        original_price,
    ))
}

/// Strips a UTF-8 BOM and turns literal `\n` escapes into newlines.
///
/// Request bodies posted by some clients arrive with escaped line breaks.
fn normalize_content(content: &str) -> String {
    content
        .strip_prefix('\u{feff}')
        .unwrap_or(content)
        .replace("\\n", "\n")
}
