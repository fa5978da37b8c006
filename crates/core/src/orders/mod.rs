//! Order export parsing and the purchase record model.

mod columns;
mod csv_parser;
mod model;
mod return_window;

pub use columns::{ColumnIndices, ColumnMapping};
pub use csv_parser::parse_orders;
pub use model::PurchaseRecord;
pub use return_window::{parse_order_date, ReturnWindow};
