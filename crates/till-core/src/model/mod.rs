//! Wire-shape records for the retail API.
//!
//! Field names match the server contract byte-for-byte; the view layer treats
//! everything beyond `id` and the sortable display fields as opaque.

pub mod employee;
pub mod product;
pub mod sale;

pub use employee::{Employee, NewEmployee, NewShift, Role, Shift};
pub use product::{
    InventoryRow, LowStockRow, MovementRow, NewProduct, Product, ProductRow, ProductStatus,
    StockAdjustment,
};
pub use sale::{DailySalesRow, PayloadItem, Sale, SaleItem, SalePayload, SellerSalesRow};

use std::fmt;

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

pub(crate) fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}
