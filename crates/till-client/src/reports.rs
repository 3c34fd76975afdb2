//! Read-only report aggregates.

use chrono::NaiveDate;
use till_core::model::{DailySalesRow, LowStockRow, MovementRow, SellerSalesRow};

use crate::{ApiClient, Result};

impl ApiClient {
    pub fn daily_sales(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DailySalesRow>> {
        self.get_json(&format!("/reports/sales/daily?from={from}&to={to}"))
    }

    pub fn sales_by_seller(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<SellerSalesRow>> {
        self.get_json(&format!("/reports/sales/sellers?from={from}&to={to}"))
    }

    pub fn low_stock(&self) -> Result<Vec<LowStockRow>> {
        self.get_json("/reports/stock/low")
    }

    pub fn inventory_movements(&self, limit: u32, offset: u32) -> Result<Vec<MovementRow>> {
        self.get_json(&format!(
            "/reports/inventory/movements?limit={limit}&offset={offset}"
        ))
    }
}
