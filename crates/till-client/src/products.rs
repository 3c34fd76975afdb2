//! Product and inventory endpoints.

use till_core::model::{InventoryRow, NewProduct, Product, StockAdjustment};

use crate::{Ack, ApiClient, Result};

impl ApiClient {
    pub fn products(&self) -> Result<Vec<Product>> {
        self.get_json("/products")
    }

    pub fn create_product(&self, body: &NewProduct) -> Result<Product> {
        self.post_json("/products", body)
    }

    pub fn update_product(&self, id: i64, body: &NewProduct) -> Result<Product> {
        self.put_json(&format!("/products/{id}"), body)
    }

    pub fn inventory(&self) -> Result<Vec<InventoryRow>> {
        self.get_json("/inventory")
    }

    pub fn inventory_for(&self, product_id: i64) -> Result<InventoryRow> {
        self.get_json(&format!("/inventory/{product_id}"))
    }

    /// `reason` and `user_id` inside the body are validated server-side.
    pub fn adjust_stock(&self, id: i64, body: &StockAdjustment) -> Result<Ack> {
        self.post_json(&format!("/products/{id}/stock"), body)
    }
}
