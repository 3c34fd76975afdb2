use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{normalize, ParseEnumError};
use crate::view::{FieldValue, Tabular};

/// Product lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Inactive,
}

impl ProductStatus {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl Default for ProductStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(ParseEnumError {
                expected: "status",
                got: s.to_string(),
            }),
        }
    }
}

/// A product row from `GET /products`.
///
/// `kind` is `"type"` on the wire; prices come back as JSON numbers and the
/// server owns all total computation, so `f64` matches the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub price: f64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub status: ProductStatus,
}

/// Body for `POST /products` / `PUT /products/{id}`.
///
/// `initial_stock` is honored on create only; it is skipped on updates.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: ProductStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_stock: Option<i64>,
}

/// An inventory row from `GET /inventory`, keyed by product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRow {
    pub product_id: i64,
    pub quantity: i64,
}

/// Body for `POST /products/{id}/stock`.
///
/// `reason` and `user_id` are pass-through; the server validates them.
#[derive(Debug, Clone, Serialize)]
pub struct StockAdjustment {
    pub quantity_change: i64,
    pub reason: String,
    pub user_id: i64,
}

/// A product decorated with its joined stock level, ready for the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRow {
    #[serde(flatten)]
    pub product: Product,
    pub stock: i64,
}

impl Tabular for ProductRow {
    const FILTER_KEYS: &'static [&'static str] = &["name", "sku"];

    #[allow(clippy::cast_precision_loss)]
    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::Number(self.product.id as f64),
            "sku" => FieldValue::Text(self.product.sku.clone()),
            "name" => FieldValue::Text(self.product.name.clone()),
            "price" => FieldValue::Number(self.product.price),
            "stock" => FieldValue::Number(self.stock as f64),
            "type" => self
                .product
                .kind
                .clone()
                .map_or(FieldValue::Empty, FieldValue::Text),
            "status" => FieldValue::Text(self.product.status.to_string()),
            _ => FieldValue::Empty,
        }
    }
}

/// Row from `GET /reports/stock/low`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockRow {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub quantity: i64,
}

/// Row from `GET /reports/inventory/movements`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementRow {
    pub id: i64,
    pub product_name: String,
    pub quantity_change: i64,
    #[serde(default)]
    pub reason: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::{InventoryRow, NewProduct, Product, ProductRow, ProductStatus};
    use crate::view::{FieldValue, Tabular};

    #[test]
    fn product_kind_maps_to_wire_type() {
        let json = r#"{"id":1,"sku":"A-1","name":"Coffee","price":10.0,"type":"beverage"}"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.kind.as_deref(), Some("beverage"));
        assert_eq!(p.status, ProductStatus::Active);

        let back = serde_json::to_string(&p).unwrap();
        assert!(back.contains("\"type\":\"beverage\""));
        assert!(!back.contains("\"kind\""));
    }

    #[test]
    fn new_product_skips_absent_initial_stock() {
        let body = NewProduct {
            sku: "A-1".into(),
            name: "Coffee".into(),
            price: 10.0,
            kind: "beverage".into(),
            status: ProductStatus::Active,
            initial_stock: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("initial_stock"));
    }

    #[test]
    fn product_row_exposes_joined_stock() {
        let row = ProductRow {
            product: Product {
                id: 7,
                sku: "B-2".into(),
                name: "Tea".into(),
                price: 5.5,
                kind: None,
                status: ProductStatus::Inactive,
            },
            stock: 12,
        };
        assert_eq!(row.field("stock"), FieldValue::Number(12.0));
        assert_eq!(row.field("type"), FieldValue::Empty);
        assert_eq!(row.field("status"), FieldValue::Text("inactive".into()));
    }

    #[test]
    fn inventory_row_parses() {
        let row: InventoryRow =
            serde_json::from_str(r#"{"product_id":3,"quantity":40}"#).unwrap();
        assert_eq!(row, InventoryRow { product_id: 3, quantity: 40 });
    }
}
