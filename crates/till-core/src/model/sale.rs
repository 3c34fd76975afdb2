use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::view::{FieldValue, Tabular};

/// A confirmed sale from `GET /sales`. Read-only to the client; reversal
/// references it by `id` alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    pub seller_id: i64,
    #[serde(default)]
    pub seller_name: Option<String>,
    pub total: f64,
    pub sale_time: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<SaleItem>,
}

/// One confirmed line of a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    pub product_id: i64,
    pub qty: i64,
    pub price: f64,
}

impl Tabular for Sale {
    const FILTER_KEYS: &'static [&'static str] = &["id", "seller_name"];

    #[allow(clippy::cast_precision_loss)]
    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::Number(self.id as f64),
            "seller_id" => FieldValue::Number(self.seller_id as f64),
            "seller_name" => self
                .seller_name
                .clone()
                .map_or(FieldValue::Empty, FieldValue::Text),
            "total" => FieldValue::Number(self.total),
            "sale_time" => FieldValue::Text(self.sale_time.to_rfc3339()),
            _ => FieldValue::Empty,
        }
    }
}

/// The single transactional payload for `POST /sales`, assembled by the
/// draft after local validation and submission-time pricing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalePayload {
    pub seller_id: i64,
    pub items: Vec<PayloadItem>,
}

/// One priced line of a [`SalePayload`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadItem {
    pub product_id: i64,
    pub qty: i64,
    pub price: f64,
}

/// Row from `GET /reports/sales/daily`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySalesRow {
    pub day: NaiveDate,
    pub total: f64,
}

/// Row from `GET /reports/sales/sellers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerSalesRow {
    pub seller_id: i64,
    #[serde(default)]
    pub seller_name: Option<String>,
    pub total: f64,
}
