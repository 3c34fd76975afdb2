//! Sale endpoints: list, create, revert.

use till_core::model::{Sale, SalePayload};

use crate::{Ack, ApiClient, Result};

impl ApiClient {
    pub fn sales(&self) -> Result<Vec<Sale>> {
        self.get_json("/sales")
    }

    pub fn create_sale(&self, payload: &SalePayload) -> Result<Sale> {
        self.post_json("/sales", payload)
    }

    /// Reversal references the confirmed sale by id alone; the body is the
    /// bare id. Irreversible from the client — callers confirm with the
    /// user first.
    pub fn revert_sale(&self, sale_id: i64) -> Result<Ack> {
        self.post_json("/sales/revert", &sale_id)
    }
}
