//! Sale drafting: freeform line items into one validated payload.
//!
//! A draft accumulates editable lines (product reference + quantity, both
//! kept as entered text), validates them locally against the currently
//! loaded product collection, and only then assembles the transactional
//! [`SalePayload`]. Prices are resolved at submission time from the current
//! product collection, not captured when a line was added, so mid-session
//! product edits never produce stale pricing.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::model::{PayloadItem, Product, SalePayload};

/// Draft lifecycle: `Empty → Editing → Submitting → {Confirmed | Rejected}`.
///
/// `Confirmed` collapses straight back to `Empty` (the draft resets);
/// `Rejected` preserves the entered lines so the user can correct and
/// resubmit instead of re-entering everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftState {
    Empty,
    Editing,
    Submitting,
    Rejected,
}

/// One editable line. Both fields hold raw user input until submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftLine {
    pub product_id: String,
    pub quantity: String,
}

impl Default for DraftLine {
    fn default() -> Self {
        Self {
            product_id: String::new(),
            quantity: "1".to_string(),
        }
    }
}

/// Which field of a line an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineField {
    ProductId,
    Quantity,
}

/// Local validation failure: the offending line positions, zero-based.
/// No request is issued while this is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid sale lines at positions {0:?}", .lines)]
pub struct ValidationError {
    pub lines: Vec<usize>,
}

/// Errors from draft operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("no such line index {0}")]
    NoSuchLine(usize),
    #[error("draft has no lines to submit")]
    NothingToSubmit,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// An in-progress sale under construction.
#[derive(Debug, Clone)]
pub struct SaleDraft {
    lines: Vec<DraftLine>,
    state: DraftState,
}

impl Default for SaleDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl SaleDraft {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            state: DraftState::Empty,
        }
    }

    #[must_use]
    pub const fn state(&self) -> DraftState {
        self.state
    }

    #[must_use]
    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    /// Append a blank line (`product_id = ""`, `quantity = "1"`). Editing a
    /// rejected draft moves it back to [`DraftState::Editing`].
    pub fn add_line(&mut self) {
        self.lines.push(DraftLine::default());
        self.state = DraftState::Editing;
    }

    /// Remove a line by position; emptying all lines returns the draft to
    /// [`DraftState::Empty`].
    pub fn remove_line(&mut self, index: usize) -> Result<(), DraftError> {
        if index >= self.lines.len() {
            return Err(DraftError::NoSuchLine(index));
        }
        self.lines.remove(index);
        self.state = if self.lines.is_empty() {
            DraftState::Empty
        } else {
            DraftState::Editing
        };
        Ok(())
    }

    /// Mutate one field of one line.
    pub fn update_line(
        &mut self,
        index: usize,
        field: LineField,
        value: impl Into<String>,
    ) -> Result<(), DraftError> {
        let line = self
            .lines
            .get_mut(index)
            .ok_or(DraftError::NoSuchLine(index))?;
        match field {
            LineField::ProductId => line.product_id = value.into(),
            LineField::Quantity => line.quantity = value.into(),
        }
        self.state = DraftState::Editing;
        Ok(())
    }

    /// Validate every line against the currently loaded product collection
    /// and assemble the payload, pricing each line from the product's
    /// current price.
    ///
    /// A line is offending when its product id is empty, does not parse, or
    /// does not resolve in `products`, or when its quantity is not an
    /// integer greater than zero. On any offending line the whole submission
    /// is rejected locally — no partial payload, no network call.
    pub fn begin_submit(
        &mut self,
        seller_id: i64,
        products: &[Product],
    ) -> Result<SalePayload, DraftError> {
        if self.lines.is_empty() {
            return Err(DraftError::NothingToSubmit);
        }

        let by_id: HashMap<i64, &Product> = products.iter().map(|p| (p.id, p)).collect();

        let mut items = Vec::with_capacity(self.lines.len());
        let mut offending = Vec::new();

        for (index, line) in self.lines.iter().enumerate() {
            let product = line
                .product_id
                .trim()
                .parse::<i64>()
                .ok()
                .and_then(|id| by_id.get(&id).copied());
            let qty = line
                .quantity
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|q| *q > 0);

            match (product, qty) {
                (Some(product), Some(qty)) => items.push(PayloadItem {
                    product_id: product.id,
                    qty,
                    price: product.price,
                }),
                _ => offending.push(index),
            }
        }

        if offending.is_empty() {
            debug!(lines = items.len(), seller_id, "sale draft validated");
            self.state = DraftState::Submitting;
            Ok(SalePayload { seller_id, items })
        } else {
            self.state = DraftState::Editing;
            Err(ValidationError { lines: offending }.into())
        }
    }

    /// Server accepted the payload: the draft resets to empty.
    pub fn confirm(&mut self) {
        self.lines.clear();
        self.state = DraftState::Empty;
    }

    /// Server refused the payload (insufficient stock and the like): keep
    /// the entered lines so the user can correct and resubmit.
    pub fn reject(&mut self) {
        self.state = DraftState::Rejected;
    }
}

#[cfg(test)]
mod tests {
    use super::{DraftError, DraftState, LineField, SaleDraft, ValidationError};
    use crate::model::{Product, ProductStatus};

    fn product(id: i64, price: f64) -> Product {
        Product {
            id,
            sku: format!("SKU-{id}"),
            name: format!("Product {id}"),
            price,
            kind: None,
            status: ProductStatus::Active,
        }
    }

    fn products() -> Vec<Product> {
        vec![product(1, 10.0), product(2, 5.5)]
    }

    fn line(draft: &mut SaleDraft, product_id: &str, qty: &str) {
        draft.add_line();
        let idx = draft.lines().len() - 1;
        draft.update_line(idx, LineField::ProductId, product_id).unwrap();
        draft.update_line(idx, LineField::Quantity, qty).unwrap();
    }

    #[test]
    fn new_draft_is_empty_and_add_line_starts_editing() {
        let mut draft = SaleDraft::new();
        assert_eq!(draft.state(), DraftState::Empty);
        draft.add_line();
        assert_eq!(draft.state(), DraftState::Editing);
        assert_eq!(draft.lines()[0].product_id, "");
        assert_eq!(draft.lines()[0].quantity, "1");
    }

    #[test]
    fn removing_last_line_returns_to_empty() {
        let mut draft = SaleDraft::new();
        draft.add_line();
        draft.add_line();
        draft.remove_line(0).unwrap();
        assert_eq!(draft.state(), DraftState::Editing);
        draft.remove_line(0).unwrap();
        assert_eq!(draft.state(), DraftState::Empty);
        assert_eq!(draft.remove_line(0), Err(DraftError::NoSuchLine(0)));
    }

    #[test]
    fn submit_prices_lines_from_current_products() {
        let mut draft = SaleDraft::new();
        line(&mut draft, "1", "2");
        line(&mut draft, "2", "1");

        let payload = draft.begin_submit(7, &products()).unwrap();
        assert_eq!(payload.seller_id, 7);
        assert_eq!(payload.items.len(), 2);
        assert_eq!(payload.items[0].product_id, 1);
        assert_eq!(payload.items[0].qty, 2);
        assert!((payload.items[0].price - 10.0).abs() < f64::EPSILON);
        assert_eq!(payload.items[1].product_id, 2);
        assert_eq!(payload.items[1].qty, 1);
        assert!((payload.items[1].price - 5.5).abs() < f64::EPSILON);
    }

    #[test]
    fn submit_uses_price_at_submission_time() {
        let mut draft = SaleDraft::new();
        line(&mut draft, "1", "1");

        // First resolve against the original price, then "edit" the product
        // mid-session; the next submit must see the new price.
        let before = draft.begin_submit(1, &products()).unwrap();
        assert!((before.items[0].price - 10.0).abs() < f64::EPSILON);

        let repriced = vec![product(1, 12.5), product(2, 5.5)];
        let after = draft.begin_submit(1, &repriced).unwrap();
        assert!((after.items[0].price - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn unresolvable_product_fails_validation_with_line_index() {
        let mut draft = SaleDraft::new();
        line(&mut draft, "1", "2");
        line(&mut draft, "99", "1");

        let err = draft.begin_submit(1, &products()).unwrap_err();
        assert_eq!(
            err,
            DraftError::Validation(ValidationError { lines: vec![1] })
        );
    }

    #[test]
    fn empty_and_garbled_ids_fail_validation() {
        let mut draft = SaleDraft::new();
        line(&mut draft, "", "1");
        line(&mut draft, "abc", "1");
        line(&mut draft, "2", "1");

        let err = draft.begin_submit(1, &products()).unwrap_err();
        assert_eq!(
            err,
            DraftError::Validation(ValidationError { lines: vec![0, 1] })
        );
    }

    #[test]
    fn non_positive_and_non_integer_quantities_fail_validation() {
        let mut draft = SaleDraft::new();
        line(&mut draft, "1", "0");
        line(&mut draft, "1", "-3");
        line(&mut draft, "1", "1.5");
        line(&mut draft, "2", "4");

        let err = draft.begin_submit(1, &products()).unwrap_err();
        assert_eq!(
            err,
            DraftError::Validation(ValidationError { lines: vec![0, 1, 2] })
        );
    }

    #[test]
    fn failed_validation_preserves_lines_for_correction() {
        let mut draft = SaleDraft::new();
        line(&mut draft, "99", "1");
        let _ = draft.begin_submit(1, &products()).unwrap_err();
        assert_eq!(draft.state(), DraftState::Editing);
        assert_eq!(draft.lines().len(), 1);

        draft.update_line(0, LineField::ProductId, "2").unwrap();
        assert!(draft.begin_submit(1, &products()).is_ok());
    }

    #[test]
    fn empty_draft_cannot_submit() {
        let mut draft = SaleDraft::new();
        assert_eq!(
            draft.begin_submit(1, &products()).unwrap_err(),
            DraftError::NothingToSubmit
        );
    }

    #[test]
    fn successful_validation_enters_submitting() {
        let mut draft = SaleDraft::new();
        line(&mut draft, "1", "1");
        let _ = draft.begin_submit(1, &products()).unwrap();
        assert_eq!(draft.state(), DraftState::Submitting);
    }

    #[test]
    fn confirm_resets_to_empty() {
        let mut draft = SaleDraft::new();
        line(&mut draft, "1", "1");
        let _ = draft.begin_submit(1, &products()).unwrap();
        draft.confirm();
        assert_eq!(draft.state(), DraftState::Empty);
        assert!(draft.lines().is_empty());
    }

    #[test]
    fn reject_preserves_lines_and_allows_resubmit() {
        let mut draft = SaleDraft::new();
        line(&mut draft, "1", "3");
        let _ = draft.begin_submit(1, &products()).unwrap();
        draft.reject();
        assert_eq!(draft.state(), DraftState::Rejected);
        assert_eq!(draft.lines().len(), 1);

        draft.update_line(0, LineField::Quantity, "2").unwrap();
        assert_eq!(draft.state(), DraftState::Editing);
        let payload = draft.begin_submit(1, &products()).unwrap();
        assert_eq!(payload.items[0].qty, 2);
    }
}
