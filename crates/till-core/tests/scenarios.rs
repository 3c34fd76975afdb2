//! End-to-end scenarios over the domain layer, matching the behavior the
//! pages compose: filter + join + draft + session + fetch-replace.

use till_core::draft::{LineField, SaleDraft};
use till_core::fetch::FetchGuard;
use till_core::join::JoinIndex;
use till_core::model::{Employee, InventoryRow, Product, ProductRow, ProductStatus, Role};
use till_core::session::{Session, SessionState, SessionStore};
use till_core::view::CollectionView;

fn product(id: i64, name: &str, price: f64) -> Product {
    Product {
        id,
        sku: format!("SKU-{id}"),
        name: name.to_string(),
        price,
        kind: None,
        status: ProductStatus::Active,
    }
}

fn employee(id: i64, username: &str, full_name: &str) -> Employee {
    Employee {
        id,
        username: username.to_string(),
        full_name: Some(full_name.to_string()),
        email: None,
        role: Role::Seller,
    }
}

// Two products, two draft lines, payload priced from the loaded collection.
#[test]
fn draft_submit_enriches_lines_with_current_prices() {
    let products = vec![product(1, "Coffee", 10.00), product(2, "Tea", 5.50)];

    let mut draft = SaleDraft::new();
    draft.add_line();
    draft.update_line(0, LineField::ProductId, "1").unwrap();
    draft.update_line(0, LineField::Quantity, "2").unwrap();
    draft.add_line();
    draft.update_line(1, LineField::ProductId, "2").unwrap();

    let payload = draft.begin_submit(4, &products).unwrap();
    let items: Vec<(i64, i64, f64)> = payload
        .items
        .iter()
        .map(|i| (i.product_id, i.qty, i.price))
        .collect();
    assert_eq!(items, vec![(1, 2, 10.00), (2, 1, 5.50)]);
}

// Three employees, filter "an" matches exactly one.
#[test]
fn employee_filter_narrows_three_rows_to_one() {
    let mut view = CollectionView::new();
    view.set_raw(vec![
        employee(1, "pedro", "Pedro Silva"),
        employee(2, "ana", "Xiomara Reyes"),
        employee(3, "luz", "Luz Moreno"),
    ]);
    view.set_filter("an");

    let derived = view.derive();
    assert_eq!(derived.len(), 1);
    assert_eq!(derived[0].username, "ana");
}

// Fetch A then B race, B's response lands first; A's stale result must not
// clobber B's.
#[test]
fn out_of_order_fetch_responses_keep_the_newest() {
    let mut view: CollectionView<Product> = CollectionView::new();
    let mut guard = FetchGuard::new();

    let ticket_a = guard.begin();
    let ticket_b = guard.begin();

    let response_b = vec![product(2, "Tea", 5.50)];
    if guard.try_apply(ticket_b) {
        view.set_raw(response_b.clone());
    }

    let response_a = vec![product(1, "Coffee", 10.00)];
    if guard.try_apply(ticket_a) {
        view.set_raw(response_a);
    }

    assert_eq!(view.raw(), response_b.as_slice());
}

// Products page flow: join inventory onto products, sort by the derived
// stock column.
#[test]
fn product_rows_sort_by_joined_stock() {
    let products = vec![
        product(1, "Coffee", 10.00),
        product(2, "Tea", 5.50),
        product(3, "Mate", 7.00),
    ];
    let inventory = vec![
        InventoryRow { product_id: 1, quantity: 3 },
        InventoryRow { product_id: 3, quantity: 20 },
    ];

    let stock = JoinIndex::build(&inventory, |r| r.product_id, |r| r.quantity);
    let rows: Vec<ProductRow> = products
        .into_iter()
        .map(|p| {
            let quantity = stock.lookup(&p.id, 0);
            ProductRow { product: p, stock: quantity }
        })
        .collect();

    let mut view = CollectionView::new();
    view.set_raw(rows);
    view.toggle_sort("stock");

    let order: Vec<i64> = view.derive().iter().map(|r| r.product.id).collect();
    // Product 2 has no inventory row and defaults to zero stock.
    assert_eq!(order, vec![2, 1, 3]);
}

// Logout clears both identity and token; the next guard check is absent.
#[test]
fn logout_then_check_reads_absent() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = SessionStore::at(dir.path());
    store
        .save(&Session {
            id: 1,
            username: "ana".to_string(),
            role: Role::Admin,
            token: "tok".to_string(),
        })
        .unwrap();
    assert!(store.check().unwrap().is_present());

    store.clear().unwrap();
    assert_eq!(store.check().unwrap(), SessionState::Absent);
}
