//! Property suites for the derived-view invariants.

use proptest::prelude::*;
use till_core::view::{CollectionView, Direction, FieldValue, Tabular};

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: i64,
    name: String,
    price: f64,
}

impl Tabular for Row {
    const FILTER_KEYS: &'static [&'static str] = &["id", "name"];

    #[allow(clippy::cast_precision_loss)]
    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::Number(self.id as f64),
            "name" => FieldValue::Text(self.name.clone()),
            "price" => FieldValue::Number(self.price),
            _ => FieldValue::Empty,
        }
    }
}

// Sequential ids keep every row distinct, so input positions are
// unambiguous in the stability property; short names from a small alphabet
// force plenty of equal sort keys.
fn arb_rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(("[a-cA-C]{0,3}", 0.0f64..10.0), 0..40).prop_map(|fields| {
        fields
            .into_iter()
            .enumerate()
            .map(|(index, (name, price))| Row {
                id: i64::try_from(index).unwrap_or(i64::MAX),
                name,
                price,
            })
            .collect()
    })
}

fn matches(row: &Row, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    needle.is_empty()
        || Row::FILTER_KEYS
            .iter()
            .any(|key| row.field(key).display().to_lowercase().contains(&needle))
}

proptest! {
    // Property 1: the derived view contains exactly the rows whose matched
    // fields contain the filter text case-insensitively.
    #[test]
    fn filter_keeps_all_and_only_matching_rows(rows in arb_rows(), needle in "[a-zA-Z0-9]{0,4}") {
        let mut view = CollectionView::new();
        view.set_raw(rows.clone());
        view.set_filter(needle.clone());

        let derived = view.derive();
        let expected: Vec<Row> = rows.iter().filter(|r| matches(r, &needle)).cloned().collect();
        prop_assert_eq!(derived, expected);
    }

    // Property 2: sorting is stable in both directions — rows with equal
    // keys keep their relative input order.
    #[test]
    fn sort_is_stable_both_directions(rows in arb_rows(), descending in any::<bool>()) {
        let mut view = CollectionView::new();
        view.set_raw(rows.clone());
        let direction = if descending { Direction::Desc } else { Direction::Asc };
        view.set_sort("name", direction);

        let derived = view.derive();

        // Project each name group to its input order and check the derived
        // sequence lists each group's members in that same order.
        for group in derived.windows(2) {
            if group[0].name.to_lowercase() == group[1].name.to_lowercase() {
                let first = rows.iter().position(|r| r == &group[0]).expect("row came from input");
                let second = rows.iter().position(|r| r == &group[1]).expect("row came from input");
                prop_assert!(first <= second, "equal keys scrambled: {first} vs {second}");
            }
        }
    }

    // Property 3: toggling the same key twice returns to an ascending order
    // identical to unsorted-then-ascending.
    #[test]
    fn double_toggle_round_trips_to_ascending(rows in arb_rows()) {
        let mut reference = CollectionView::new();
        reference.set_raw(rows.clone());
        reference.toggle_sort("price");
        let ascending = reference.derive();

        let mut toggled = CollectionView::new();
        toggled.set_raw(rows);
        toggled.toggle_sort("price");
        toggled.toggle_sort("price");
        toggled.toggle_sort("price");
        prop_assert_eq!(toggled.derive(), ascending);
    }

    // Deriving twice with identical inputs yields value-equal output.
    #[test]
    fn derive_is_a_pure_function(rows in arb_rows(), needle in "[a-z]{0,3}", descending in any::<bool>()) {
        let mut view = CollectionView::new();
        view.set_raw(rows);
        view.set_filter(needle);
        let direction = if descending { Direction::Desc } else { Direction::Asc };
        view.set_sort("id", direction);

        prop_assert_eq!(view.derive(), view.derive());
    }
}

// Duplicate rows make position-based stability checks ambiguous, so the
// property above tolerates them; this deterministic case pins the exact
// guarantee down.
#[test]
fn stability_with_distinct_payloads_and_equal_keys() {
    let rows: Vec<Row> = (0..6)
        .map(|i| Row {
            id: i,
            name: "same".to_string(),
            price: 1.0,
        })
        .collect();

    let mut view = CollectionView::new();
    view.set_raw(rows.clone());
    view.set_sort("name", Direction::Asc);
    assert_eq!(view.derive(), rows);

    view.set_sort("name", Direction::Desc);
    assert_eq!(view.derive(), rows);
}
