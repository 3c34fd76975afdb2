//! Derived views over raw collections.
//!
//! Every list page owns one [`CollectionView`] per raw collection it renders.
//! The view holds the last-fetched rows plus the current filter text and sort
//! selection, and [`CollectionView::derive`] recomputes the rendered sequence
//! from scratch on every input change. Collections are small; recomputation
//! beats incremental patching here and keeps the derivation a pure function
//! of `(raw, filter, sort)`.

use serde::Serialize;
use std::cmp::Ordering;

/// A single displayable field value.
///
/// Records expose their sortable/filterable fields through this type so the
/// view stays generic: numbers compare numerically, text compares
/// case-folded, and absent fields behave like empty strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Empty,
}

impl FieldValue {
    /// The display text the free-text filter matches against.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => {
                // Integral numbers render without a trailing ".0" so an id
                // filter like "12" matches the rendered cell.
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{n:.0}")
                } else {
                    n.to_string()
                }
            }
            Self::Empty => String::new(),
        }
    }

    fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            _ => {
                let a = self.display().to_lowercase();
                let b = other.display().to_lowercase();
                a.cmp(&b)
            }
        }
    }
}

/// A record that can appear in a [`CollectionView`] table.
pub trait Tabular {
    /// The fixed set of display fields the free-text filter matches.
    const FILTER_KEYS: &'static [&'static str];

    /// Look up one display field; unknown keys yield [`FieldValue::Empty`].
    fn field(&self, key: &str) -> FieldValue;
}

/// Column sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    const fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Raw collection + filter text + sort selection, derived on demand.
#[derive(Debug, Clone)]
pub struct CollectionView<R: Clone> {
    raw: Vec<R>,
    filter: String,
    sort: Option<(String, Direction)>,
}

impl<R: Clone> Default for CollectionView<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Clone> CollectionView<R> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw: Vec::new(),
            filter: String::new(),
            sort: None,
        }
    }

    /// Replace the raw collection wholesale (fetch-and-replace; partial
    /// results are never merged).
    pub fn set_raw(&mut self, raw: Vec<R>) {
        self.raw = raw;
    }

    #[must_use]
    pub fn raw(&self) -> &[R] {
        &self.raw
    }

    /// Set the free-text filter. Blank text is equivalent to no filter.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
    }

    /// Select a sort column: reselecting the active key flips the direction,
    /// a new key starts ascending.
    pub fn toggle_sort(&mut self, key: &str) {
        self.sort = match self.sort.take() {
            Some((current, dir)) if current == key => Some((current, dir.flip())),
            _ => Some((key.to_string(), Direction::Asc)),
        };
    }

    /// Set an explicit sort, bypassing toggle semantics (CLI flags).
    pub fn set_sort(&mut self, key: &str, direction: Direction) {
        self.sort = Some((key.to_string(), direction));
    }

    #[must_use]
    pub fn sort(&self) -> Option<(&str, Direction)> {
        self.sort.as_ref().map(|(k, d)| (k.as_str(), *d))
    }
}

impl<R: Tabular + Clone> CollectionView<R> {
    /// Compute the derived view: filter, then stable sort.
    ///
    /// Never mutates `raw`; identical inputs yield value-equal output. Ties
    /// keep their pre-sort relative order in both directions.
    #[must_use]
    pub fn derive(&self) -> Vec<R> {
        let needle = self.filter.trim().to_lowercase();

        let mut rows: Vec<R> = if needle.is_empty() {
            self.raw.clone()
        } else {
            self.raw
                .iter()
                .filter(|row| {
                    R::FILTER_KEYS
                        .iter()
                        .any(|key| row.field(key).display().to_lowercase().contains(&needle))
                })
                .cloned()
                .collect()
        };

        if let Some((key, direction)) = &self.sort {
            // sort_by is stable, and reversing the comparator (rather than
            // the slice) keeps equal keys in input order for descending too.
            rows.sort_by(|a, b| {
                let ord = a.field(key).sort_cmp(&b.field(key));
                match direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });
        }

        rows
    }
}
