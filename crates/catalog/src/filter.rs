//! Facet filtering.
//!
//! A product passes when, for every active parameter, its first parameter with
//! that name carries one of the accepted values. Missing the parameter entirely
//! excludes the product. An empty filter set lets everything through.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Active facet selections: parameter name → accepted values.
///
/// Parameters never map to an empty value set; deselecting the last value
/// removes the parameter, so a toggle on then off yields an equal set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveFilterSet {
    selections: BTreeMap<String, BTreeSet<String>>,
}

impl ActiveFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Accept `value` for parameter `name`. Returns `false` if it was already accepted.
    pub fn select(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        self.selections
            .entry(name.into())
            .or_default()
            .insert(value.into())
    }

    /// Stop accepting `value` for `name`. Returns `false` if it was not accepted.
    pub fn deselect(&mut self, name: &str, value: &str) -> bool {
        let Some(values) = self.selections.get_mut(name) else {
            return false;
        };
        let removed = values.remove(value);
        if values.is_empty() {
            self.selections.remove(name);
        }
        removed
    }

    /// Checkbox semantics: `checked` selects, unchecked deselects.
    ///
    /// Returns whether the set changed.
    pub fn toggle(&mut self, name: &str, value: &str, checked: bool) -> bool {
        if checked {
            self.select(name, value)
        } else {
            self.deselect(name, value)
        }
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    pub fn is_selected(&self, name: &str, value: &str) -> bool {
        self.selections
            .get(name)
            .is_some_and(|values| values.contains(value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.selections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether `product` satisfies every active constraint.
    pub fn matches(&self, product: &Product) -> bool {
        self.selections.iter().all(|(name, accepted)| {
            product
                .parameter(name)
                .is_some_and(|value| accepted.contains(value))
        })
    }

    /// Keep only matching products, preserving order.
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        if self.is_empty() {
            return products;
        }
        let before = products.len();
        let kept: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        tracing::debug!(
            before,
            after = kept.len(),
            active_parameters = self.selections.len(),
            "applied facet filters"
        );
        kept
    }
}

impl<N, V> FromIterator<(N, V)> for ActiveFilterSet
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.select(name, value);
        }
        set
    }
}
