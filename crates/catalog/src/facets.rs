//! Facet index: the filter menu offered for a result list.
//!
//! Built from the *unfiltered* list so that selecting a value never hides the
//! alternatives next to it.

use serde::Serialize;

use crate::product::Product;

/// One filterable parameter and its distinct values, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facet {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FacetIndex {
    facets: Vec<Facet>,
}

impl FacetIndex {
    pub fn build(products: &[Product]) -> Self {
        let mut facets: Vec<Facet> = Vec::new();
        for param in products.iter().flat_map(|p| p.parameters()) {
            match facets.iter_mut().find(|f| f.name == param.name) {
                Some(facet) => {
                    if !facet.values.contains(&param.value) {
                        facet.values.push(param.value.clone());
                    }
                }
                None => facets.push(Facet {
                    name: param.name.clone(),
                    values: vec![param.value.clone()],
                }),
            }
        }
        Self { facets }
    }

    /// No parameters at all; the filter panel should be hidden.
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn get(&self, name: &str) -> Option<&Facet> {
        self.facets.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str, value: &str) -> bool {
        self.get(name).is_some_and(|f| f.values.iter().any(|v| v == value))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Facet> {
        self.facets.iter()
    }
}
