//! Id → product lookup for one pipeline run.

use std::collections::HashMap;

use shopview_catalog::Product;
use shopview_core::{Entity, ProductId};

/// The deduplicated, filtered products of a run, in arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductIndex {
    products: Vec<Product>,
    positions: HashMap<ProductId, usize>,
}

impl ProductIndex {
    /// Index `products`. Ids are expected to be unique already; a repeated id
    /// keeps its first position.
    pub fn new(products: Vec<Product>) -> Self {
        let mut positions = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            positions.entry(product.id().clone()).or_insert(position);
        }
        Self { products, positions }
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.positions.get(id).map(|&i| &self.products[i])
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn ids(&self) -> impl Iterator<Item = &ProductId> {
        self.products.iter().map(|p| p.id())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
