//! Category grouping.
//!
//! Turns the filtered product list into category buckets. Buckets keep the order
//! in which their category was first declared; that order is the tiebreaker for
//! everything downstream.

use std::collections::{HashMap, HashSet};

use shopview_catalog::{Product, dedup_ids};
use shopview_core::{Entity, ProductId};

use crate::config::GroupingPolicy;

/// One category bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    url: Option<String>,
    discovery: usize,
    members: Vec<ProductId>,
}

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL declared by the first product that named this category.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Position at which the category was first declared.
    pub fn discovery(&self) -> usize {
        self.discovery
    }

    /// Member ids in arrival order, without repeats.
    pub fn members(&self) -> &[ProductId] {
        &self.members
    }
}

/// Categories in first-discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap {
    categories: Vec<Category>,
}

impl CategoryMap {
    /// No product declared any category: the "no categories" terminal state.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }
}

/// Group `products` into categories according to `policy`.
pub fn categorize(products: &[Product], policy: GroupingPolicy) -> CategoryMap {
    let fan_out = fan_out(products);
    match policy {
        GroupingPolicy::FanOut => fan_out,
        GroupingPolicy::LeastPopulous => least_populous(products, fan_out),
    }
}

fn fan_out(products: &[Product]) -> CategoryMap {
    let mut categories: Vec<Category> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for product in products {
        for membership in product.categories() {
            if membership.name.trim().is_empty() {
                tracing::debug!(product_id = %product.id(), "ignoring blank category name");
                continue;
            }
            let slot = *by_name.entry(membership.name.clone()).or_insert_with(|| {
                categories.push(Category {
                    name: membership.name.clone(),
                    url: membership.url.clone(),
                    discovery: categories.len(),
                    members: Vec::new(),
                });
                categories.len() - 1
            });
            categories[slot].members.push(product.id().clone());
        }
    }

    // A product may declare the same category more than once.
    for category in &mut categories {
        category.members = dedup_ids(std::mem::take(&mut category.members));
    }

    CategoryMap { categories }
}

/// Reassign each product to its least populated membership only.
fn least_populous(products: &[Product], fan_out: CategoryMap) -> CategoryMap {
    let slots: HashMap<&str, usize> = fan_out
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.name.as_str(), i))
        .collect();

    let mut assigned: Vec<Vec<ProductId>> = vec![Vec::new(); fan_out.categories.len()];
    let mut placed: HashSet<&ProductId> = HashSet::new();

    for product in products {
        if !placed.insert(product.id()) {
            continue;
        }
        let primary = product
            .categories()
            .iter()
            .filter_map(|m| slots.get(m.name.as_str()).copied())
            .min_by_key(|&slot| (fan_out.categories[slot].members.len(), slot));
        if let Some(slot) = primary {
            assigned[slot].push(product.id().clone());
        }
    }

    let categories = fan_out
        .categories
        .iter()
        .zip(assigned)
        .filter(|(_, members)| !members.is_empty())
        .map(|(category, members)| Category {
            name: category.name.clone(),
            url: category.url.clone(),
            discovery: category.discovery,
            members,
        })
        .collect();

    CategoryMap { categories }
}
