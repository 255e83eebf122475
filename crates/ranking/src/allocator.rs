//! Exclusive preview allocation.
//!
//! Each category gets a preview of at most `preview_cap` products taken from
//! its availability-first member list. A product claimed by one category's
//! preview is skipped by every category allocated after it, so previews are
//! pairwise disjoint. The claims travel through a fold as a [`ClaimSet`]
//! value; allocation order is fixed up front by [`AllocationOrder`].

use std::collections::HashSet;

use shopview_core::ProductId;

use crate::categorizer::CategoryMap;
use crate::config::{AllocationOrder, RankingConfig};
use crate::index::ProductIndex;
use crate::scoring::{availability_first, preview_score_of};

/// Product ids already placed in some category's preview during this pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSet {
    claimed: HashSet<ProductId>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.claimed.contains(id)
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }

    /// Take the first `cap` unclaimed candidates and claim them.
    pub fn take(mut self, candidates: &[ProductId], cap: usize) -> (Self, Vec<ProductId>) {
        let preview: Vec<ProductId> = candidates
            .iter()
            .filter(|id| !self.claimed.contains(*id))
            .take(cap)
            .cloned()
            .collect();
        self.claimed.extend(preview.iter().cloned());
        (self, preview)
    }
}

/// A category after allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCategory {
    pub name: String,
    pub url: Option<String>,
    pub discovery: usize,
    /// Every member, availability-first, regardless of claims.
    pub members: Vec<ProductId>,
    /// Exclusive preview used by the aggregate view.
    pub preview: Vec<ProductId>,
    /// Score of `preview`.
    pub score: f64,
    /// Score of the first `preview_cap` members before exclusion.
    pub provisional_score: f64,
}

/// Allocate previews for every category. Output is in discovery order.
pub fn allocate(
    categories: &CategoryMap,
    index: &ProductIndex,
    config: &RankingConfig,
) -> Vec<ScoredCategory> {
    let cap = config.preview_cap;

    let mut scored: Vec<ScoredCategory> = categories
        .iter()
        .map(|category| {
            let members = availability_first(category.members(), index);
            let head = &members[..members.len().min(cap)];
            let provisional_score = preview_score_of(head, index, config);
            ScoredCategory {
                name: category.name().to_string(),
                url: category.url().map(str::to_string),
                discovery: category.discovery(),
                members,
                preview: Vec::new(),
                score: 0.0,
                provisional_score,
            }
        })
        .collect();

    let order = allocation_order(&scored, config.allocation_order);

    let claims = order.iter().fold(ClaimSet::new(), |claims, &slot| {
        let category = &mut scored[slot];
        let (claims, preview) = claims.take(&category.members, cap);
        category.score = preview_score_of(&preview, index, config);
        tracing::debug!(
            category = %category.name,
            members = category.members.len(),
            preview = preview.len(),
            provisional_score = category.provisional_score,
            score = category.score,
            "allocated category preview"
        );
        category.preview = preview;
        claims
    });

    tracing::debug!(
        categories = scored.len(),
        claimed = claims.len(),
        "preview allocation finished"
    );
    scored
}

/// Slots of `scored` in the order they claim previews.
fn allocation_order(scored: &[ScoredCategory], order: AllocationOrder) -> Vec<usize> {
    let mut slots: Vec<usize> = (0..scored.len()).collect();
    if order == AllocationOrder::ProvisionalScore {
        slots.sort_by(|&a, &b| {
            scored[b]
                .provisional_score
                .total_cmp(&scored[a].provisional_score)
                .then(scored[a].discovery.cmp(&scored[b].discovery))
        });
    }
    slots
}
