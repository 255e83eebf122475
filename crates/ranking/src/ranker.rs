//! Category ordering.

use crate::allocator::ScoredCategory;

/// Order categories by descending score; equal scores keep discovery order.
pub fn rank(mut scored: Vec<ScoredCategory>) -> Vec<ScoredCategory> {
    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.discovery.cmp(&b.discovery))
    });
    scored
}
