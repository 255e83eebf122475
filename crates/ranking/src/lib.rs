//! Category grouping, exclusive preview allocation and ranking.
//!
//! Given the products of one search and the active facet filters, this crate
//! produces an [`Overview`]: a synthetic "All results" entry followed by the
//! matched categories in score order, each with an exclusive capped preview
//! (aggregate view) and its full member list (detail view).
//!
//! Every run is a full recomputation. Nothing here caches across runs.

pub mod allocator;
pub mod categorizer;
pub mod config;
pub mod disclosure;
pub mod index;
pub mod overview;
pub mod pipeline;
pub mod ranker;
pub mod scoring;

pub use allocator::{ClaimSet, ScoredCategory, allocate};
pub use categorizer::{Category, CategoryMap, categorize};
pub use config::{AllocationOrder, GroupingPolicy, RankingConfig};
pub use disclosure::{Disclosure, RenderedBlock, Transition, ViewMode};
pub use index::ProductIndex;
pub use overview::{CategoryGroup, GroupKind, Overview, OverviewStatus};
pub use pipeline::Pipeline;
pub use ranker::rank;
