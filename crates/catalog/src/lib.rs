//! Product catalog module.
//!
//! This crate contains the product record as delivered by the search backend and
//! the list-level operations that run before grouping: payload decoding,
//! deduplication, facet filtering and facet derivation. Everything here is
//! deterministic (no IO, no rendering).

pub mod dedup;
pub mod facets;
pub mod filter;
pub mod payload;
pub mod product;
mod wire;

pub use dedup::{dedup_by_id, dedup_ids};
pub use facets::{Facet, FacetIndex};
pub use filter::ActiveFilterSet;
pub use payload::{decode_products, decode_products_str, decode_products_strict};
pub use product::{CategoryRef, Parameter, Price, Product};
