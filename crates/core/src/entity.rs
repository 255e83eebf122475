//! Entity trait: identity that survives duplication in upstream payloads.

/// Entity marker + minimal interface.
///
/// Two records with the same id are the same entity, even when their other
/// fields differ. Deduplication keys on this.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
