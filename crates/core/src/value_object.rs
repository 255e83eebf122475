//! Value object trait: equality by value, not identity.
//!
//! Category memberships, filterable parameters and prices have **no identity**;
//! they are defined entirely by their attribute values.

/// Marker trait for value objects.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity (`Parameter { name: "color", value: "red" }`
///   equals any other parameter with the same name and value)
/// - **Entity**: has identity (two products with the same id are the same
///   product, even if one copy is stale)
///
/// Value objects should be immutable and cheap to clone.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
