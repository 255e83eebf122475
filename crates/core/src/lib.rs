//! `shopview-core` — foundation building blocks shared by every shopview crate.
//!
//! This crate contains **pure domain** primitives (no IO, no rendering concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ProductId, SessionId};
pub use value_object::ValueObject;
