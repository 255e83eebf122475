//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures (bad ids, malformed input,
/// unknown lookups, out-of-range tunables). Rendering and transport concerns
/// belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (e.g. empty or non-scalar).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The upstream product payload could not be decoded.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A requested category (or other named resource) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A tunable constant was out of range.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedPayload(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
