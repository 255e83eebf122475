//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a product, as assigned by the upstream search backend.
///
/// Upstream payloads are inconsistent about whether ids are JSON strings or
/// numbers; both decode to the same canonical string, so `17` and `"17"` are
/// one product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id, rejecting blank input.
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id("ProductId: empty"));
        }
        if trimmed.len() == raw.len() {
            Ok(Self(raw))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<ProductId> for String {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProductId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match RawProductId::deserialize(deserializer)? {
            RawProductId::Text(s) => s,
            RawProductId::Unsigned(n) => n.to_string(),
            RawProductId::Signed(n) => n.to_string(),
        };
        ProductId::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Identifier of a search session (one widget instance / one user tab).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

macro_rules! impl_uuid_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
            /// for determinism.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

impl_uuid_newtype!(SessionId, "SessionId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_ids_are_the_same_product() {
        let from_number: ProductId = serde_json::from_str("17").unwrap();
        let from_text: ProductId = serde_json::from_str("\"17\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(from_number.as_str(), "17");
    }

    #[test]
    fn blank_ids_are_rejected() {
        assert!(matches!(ProductId::new("   "), Err(DomainError::InvalidId(_))));
        assert!(serde_json::from_str::<ProductId>("\"\"").is_err());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let id = ProductId::new(" sku-1 ").unwrap();
        assert_eq!(id.as_str(), "sku-1");
        assert_eq!(id, "sku-1".parse::<ProductId>().unwrap());
    }

    #[test]
    fn non_scalar_ids_do_not_decode() {
        assert!(serde_json::from_str::<ProductId>("{\"id\": 1}").is_err());
        assert!(serde_json::from_str::<ProductId>("null").is_err());
    }

    #[test]
    fn session_id_round_trips_through_display() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!(matches!("nope".parse::<SessionId>(), Err(DomainError::InvalidId(_))));
    }
}
