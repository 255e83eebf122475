//! Decoding of the upstream search payload.
//!
//! The backend answers a query with a JSON array of product records. A corrupted
//! payload must never take the session down, so the default entry points degrade
//! to "no results" instead of failing.

use serde_json::Value as JsonValue;

use shopview_core::{DomainError, DomainResult};

use crate::product::Product;

/// Decode a payload, failing on the first problem.
///
/// Returns `MalformedPayload` when the payload is not an array or when any record
/// cannot be decoded (including records without a usable `id`).
pub fn decode_products_strict(payload: &JsonValue) -> DomainResult<Vec<Product>> {
    let records = payload
        .as_array()
        .ok_or_else(|| DomainError::malformed(format!("expected array, got {}", kind_of(payload))))?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value::<Product>(record.clone())
                .map_err(|e| DomainError::malformed(format!("product #{index}: {e}")))
        })
        .collect()
}

/// Decode a payload, dropping whatever cannot be decoded.
///
/// - non-array payload → empty list
/// - records without a usable `id` → skipped
/// - loosely typed or `null` fields → their default (see `wire`)
pub fn decode_products(payload: &JsonValue) -> Vec<Product> {
    let Some(records) = payload.as_array() else {
        tracing::warn!(
            payload_kind = kind_of(payload),
            "product payload is not an array; treating as no results"
        );
        return Vec::new();
    };

    let mut products = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match serde_json::from_value::<Product>(record.clone()) {
            Ok(product) => products.push(product),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping undecodable product record");
            }
        }
    }

    if products.len() < records.len() {
        tracing::warn!(
            received = records.len(),
            kept = products.len(),
            "product payload partially decoded"
        );
    }
    products
}

/// Decode a raw response body. Invalid JSON degrades to an empty list.
pub fn decode_products_str(body: &str) -> Vec<Product> {
    match serde_json::from_str::<JsonValue>(body) {
        Ok(payload) => decode_products(&payload),
        Err(e) => {
            tracing::warn!(error = %e, "product payload is not valid JSON; treating as no results");
            Vec::new()
        }
    }
}

fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shopview_core::Entity;

    #[test]
    fn non_array_payload_degrades_to_empty() {
        assert!(decode_products(&json!({ "error": "boom" })).is_empty());
        assert!(decode_products(&JsonValue::Null).is_empty());
        assert!(decode_products_str("not json at all").is_empty());
    }

    #[test]
    fn records_without_id_are_skipped() {
        let payload = json!([
            { "id": "a", "name": "A" },
            { "name": "no id" },
            { "id": "", "name": "blank id" },
            { "id": 2, "name": "B" }
        ]);

        let products = decode_products(&payload);
        let ids: Vec<&str> = products.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "2"]);
    }

    #[test]
    fn loosely_typed_fields_do_not_drop_the_record() {
        let payload = json!([
            { "id": "a", "categories": null },
            { "id": "b", "params": null },
            { "id": "c", "name": null },
            { "id": "d", "availability": 1 },
            { "id": "e", "newPrice": "30" },
            { "id": "f", "categories": [{ "name": "Bags", "url": null }, { "url": "/nameless" }] },
            { "id": "g", "parameters": [{ "name": "color", "value": null }, { "name": "size", "value": 42 }] },
            { "id": "h", "createdAt": "last week", "image": null, "label": 3 }
        ]);

        let products = decode_products(&payload);
        assert_eq!(products.len(), 8);
        assert!(products[0].categories().is_empty());
        assert!(products[1].parameters().is_empty());
        assert_eq!(products[2].name(), "");
        assert!(products[3].is_available());
        assert_eq!(products[4].price().current, Some(30.0));
        assert_eq!(products[5].categories().len(), 1);
        assert_eq!(products[5].categories()[0].url, None);
        assert_eq!(products[6].parameter("color"), None);
        assert_eq!(products[6].parameter("size"), Some("42"));
        assert_eq!(products[7].created_at(), None);
        assert_eq!(products[7].label(), Some("3"));

        assert_eq!(decode_products_strict(&payload).unwrap(), products);
    }

    #[test]
    fn strict_decoding_reports_the_offending_record() {
        let payload = json!([{ "id": "a" }, { "name": "no id" }]);
        match decode_products_strict(&payload) {
            Err(DomainError::MalformedPayload(msg)) => assert!(msg.starts_with("product #1")),
            other => panic!("expected MalformedPayload, got {other:?}"),
        }

        match decode_products_strict(&json!("oops")) {
            Err(DomainError::MalformedPayload(msg)) => assert!(msg.contains("string")),
            other => panic!("expected MalformedPayload, got {other:?}"),
        }
    }

    #[test]
    fn empty_array_is_a_valid_empty_result() {
        assert_eq!(decode_products_strict(&json!([])).unwrap(), Vec::new());
        assert!(decode_products_str("[]").is_empty());
    }
}
