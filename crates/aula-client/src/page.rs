//! Response-shape normalization.
//!
//! The backend answers collection requests either with the paginated envelope
//! `{data, total, per_page, current_page, last_page}` or, for small catalogs,
//! with a bare array; single records may arrive bare or wrapped in
//! `{data: record}`. Normalizing all of it here means no call site ever
//! inspects the shape again.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;

/// Normalized page of records.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
}

fn ceil_div(total: i64, per_page: i64) -> i64 {
    if total <= 0 {
        1
    } else {
        (total + per_page - 1) / per_page
    }
}

fn decode_items<T: DeserializeOwned>(values: Vec<Value>) -> Result<Vec<T>, ClientError> {
    values
        .into_iter()
        .map(|v| serde_json::from_value(v).map_err(|e| ClientError::Decode(e.to_string())))
        .collect()
}

/// Normalize a list response body into a [`Page`].
///
/// `total_pages` is always recomputed as `ceil(total / per_page)` rather than
/// trusted from the envelope, so the pagination invariants hold even against
/// a sloppy backend.
pub fn normalize_page<T: DeserializeOwned>(body: &[u8]) -> Result<Page<T>, ClientError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ClientError::Decode(e.to_string()))?;

    match value {
        // Bare array: a single unpaginated page
        Value::Array(values) => {
            let total = values.len() as i64;
            let items = decode_items(values)?;
            Ok(Page {
                items,
                current_page: 1,
                total_pages: 1,
                total_items: total,
                items_per_page: total.max(1),
            })
        }
        Value::Object(mut map) => {
            let Some(Value::Array(values)) = map.remove("data") else {
                return Err(ClientError::Decode(
                    "expected a 'data' array in the list response".to_string(),
                ));
            };
            let read = |key: &str, fallback: i64| -> i64 {
                map.get(key).and_then(Value::as_i64).unwrap_or(fallback)
            };
            let total = read("total", values.len() as i64);
            let items_per_page = read("per_page", values.len().max(1) as i64).max(1);
            let current_page = read("current_page", 1).max(1);
            let items = decode_items(values)?;
            Ok(Page {
                items,
                current_page,
                total_pages: ceil_div(total, items_per_page),
                total_items: total,
                items_per_page,
            })
        }
        _ => Err(ClientError::Decode(
            "list response was neither an array nor an envelope".to_string(),
        )),
    }
}

/// Normalize a single-record body, unwrapping `{data: record}` when present.
pub fn normalize_record<T: DeserializeOwned>(body: &[u8]) -> Result<T, ClientError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ClientError::Decode(e.to_string()))?;

    let record = match value {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap()
        }
        other => other,
    };

    serde_json::from_value(record).map_err(|e| ClientError::Decode(e.to_string()))
}
