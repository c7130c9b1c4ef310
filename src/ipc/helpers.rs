use serde::Serialize;

use super::error::err;
use super::types::Request;

pub fn required_str(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

pub fn required_i64(req: &Request, key: &str) -> Result<i64, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| {
            err(
                &req.id,
                "bad_params",
                format!("missing {} (must be integer)", key),
                None,
            )
        })
}

/// Deserialize an optional object param; `null` and absent are both `None`.
pub fn optional_object<T: serde::de::DeserializeOwned>(
    req: &Request,
    key: &str,
) -> Result<Option<T>, serde_json::Value> {
    match req.params.get(key) {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => serde_json::from_value(v.clone())
            .map(Some)
            .map_err(|e| err(&req.id, "bad_params", format!("invalid {}: {}", key, e), None)),
    }
}

pub fn to_json<T: Serialize>(req: &Request, value: &T) -> Result<serde_json::Value, serde_json::Value> {
    serde_json::to_value(value).map_err(|e| err(&req.id, "internal", e.to_string(), None))
}
