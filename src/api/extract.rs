use axum::extract::{FromRequest, FromRequestParts};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// `axum::Json` with rejections rendered as `{"error": ...}` 400s
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` with unparseable ids rendered as 404s
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct IdPath<T>(pub T);

/// A JSON request body that must be an object
pub type JsonObject = Map<String, Value>;

pub fn into_object(value: Value) -> Result<JsonObject, ApiError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::bad_request("Request body must be a JSON object")),
    }
}

/// Fail with one `BadRequest` naming every absent (or null) field, in the given order
pub fn require_fields(data: &JsonObject, required: &[&str]) -> Result<(), ApiError> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|field| data.get(*field).map_or(true, Value::is_null))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::bad_request(format!(
            "{} must be in the request body",
            missing.join(", ")
        )))
    }
}

/// Optional string field; present values of any other JSON type are rejected
pub fn optional_string(data: &JsonObject, field: &str) -> Result<Option<String>, ApiError> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ApiError::bad_request(format!("{} must be a string", field))),
    }
}

/// String field already checked by `require_fields`
pub fn required_string(data: &JsonObject, field: &str) -> Result<String, ApiError> {
    optional_string(data, field)?
        .ok_or_else(|| ApiError::bad_request(format!("{} must be in the request body", field)))
}
