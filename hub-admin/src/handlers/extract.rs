//! Path and body parsing with API-shaped rejections

use axum::{extract::rejection::JsonRejection, Json};
use serde_json::json;

use crate::services::{ApiError, ApiResult};

/// Parse a numeric `{id}` path segment
pub fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse().map_err(|_| {
        ApiError::bad_request("Invalid ID format").with_details(json!({
            "field": "id",
            "value": raw,
        }))
    })
}

/// Unwrap a JSON body, turning any rejection into a 400
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "rejected request body");
            Err(ApiError::bad_request("Invalid request body"))
        }
    }
}
