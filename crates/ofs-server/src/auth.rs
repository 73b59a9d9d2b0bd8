use axum::{
    Json,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};

use serde_json::json;

/// Rejection for a missing or invalid bearer token.
///
/// Rendered as HTTP 401 with a generic body; the offending token is
/// never echoed back.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Unauthorized;

impl IntoResponse for Unauthorized {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Unauthorized" })),
        )
            .into_response()
    }
}

/// Checks the `Authorization: Bearer <key>` header against the
/// configured key.
pub(crate) fn authorize(headers: &HeaderMap, api_key: &str) -> Result<(), Unauthorized> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| *token == api_key)
        .map(|_| ())
        .ok_or(Unauthorized)
}
