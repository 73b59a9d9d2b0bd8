use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use serde_json::json;

use tracing::debug;

use crate::auth::{Unauthorized, authorize};
use crate::state::AppState;

/// Availability probe.
///
/// Answers 200 with an empty body while the device is available, 404
/// otherwise. Clients poll this endpoint to decide whether to offer the
/// PIN entry flow.
pub(super) async fn probe(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, Unauthorized> {
    authorize(&headers, state.api_key())?;

    let device = state.device().lock().await;
    if device.is_available() {
        debug!("attention probe: service available");
        Ok(StatusCode::OK.into_response())
    } else {
        debug!("attention probe: service not available");
        Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Service not available" })),
        )
            .into_response())
    }
}
