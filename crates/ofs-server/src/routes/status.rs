use axum::{Json, extract::State, http::HeaderMap};

use crate::auth::{Unauthorized, authorize};
use crate::responses::status::{StatusResponse, status_response};
use crate::state::AppState;

/// Device status report.
///
/// The payload is fixed; the device always reports the same identity,
/// tax tables, and versions regardless of the authentication state.
pub(super) async fn report(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StatusResponse>, Unauthorized> {
    authorize(&headers, state.api_key())?;

    Ok(Json(status_response()))
}
