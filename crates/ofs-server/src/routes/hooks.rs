use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};

use serde_json::json;

use tracing::debug;

use crate::auth::authorize;
use crate::config::MockHookPolicy;
use crate::state::AppState;

// The hooks are open or bearer-protected depending on configuration.
fn check_hook_auth(state: &AppState, headers: &HeaderMap) -> Result<(), Response> {
    match state.hook_policy() {
        MockHookPolicy::Open => Ok(()),
        MockHookPolicy::Bearer => authorize(headers, state.api_key())
            .map_err(IntoResponse::into_response),
    }
}

/// Test hook forcing the device into the unavailable state.
///
/// Also clears the failure counter, lockout included, mirroring the real
/// hook.
pub(super) async fn lock(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = check_hook_auth(&state, &headers) {
        return response;
    }

    let mut device = state.device().lock().await;
    device.force_lock();
    debug!("mock lock hook applied");

    Json(json!({ "current_api_attention": device.attention_code() })).into_response()
}

/// Test hook forcing the device into the available state.
pub(super) async fn unlock(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = check_hook_auth(&state, &headers) {
        return response;
    }

    let mut device = state.device().lock().await;
    device.force_unlock();
    debug!("mock unlock hook applied");

    Json(json!({ "current_api_attention": device.attention_code() })).into_response()
}

/// Introspection hook reporting the current availability code.
pub(super) async fn current_attention(State(state): State<AppState>) -> Json<u16> {
    let device = state.device().lock().await;

    Json(device.attention_code())
}
