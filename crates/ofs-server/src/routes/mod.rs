mod attention;
mod hooks;
mod invoices;
mod pin;
mod status;

use axum::{
    Json, Router,
    routing::{get, post},
};

use serde_json::{Value, json};

use crate::state::AppState;

/// Builds the full device router over the given state.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/attention", get(attention::probe))
        .route("/api/pin", post(pin::submit))
        .route("/api/status", get(status::report))
        .route("/api/invoices", post(invoices::issue))
        .route("/api/invoices/search", post(invoices::search))
        .route("/api/invoices/{invoice_number}", get(invoices::retrieve))
        .route("/mock/lock", get(hooks::lock).post(hooks::lock))
        .route("/mock/unlock", get(hooks::unlock).post(hooks::unlock))
        .route(
            "/mock/current_api_attention",
            get(hooks::current_attention),
        )
        .with_state(state)
}

// Liveness probe.
async fn root() -> Json<Value> {
    Json(json!({ "msg": "I am OFS mock server" }))
}
