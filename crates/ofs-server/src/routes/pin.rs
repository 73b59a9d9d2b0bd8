use axum::{extract::State, http::HeaderMap};

use tracing::debug;

use crate::auth::{Unauthorized, authorize};
use crate::state::AppState;

/// PIN submission.
///
/// The raw request body is the candidate PIN. The outcome code is
/// returned as a plain-text body with HTTP 200 whatever happens; only a
/// bad bearer token produces a non-200 status.
pub(super) async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<String, Unauthorized> {
    authorize(&headers, state.api_key())?;

    let mut device = state.device().lock().await;
    let outcome = device.submit_pin(&body);
    debug!(code = outcome.code(), "PIN submission");

    Ok(outcome.code().to_owned())
}
