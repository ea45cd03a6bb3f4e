use axum::{Json, extract::State, http::StatusCode};
use pevn_sdk::objects::RawEvent;

use super::ApiError;
use crate::state::AppState;

/// `POST /events` — queue a raw event for the dispatcher.
///
/// Returns `202 Accepted` once queued. The outcome of the publish is only
/// visible in the dispatcher's logs.
pub(super) async fn ingest(
    State(state): State<AppState>,
    Json(raw): Json<RawEvent>,
) -> Result<StatusCode, ApiError> {
    state
        .event_tx
        .send(raw)
        .await
        .map_err(|_| ApiError::DispatcherUnavailable)?;

    Ok(StatusCode::ACCEPTED)
}
