//! Normalizer and notifier invocations.
//!
//! The response of `POST /normalize` is a valid request for `POST /notify`,
//! so a workflow engine can chain the two.

use axum::{Json, extract::State};
use kanau::processor::Processor;
use pevn_sdk::objects::{NormalizerResponse, NotifierRequest, NotifierResponse, RawEvent};

use super::ApiError;
use crate::state::AppState;

/// `POST /normalize` — classify a raw event.
///
/// Never fails for a well-formed envelope.
pub(super) async fn normalize(
    State(state): State<AppState>,
    Json(raw): Json<RawEvent>,
) -> Json<NormalizerResponse> {
    tracing::info!(source = %raw.source, detail_type = %raw.detail_type, "Event processor triggered");

    let processed = state.pipeline.normalizer().classify(&raw);
    Json(NormalizerResponse::ok(processed, raw))
}

/// `POST /notify` — format a processed event and publish it to the
/// configured topic.
///
/// A publish failure is returned to the caller as-is; nothing is retried.
pub(super) async fn notify(
    State(state): State<AppState>,
    Json(request): Json<NotifierRequest>,
) -> Result<Json<NotifierResponse>, ApiError> {
    let notification = state
        .pipeline
        .formatter()
        .format_with_raw(&request.processed_data, &request.raw_event);

    tracing::info!(
        subject = %notification.subject,
        topic = ?state.pipeline.publisher().topic_ref(),
        "Sending notification"
    );

    let receipt = state
        .pipeline
        .publisher()
        .process(notification)
        .await
        .map_err(ApiError::Publish)?;

    tracing::info!("Notification sent successfully");
    Ok(Json(NotifierResponse::sent(receipt)))
}
