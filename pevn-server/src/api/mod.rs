//! HTTP API.
//!
//! # Endpoints
//!
//! - `POST /normalize` – classify a raw event and echo it back
//! - `POST /notify`    – format a processed event and publish it
//! - `POST /events`    – queue a raw event for the full pipeline

mod events;
mod invocations;

use crate::state::AppState;
use axum::{Router, http::StatusCode, response::IntoResponse, routing::post};
use pevn_core::publisher::PublishError;

/// Build the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/normalize", post(invocations::normalize))
        .route("/notify", post(invocations::notify))
        .route("/events", post(events::ingest))
}

/// Errors that can occur in API handlers.
#[derive(Debug)]
enum ApiError {
    /// Publishing the notification failed.
    Publish(PublishError),
    /// The dispatcher stopped accepting events.
    DispatcherUnavailable,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Publish(e) => {
                tracing::error!(error = %e, "Error sending notification");
                let status = match e {
                    PublishError::MissingTopic => StatusCode::INTERNAL_SERVER_ERROR,
                    PublishError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, e.to_string()).into_response()
            }
            ApiError::DispatcherUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "event dispatcher unavailable").into_response()
            }
        }
    }
}
