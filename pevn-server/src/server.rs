//! Axum server setup, router configuration and signal handling.

use crate::api;
use crate::state::AppState;
use axum::{Json, Router, response::IntoResponse, routing::get};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal::unix::{Signal, SignalKind, signal};

/// Build the main application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(api::router())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Returns OK while the server is accepting requests.
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Serve `router` until SIGTERM or SIGINT.
///
/// Signal handlers are installed before binding, so a failure to install
/// them is reported as an error instead of leaving the server unstoppable.
/// Once the signal arrives, in-flight requests finish and the router (and
/// with it the last event sender) is dropped.
pub async fn run_server(router: Router, addr: SocketAddr) -> Result<(), std::io::Error> {
    let sigterm = signal(SignalKind::terminate())?;
    let sigint = signal(SignalKind::interrupt())?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(stop_requested(sigterm, sigint))
        .await
}

async fn stop_requested(mut sigterm: Signal, mut sigint: Signal) {
    let name = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };
    tracing::info!(
        signal = name,
        "Stopping HTTP server; queued events will drain afterwards"
    );
}
