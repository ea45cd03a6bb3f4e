//! Platform Event Notifier Server
//!
//! Normalizes platform lifecycle events, formats them into notifications and
//! publishes them to a topic.

mod api;
mod config;
mod server;
mod state;

use clap::Parser;
use config::{ConfigLoader, Overrides};
use pevn_core::events::raw_event_channel;
use pevn_core::pipeline::Pipeline;
use pevn_core::processors::EventDispatcher;
use pevn_core::publisher::HttpTopicTransport;
use server::{build_router, run_server};
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// How long queued events may take to drain after the server stops.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Platform Event Notifier - lifecycle events to pub/sub notifications
#[derive(Parser, Debug)]
#[command(name = "pevn-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to an optional configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Deployment environment shown in every notification subject
    #[arg(long, env = "ENVIRONMENT")]
    environment: Option<String>,

    /// Deployment region
    #[arg(long, env = "REGION")]
    region: Option<String>,

    /// Region reported by the hosting platform, used when no region is set
    #[arg(long, env = "AWS_REGION", hide = true)]
    platform_region: Option<String>,

    /// Topic notifications are published to
    #[arg(long, env = "NOTIFICATION_TOPIC_ARN")]
    topic: Option<String>,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON", default_value = "false")]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing
    init_tracing(args.log_json);

    tracing::info!("Starting pevn-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = ConfigLoader::new(
        args.config.as_ref(),
        Overrides {
            listen: args.listen,
            environment: args.environment,
            region: args.region,
            platform_region: args.platform_region,
            topic: args.topic,
        },
    );
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    let runtime = &loaded_config.runtime;
    tracing::info!(
        environment = %runtime.deployment.environment,
        region = %runtime.deployment.region,
        topic = ?runtime.publisher.topic_ref,
        "Configuration loaded"
    );
    if runtime.publisher.topic_ref.is_none() {
        tracing::warn!("NOTIFICATION_TOPIC_ARN is not set; every publish will fail");
    }

    // Build the pipeline
    let transport = Arc::new(HttpTopicTransport::new(runtime.publisher.timeout));
    let pipeline = Pipeline::new(runtime, transport);

    // Spawn the dispatcher for queued events
    let (event_tx, event_rx) = raw_event_channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut dispatcher =
        tokio::spawn(EventDispatcher::new(pipeline.clone(), event_rx, shutdown_rx).run());

    // Build the router
    let router = build_router(AppState::new(pipeline, event_tx));

    // Run the server
    tracing::info!("Starting HTTP server on {}", loaded_config.listen);
    let result = run_server(router, loaded_config.listen).await;

    // The router owned the last event sender, so the dispatcher drains what
    // is queued and stops. Cut it short if that takes too long.
    tracing::info!("Draining queued events...");
    let stats = match tokio::time::timeout(DRAIN_TIMEOUT, &mut dispatcher).await {
        Ok(joined) => joined,
        Err(_) => {
            tracing::warn!("Dispatcher did not drain in time, stopping it");
            let _ = shutdown_tx.send(true);
            dispatcher.await
        }
    };
    match stats {
        Ok(stats) => tracing::info!(
            delivered = stats.delivered,
            failed = stats.failed,
            "Server shutdown complete"
        ),
        Err(e) => tracing::error!("Dispatcher task failed: {}", e),
    }

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
