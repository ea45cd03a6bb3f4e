//! EventDispatcher processor.
//!
//! The EventDispatcher is responsible for:
//! - Receiving `RawEvent` from the ingestion queue
//! - Running the normalize/format/publish pipeline for each event, in arrival order
//! - Logging failed runs without affecting the rest of the queue
//!
//! Failed publishes are not retried here. Delivery is at-least-once at best
//! and redelivery belongs to whoever feeds the queue.

use crate::events::RawEventReceiver;
use crate::pipeline::Pipeline;
use kanau::processor::Processor;
use tokio::sync::watch;
use tracing::{debug, error, info};

/// Outcome counters for a dispatcher run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub delivered: u64,
    pub failed: u64,
}

/// EventDispatcher drains the raw event queue through the pipeline.
pub struct EventDispatcher {
    pipeline: Pipeline,
    event_rx: RawEventReceiver,
    shutdown_rx: watch::Receiver<bool>,
}

impl EventDispatcher {
    /// Create a new EventDispatcher.
    ///
    /// # Arguments
    ///
    /// * `pipeline` - Pipeline run for every received event
    /// * `event_rx` - Receiver for raw events
    /// * `shutdown_rx` - Receiver for shutdown signal
    pub fn new(
        pipeline: Pipeline,
        event_rx: RawEventReceiver,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            pipeline,
            event_rx,
            shutdown_rx,
        }
    }

    /// Run the EventDispatcher until shutdown or until every sender is dropped.
    pub async fn run(mut self) -> DispatchStats {
        info!("EventDispatcher started");

        let mut stats = DispatchStats::default();

        loop {
            tokio::select! {
                biased;

                // Check for shutdown
                changed = self.shutdown_rx.changed() => {
                    if changed.is_err() || *self.shutdown_rx.borrow() {
                        info!("EventDispatcher received shutdown signal");
                        break;
                    }
                }

                // Receive raw events
                event = self.event_rx.recv() => {
                    let Some(event) = event else {
                        info!("RawEvent channel closed");
                        break;
                    };

                    debug!(source = %event.source, detail_type = %event.detail_type, "Received RawEvent");

                    match self.pipeline.process(event).await {
                        Ok(receipt) => {
                            stats.delivered += 1;
                            debug!(subject = %receipt.subject, topic = %receipt.topic_ref, "Notification delivered");
                        }
                        Err(e) => {
                            stats.failed += 1;
                            error!(error = %e, "Failed to publish notification");
                        }
                    }
                }
            }
        }

        info!(
            delivered = stats.delivered,
            failed = stats.failed,
            "EventDispatcher shutdown complete"
        );

        stats
    }
}
