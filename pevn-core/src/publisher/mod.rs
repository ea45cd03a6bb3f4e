//! Publisher.
//!
//! Sends a [`Notification`] to a pub/sub topic and returns a
//! [`DeliveryReceipt`]. Each call makes exactly one attempt; retrying a
//! failed publish is left to the caller.
//!
//! The topic itself is reached through a [`TopicTransport`]:
//!
//! - [`HttpTopicTransport`] posts the message to an HTTP(S) endpoint
//! - [`MemoryTopicTransport`] keeps messages in process

mod http;
mod memory;

pub use http::{HttpTopicTransport, parse_topic_url};
pub use memory::MemoryTopicTransport;

use async_trait::async_trait;
use kanau::processor::Processor;
use pevn_sdk::objects::{DeliveryReceipt, Notification, TopicMessage};
use pevn_sdk::timestamp::now_iso8601;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Largest message a topic accepts, subject included (256 KiB).
pub const MAX_MESSAGE_BYTES: usize = 256 * 1024;

/// Errors that can occur while publishing a notification.
#[derive(Debug, Error)]
pub enum PublishError {
    /// No topic reference is configured
    #[error("no notification topic configured")]
    MissingTopic,

    /// The topic reference cannot be used by the transport
    #[error("invalid topic reference {topic_ref}: {reason}")]
    InvalidTopic { topic_ref: String, reason: String },

    /// The message exceeds what the topic accepts
    #[error("message of {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },

    /// Notification body could not be serialized
    #[error("message serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Network or protocol failure talking to the topic
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The topic endpoint refused the message
    #[error("topic rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// A way of delivering a message to a topic.
#[async_trait]
pub trait TopicTransport: Send + Sync {
    /// Deliver one message to `topic_ref`.
    async fn send(&self, topic_ref: &str, message: &TopicMessage) -> Result<(), PublishError>;
}

/// Publishes notifications through a [`TopicTransport`].
#[derive(Clone)]
pub struct Publisher {
    transport: Arc<dyn TopicTransport>,
    topic_ref: Option<String>,
}

impl Publisher {
    /// Create a new Publisher.
    ///
    /// # Arguments
    ///
    /// * `transport` - How messages reach the topic
    /// * `topic_ref` - Topic used by [`Publisher::publish`]; publishing fails while `None`
    pub fn new(transport: Arc<dyn TopicTransport>, topic_ref: Option<String>) -> Self {
        Self {
            transport,
            topic_ref,
        }
    }

    pub fn topic_ref(&self) -> Option<&str> {
        self.topic_ref.as_deref()
    }

    /// Publish to the configured topic.
    pub async fn publish(&self, notification: &Notification) -> Result<DeliveryReceipt, PublishError> {
        let topic_ref = self.topic_ref().ok_or(PublishError::MissingTopic)?;
        self.publish_to(notification, topic_ref).await
    }

    /// Publish to an explicit topic.
    pub async fn publish_to(
        &self,
        notification: &Notification,
        topic_ref: &str,
    ) -> Result<DeliveryReceipt, PublishError> {
        let message = TopicMessage::from_notification(notification)?;

        let size = message.size();
        if size > MAX_MESSAGE_BYTES {
            return Err(PublishError::PayloadTooLarge {
                size,
                limit: MAX_MESSAGE_BYTES,
            });
        }

        self.transport.send(topic_ref, &message).await?;

        info!(topic = topic_ref, subject = %message.subject, "Notification published");

        Ok(DeliveryReceipt {
            subject: message.subject,
            topic_ref: topic_ref.to_string(),
            timestamp: now_iso8601(),
        })
    }
}

impl Processor<Notification> for Publisher {
    type Output = DeliveryReceipt;
    type Error = PublishError;
    #[tracing::instrument(skip_all, err, name = "Publish")]
    async fn process(&self, notification: Notification) -> Result<DeliveryReceipt, PublishError> {
        self.publish(&notification).await
    }
}
