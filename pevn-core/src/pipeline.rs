//! One pipeline run: normalize, format, publish.
//!
//! ```text
//! RawEvent -> EventNormalizer -> ProcessedEvent
//!          -> NotificationFormatter -> Notification
//!          -> Publisher -> DeliveryReceipt
//! ```
//!
//! Only the publish step can fail. Runs share no mutable state, so a
//! `Pipeline` can be cloned freely across concurrent callers.

use crate::config::RuntimeConfig;
use crate::formatter::NotificationFormatter;
use crate::normalizer::EventNormalizer;
use crate::publisher::{PublishError, Publisher, TopicTransport};
use kanau::processor::Processor;
use pevn_sdk::objects::{DeliveryReceipt, RawEvent};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct Pipeline {
    normalizer: EventNormalizer,
    formatter: NotificationFormatter,
    publisher: Publisher,
}

impl Pipeline {
    pub fn new(config: &RuntimeConfig, transport: Arc<dyn TopicTransport>) -> Self {
        Self {
            normalizer: EventNormalizer::new(config.deployment.clone()),
            formatter: NotificationFormatter::new(config.deployment.clone()),
            publisher: Publisher::new(transport, config.publisher.topic_ref.clone()),
        }
    }

    pub fn normalizer(&self) -> &EventNormalizer {
        &self.normalizer
    }

    pub fn formatter(&self) -> &NotificationFormatter {
        &self.formatter
    }

    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }
}

impl Processor<RawEvent> for Pipeline {
    type Output = DeliveryReceipt;
    type Error = PublishError;
    #[tracing::instrument(skip_all, err, name = "Pipeline")]
    async fn process(&self, raw: RawEvent) -> Result<DeliveryReceipt, PublishError> {
        let processed = self.normalizer.classify(&raw);
        let notification = self.formatter.format_with_raw(&processed, &raw);
        debug!(subject = %notification.subject, "Notification formatted");
        self.publisher.process(notification).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::{DeploymentConfig, PublisherConfig};
    use crate::publisher::{HttpTopicTransport, MemoryTopicTransport};
    use serde_json::{Value, json};
    use std::time::Duration;

    fn config(environment: Option<&str>, topic_ref: Option<&str>) -> RuntimeConfig {
        RuntimeConfig {
            deployment: DeploymentConfig::new(environment, Some("ap-southeast-2")),
            publisher: PublisherConfig {
                topic_ref: topic_ref.map(str::to_string),
                ..PublisherConfig::default()
            },
        }
    }

    fn raw(value: Value) -> RawEvent {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_proton_event_end_to_end() {
        let transport = MemoryTopicTransport::new();
        transport.create_topic("deployments").await;
        let pipeline = Pipeline::new(
            &config(Some("prod"), Some("deployments")),
            Arc::new(transport.clone()),
        );

        let receipt = pipeline
            .process(raw(json!({
                "source": "aws.proton",
                "detail-type": "Proton Service Status Change",
                "detail": {
                    "name": "orders-svc",
                    "status": "ACTIVE",
                    "deploymentStatus": "SUCCEEDED",
                    "templateName": "lambda-service",
                    "templateMajorVersion": 1,
                    "templateMinorVersion": 2,
                    "lastDeploymentSucceededAt": "2024-01-01T00:00:00Z"
                }
            })))
            .await
            .unwrap();

        assert_eq!(receipt.subject, "[PROD] Proton Service orders-svc - SUCCEEDED");
        assert_eq!(receipt.topic_ref, "deployments");

        let messages = transport.messages("deployments").await;
        assert_eq!(messages.len(), 1);
        let body: Value = serde_json::from_str(&messages[0].message).unwrap();
        assert_eq!(body["version"], "1.2");
        assert_eq!(body["environment"], "prod");
    }

    #[tokio::test]
    async fn test_generic_event_end_to_end() {
        let transport = MemoryTopicTransport::new();
        transport.create_topic("platform").await;
        let pipeline = Pipeline::new(&config(None, Some("platform")), Arc::new(transport.clone()));

        let receipt = pipeline
            .process(raw(json!({
                "source": "custom.app",
                "detail-type": "Something",
                "detail": { "foo": "bar" }
            })))
            .await
            .unwrap();

        assert_eq!(receipt.subject, "[UNKNOWN] Platform Event Notification");
        let messages = transport.messages("platform").await;
        let body: Value = serde_json::from_str(&messages[0].message).unwrap();
        assert_eq!(body["eventType"], "Something");
        assert_eq!(body["details"]["region"], "ap-southeast-2");
    }

    #[tokio::test]
    async fn test_invalid_topic_fails_the_run() {
        let pipeline = Pipeline::new(
            &config(Some("prod"), Some("::invalid::")),
            Arc::new(HttpTopicTransport::new(Duration::from_secs(1))),
        );

        let result = pipeline.process(RawEvent::default()).await;

        assert!(matches!(result, Err(PublishError::InvalidTopic { .. })));
    }
}
