use super::{PublishError, TopicTransport};
use async_trait::async_trait;
use pevn_sdk::objects::TopicMessage;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-process topics.
///
/// Topics must be created before anything can be published to them.
/// Delivered messages are kept per topic in arrival order.
#[derive(Debug, Clone, Default)]
pub struct MemoryTopicTransport {
    topics: Arc<RwLock<HashMap<String, Vec<TopicMessage>>>>,
}

impl MemoryTopicTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a topic. Creating an existing topic keeps its messages.
    pub async fn create_topic(&self, topic_ref: impl Into<String>) {
        self.topics
            .write()
            .await
            .entry(topic_ref.into())
            .or_default();
    }

    /// Messages delivered to a topic so far.
    pub async fn messages(&self, topic_ref: &str) -> Vec<TopicMessage> {
        self.topics
            .read()
            .await
            .get(topic_ref)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl TopicTransport for MemoryTopicTransport {
    async fn send(&self, topic_ref: &str, message: &TopicMessage) -> Result<(), PublishError> {
        let mut topics = self.topics.write().await;
        let Some(messages) = topics.get_mut(topic_ref) else {
            return Err(PublishError::InvalidTopic {
                topic_ref: topic_ref.to_string(),
                reason: "topic does not exist".to_string(),
            });
        };
        messages.push(message.clone());
        Ok(())
    }
}
