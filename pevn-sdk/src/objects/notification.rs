//! Notification payloads and the topic wire message.

use serde::{Deserialize, Serialize};

use super::processed::ProcessedEvent;

/// A formatted notification ready to be published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Always starts with `[{ENVIRONMENT}]`, uppercased.
    pub subject: String,
    pub body: NotificationBody,
}

impl Notification {
    /// The message text sent to the topic: the body as JSON, pretty-printed
    /// with two-space indentation.
    pub fn message(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.body)
    }
}

/// Structured body of a notification. Keys serialize in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotificationBody {
    ServiceDeployment(DeploymentBody),
    Generic(GenericBody),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentBody {
    pub title: String,
    pub service: Option<String>,
    pub status: Option<String>,
    pub template: Option<String>,
    pub version: String,
    pub timestamp: String,
    pub environment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericBody {
    pub title: String,
    pub event_type: String,
    pub source: String,
    pub timestamp: String,
    pub details: ProcessedEvent,
    pub environment: String,
}

/// The message exactly as handed to the topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicMessage {
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Message")]
    pub message: String,
}

impl TopicMessage {
    pub fn from_notification(notification: &Notification) -> Result<Self, serde_json::Error> {
        Ok(Self {
            subject: notification.subject.clone(),
            message: notification.message()?,
        })
    }

    /// Size of the message on the wire, subject included.
    pub fn size(&self) -> usize {
        self.subject.len() + self.message.len()
    }
}

/// Acknowledgment of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReceipt {
    pub subject: String,
    pub topic_ref: String,
    pub timestamp: String,
}
