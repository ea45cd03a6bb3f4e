//! Request and response payloads of the normalizer and notifier invocations.

use serde::{Deserialize, Serialize};

use super::notification::DeliveryReceipt;
use super::processed::ProcessedEvent;
use super::raw_event::RawEvent;

/// Body text returned by a successful notifier invocation.
pub const NOTIFICATION_SENT: &str = "Notification sent successfully";

/// Output of the normalizer invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizerResponse {
    pub status_code: u16,
    pub processed_data: ProcessedEvent,
    pub raw_event: RawEvent,
}

impl NormalizerResponse {
    pub fn ok(processed_data: ProcessedEvent, raw_event: RawEvent) -> Self {
        Self {
            status_code: 200,
            processed_data,
            raw_event,
        }
    }
}

/// Input of the notifier invocation. This is the normalizer's output minus
/// the status code, so the two can be chained directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifierRequest {
    pub processed_data: ProcessedEvent,
    #[serde(default)]
    pub raw_event: RawEvent,
}

impl From<NormalizerResponse> for NotifierRequest {
    fn from(value: NormalizerResponse) -> Self {
        Self {
            processed_data: value.processed_data,
            raw_event: value.raw_event,
        }
    }
}

/// Output of a successful notifier invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifierResponse {
    pub status_code: u16,
    pub body: String,
    pub notification_details: NotificationDetails,
}

impl NotifierResponse {
    pub fn sent(receipt: DeliveryReceipt) -> Self {
        Self {
            status_code: 200,
            body: NOTIFICATION_SENT.to_string(),
            notification_details: receipt.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDetails {
    pub subject: String,
    pub topic_arn: String,
    pub timestamp: String,
}

impl From<DeliveryReceipt> for NotificationDetails {
    fn from(receipt: DeliveryReceipt) -> Self {
        Self {
            subject: receipt.subject,
            topic_arn: receipt.topic_ref,
            timestamp: receipt.timestamp,
        }
    }
}
