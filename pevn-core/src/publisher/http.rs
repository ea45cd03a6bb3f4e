use super::{PublishError, TopicTransport};
use async_trait::async_trait;
use pevn_sdk::objects::TopicMessage;
use std::time::Duration;
use url::Url;

/// Topic reached over HTTP: the topic reference is the endpoint URL and
/// each message is POSTed to it as JSON.
#[derive(Debug, Clone)]
pub struct HttpTopicTransport {
    http_client: reqwest::Client,
}

impl HttpTopicTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

/// Parse a topic reference into an HTTP(S) endpoint.
pub fn parse_topic_url(topic_ref: &str) -> Result<Url, PublishError> {
    let invalid = |reason: String| PublishError::InvalidTopic {
        topic_ref: topic_ref.to_string(),
        reason,
    };

    let url = Url::parse(topic_ref).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme `{other}`"))),
    }
}

#[async_trait]
impl TopicTransport for HttpTopicTransport {
    async fn send(&self, topic_ref: &str, message: &TopicMessage) -> Result<(), PublishError> {
        let url = parse_topic_url(topic_ref)?;

        let response = self.http_client.post(url).json(message).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(PublishError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}
