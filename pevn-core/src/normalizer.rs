//! EventNormalizer.
//!
//! Classifies a raw event envelope into the canonical [`ProcessedEvent`]
//! schema. Classification is total: detail fields are read without
//! validation and anything missing is carried through as absent.

use crate::config::DeploymentConfig;
use crate::utils::first_present_or;
use pevn_sdk::objects::{GenericEvent, ProcessedEvent, RawEvent, ServiceDeploymentEvent};
use pevn_sdk::timestamp::iso8601;
use serde_json::{Map, Value};
use time::OffsetDateTime;
use tracing::debug;

/// Event source identifier of the deployment provider.
pub const DEPLOYMENT_PROVIDER_SOURCE: &str = "aws.proton";
/// Detail type of a service status change from the deployment provider.
pub const SERVICE_STATUS_CHANGE: &str = "Proton Service Status Change";

/// Normalizes raw events, stamping them with the configured environment and region.
#[derive(Debug, Clone)]
pub struct EventNormalizer {
    config: DeploymentConfig,
}

impl EventNormalizer {
    pub fn new(config: DeploymentConfig) -> Self {
        Self { config }
    }

    /// Classify a raw event using the current time wherever the event lacks one.
    pub fn classify(&self, raw: &RawEvent) -> ProcessedEvent {
        self.classify_at(raw, OffsetDateTime::now_utc())
    }

    /// Classify a raw event, using `now` wherever the event lacks a timestamp.
    pub fn classify_at(&self, raw: &RawEvent, now: OffsetDateTime) -> ProcessedEvent {
        if is_service_status_change(raw) {
            let evt = self.service_deployment(&raw.detail, now);
            debug!(
                service = ?evt.service_name,
                deployment_status = ?evt.deployment_status,
                "Processed service status change"
            );
            ProcessedEvent::ServiceDeployment(evt)
        } else {
            let evt = self.generic(raw, now);
            debug!(
                source = %evt.event_source,
                event_type = %evt.event_type,
                "Processed generic event"
            );
            ProcessedEvent::Generic(evt)
        }
    }

    fn service_deployment(
        &self,
        detail: &Map<String, Value>,
        now: OffsetDateTime,
    ) -> ServiceDeploymentEvent {
        let major = detail_text(detail, "templateMajorVersion").unwrap_or_default();
        let minor = detail_text(detail, "templateMinorVersion").unwrap_or_default();

        ServiceDeploymentEvent {
            service_name: detail_text(detail, "name"),
            status: detail_text(detail, "status"),
            deployment_status: detail_text(detail, "deploymentStatus"),
            template_name: detail_text(detail, "templateName"),
            template_version: format!("{major}.{minor}"),
            timestamp: first_present_or(
                [detail_text(detail, "lastDeploymentSucceededAt")],
                &iso8601(now),
            ),
            environment: self.config.environment.clone(),
            region: self.config.region.clone(),
        }
    }

    fn generic(&self, raw: &RawEvent, now: OffsetDateTime) -> GenericEvent {
        GenericEvent {
            event_source: first_present_or([Some(&raw.source)], DeploymentConfig::UNKNOWN),
            event_type: first_present_or([Some(&raw.detail_type)], DeploymentConfig::UNKNOWN),
            raw_detail: raw.detail.clone(),
            timestamp: iso8601(now),
            environment: self.config.environment.clone(),
            region: self.config.region.clone(),
        }
    }
}

fn is_service_status_change(raw: &RawEvent) -> bool {
    raw.source == DEPLOYMENT_PROVIDER_SOURCE && raw.detail_type == SERVICE_STATUS_CHANGE
}

/// Read a detail field as text.
///
/// Strings are taken as-is, other scalars by their JSON text and nested
/// values as compact JSON. `null` and missing fields are absent.
fn detail_text(detail: &Map<String, Value>, key: &str) -> Option<String> {
    match detail.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2024-06-01 12:00:00.250 UTC);

    fn detail(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("detail must be an object, got {other}"),
        }
    }

    fn proton_event(detail_value: Value) -> RawEvent {
        RawEvent::new(
            DEPLOYMENT_PROVIDER_SOURCE,
            SERVICE_STATUS_CHANGE,
            detail(detail_value),
        )
    }

    fn normalizer(environment: &str) -> EventNormalizer {
        EventNormalizer::new(DeploymentConfig::new(Some(environment), Some("ap-southeast-2")))
    }

    #[test]
    fn test_service_status_change_is_classified_as_deployment() {
        let raw = proton_event(json!({
            "name": "orders-svc",
            "status": "ACTIVE",
            "deploymentStatus": "SUCCEEDED",
            "templateName": "lambda-service",
            "templateMajorVersion": 1,
            "templateMinorVersion": 2,
            "lastDeploymentSucceededAt": "2024-01-01T00:00:00Z"
        }));

        let ProcessedEvent::ServiceDeployment(evt) = normalizer("prod").classify_at(&raw, NOW)
        else {
            panic!("expected a service deployment event");
        };

        assert_eq!(evt.service_name.as_deref(), Some("orders-svc"));
        assert_eq!(evt.status.as_deref(), Some("ACTIVE"));
        assert_eq!(evt.deployment_status.as_deref(), Some("SUCCEEDED"));
        assert_eq!(evt.template_name.as_deref(), Some("lambda-service"));
        assert_eq!(evt.template_version, "1.2");
        assert_eq!(evt.timestamp, "2024-01-01T00:00:00Z");
        assert_eq!(evt.environment, "prod");
        assert_eq!(evt.region, "ap-southeast-2");
    }

    #[test]
    fn test_deployment_without_timestamp_uses_now() {
        let raw = proton_event(json!({
            "name": "orders-svc",
            "templateMajorVersion": "3",
            "templateMinorVersion": "0"
        }));

        let evt = normalizer("dev").classify_at(&raw, NOW);
        assert_eq!(evt.timestamp(), "2024-06-01T12:00:00.250Z");

        let ProcessedEvent::ServiceDeployment(evt) = evt else {
            panic!("expected a service deployment event");
        };
        assert_eq!(evt.template_version, "3.0");
        assert_eq!(evt.status, None);
        assert_eq!(evt.deployment_status, None);
    }

    #[test]
    fn test_deployment_with_empty_detail_degrades_without_failing() {
        let raw = proton_event(json!({ "lastDeploymentSucceededAt": "" }));

        let ProcessedEvent::ServiceDeployment(evt) = normalizer("dev").classify_at(&raw, NOW)
        else {
            panic!("expected a service deployment event");
        };
        assert_eq!(evt.service_name, None);
        assert_eq!(evt.template_version, ".");
        assert_eq!(evt.timestamp, "2024-06-01T12:00:00.250Z");
    }

    #[test]
    fn test_other_events_are_generic() {
        let raw = RawEvent::new("custom.app", "Something", detail(json!({ "foo": "bar" })));

        let ProcessedEvent::Generic(evt) = normalizer("unknown").classify_at(&raw, NOW) else {
            panic!("expected a generic event");
        };
        assert_eq!(evt.event_source, "custom.app");
        assert_eq!(evt.event_type, "Something");
        assert_eq!(evt.raw_detail, raw.detail);
        assert_eq!(evt.timestamp, "2024-06-01T12:00:00.250Z");
    }

    #[test]
    fn test_proton_source_with_other_detail_type_is_generic() {
        let raw = RawEvent::new(
            DEPLOYMENT_PROVIDER_SOURCE,
            "Proton Environment Status Change",
            detail(json!({ "name": "shared-env" })),
        );
        assert!(matches!(
            normalizer("dev").classify_at(&raw, NOW),
            ProcessedEvent::Generic(_)
        ));
    }

    #[test]
    fn test_generic_event_without_envelope_fields() {
        let ProcessedEvent::Generic(evt) =
            normalizer("dev").classify_at(&RawEvent::default(), NOW)
        else {
            panic!("expected a generic event");
        };
        assert_eq!(evt.event_source, "unknown");
        assert_eq!(evt.event_type, "unknown");
        assert!(evt.raw_detail.is_empty());
    }

    #[test]
    fn test_detail_text_renders_non_strings() {
        let detail = detail(json!({
            "n": 7,
            "b": true,
            "o": { "k": "v" },
            "null": null
        }));
        assert_eq!(detail_text(&detail, "n").as_deref(), Some("7"));
        assert_eq!(detail_text(&detail, "b").as_deref(), Some("true"));
        assert_eq!(detail_text(&detail, "o").as_deref(), Some(r#"{"k":"v"}"#));
        assert_eq!(detail_text(&detail, "null"), None);
        assert_eq!(detail_text(&detail, "missing"), None);
    }

    #[test]
    fn test_classify_stamps_a_timestamp() {
        let evt = normalizer("dev").classify(&RawEvent::default());
        assert!(!evt.timestamp().is_empty());
    }
}
