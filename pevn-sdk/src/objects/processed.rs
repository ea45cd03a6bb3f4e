//! The canonical event schema every raw event is normalized into.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A normalized event.
///
/// On the wire this is a flat camelCase object with a `kind` discriminator,
/// e.g. `{"kind": "serviceDeployment", "serviceName": "...", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ProcessedEvent {
    /// A deployment provider reported a service status change.
    ServiceDeployment(ServiceDeploymentEvent),
    /// Any other event, carried through with its raw detail.
    Generic(GenericEvent),
}

impl ProcessedEvent {
    pub fn timestamp(&self) -> &str {
        match self {
            ProcessedEvent::ServiceDeployment(evt) => &evt.timestamp,
            ProcessedEvent::Generic(evt) => &evt.timestamp,
        }
    }

    pub fn environment(&self) -> &str {
        match self {
            ProcessedEvent::ServiceDeployment(evt) => &evt.environment,
            ProcessedEvent::Generic(evt) => &evt.environment,
        }
    }

    pub fn region(&self) -> &str {
        match self {
            ProcessedEvent::ServiceDeployment(evt) => &evt.region,
            ProcessedEvent::Generic(evt) => &evt.region,
        }
    }
}

/// Service status change reported by the deployment provider.
///
/// Detail fields are not validated; anything the provider left out stays `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDeploymentEvent {
    pub service_name: Option<String>,
    pub status: Option<String>,
    pub deployment_status: Option<String>,
    pub template_name: Option<String>,
    /// `"{major}.{minor}"`
    pub template_version: String,
    pub timestamp: String,
    pub environment: String,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericEvent {
    pub event_source: String,
    pub event_type: String,
    #[serde(default)]
    pub raw_detail: Map<String, Value>,
    pub timestamp: String,
    pub environment: String,
    pub region: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deployment_wire_shape() {
        let evt = ProcessedEvent::ServiceDeployment(ServiceDeploymentEvent {
            service_name: Some("orders-svc".to_string()),
            status: Some("ACTIVE".to_string()),
            deployment_status: Some("SUCCEEDED".to_string()),
            template_name: None,
            template_version: "1.2".to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            environment: "prod".to_string(),
            region: "ap-southeast-2".to_string(),
        });

        assert_eq!(
            serde_json::to_value(&evt).unwrap(),
            json!({
                "kind": "serviceDeployment",
                "serviceName": "orders-svc",
                "status": "ACTIVE",
                "deploymentStatus": "SUCCEEDED",
                "templateName": null,
                "templateVersion": "1.2",
                "timestamp": "2024-01-01T00:00:00Z",
                "environment": "prod",
                "region": "ap-southeast-2"
            })
        );
    }

    #[test]
    fn test_generic_parses_without_raw_detail() {
        let evt: ProcessedEvent = serde_json::from_value(json!({
            "kind": "generic",
            "eventSource": "custom.app",
            "eventType": "Something",
            "timestamp": "2024-01-01T00:00:00.000Z",
            "environment": "dev",
            "region": "unknown"
        }))
        .unwrap();

        let ProcessedEvent::Generic(generic) = &evt else {
            panic!("expected generic event, got {evt:?}");
        };
        assert!(generic.raw_detail.is_empty());
        assert_eq!(evt.environment(), "dev");
        assert_eq!(evt.region(), "unknown");
        assert_eq!(evt.timestamp(), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let result = serde_json::from_value::<ProcessedEvent>(json!({
            "kind": "mystery",
            "timestamp": "2024-01-01T00:00:00.000Z"
        }));
        assert!(result.is_err());
    }
}
