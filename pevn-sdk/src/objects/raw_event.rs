use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// An incoming event envelope as delivered by the event bus.
///
/// Only `source`, `detail-type` and `detail` are interpreted. Each may be
/// missing or `null` and then reads as empty. Every other envelope field is
/// kept in `envelope` so the event can be echoed back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(rename = "detail-type", default, deserialize_with = "null_as_default")]
    pub detail_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub detail: Map<String, Value>,
    #[serde(flatten)]
    pub envelope: Map<String, Value>,
}

impl RawEvent {
    pub fn new(
        source: impl Into<String>,
        detail_type: impl Into<String>,
        detail: Map<String, Value>,
    ) -> Self {
        Self {
            source: source.into(),
            detail_type: detail_type.into(),
            detail,
            envelope: Map::new(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_event_bridge_envelope() {
        let raw: RawEvent = serde_json::from_value(json!({
            "version": "0",
            "id": "6a7e8feb-b491-4cf7-a9f1-bf3703467718",
            "source": "aws.proton",
            "detail-type": "Proton Service Status Change",
            "account": "111122223333",
            "detail": { "name": "orders-svc" }
        }))
        .unwrap();

        assert_eq!(raw.source, "aws.proton");
        assert_eq!(raw.detail_type, "Proton Service Status Change");
        assert_eq!(raw.detail["name"], "orders-svc");
        assert_eq!(raw.envelope["account"], "111122223333");
        assert!(!raw.envelope.contains_key("detail"));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let raw: RawEvent = serde_json::from_value(json!({})).unwrap();
        assert_eq!(raw, RawEvent::default());
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let raw: RawEvent = serde_json::from_value(json!({
            "id": "abc",
            "source": null,
            "detail-type": null,
            "detail": null
        }))
        .unwrap();

        assert!(raw.source.is_empty());
        assert!(raw.detail_type.is_empty());
        assert!(raw.detail.is_empty());
        assert_eq!(raw.envelope["id"], "abc");
        assert!(!raw.envelope.contains_key("detail"));
    }

    #[test]
    fn test_echo_keeps_envelope_fields() {
        let input = json!({
            "id": "abc",
            "source": "custom.app",
            "detail-type": "Something",
            "detail": { "foo": "bar" }
        });
        let raw: RawEvent = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&raw).unwrap(), input);
    }
}
