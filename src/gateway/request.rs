use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The HTTP-style trigger event handed to a handler.
///
/// Only `headers` and `body` are interpreted. Every other field of the event
/// is kept in `extra` so the event can be echoed back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InboundRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InboundRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }

    /// Exact-match header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Body bytes; an absent body reads as empty.
    pub fn body_bytes(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default().as_bytes()
    }
}

// API gateways send `"headers": null` when a request carries none.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_keeps_unknown_fields() {
        let event: InboundRequest = serde_json::from_value(json!({
            "headers": { "keyName": "pet1" },
            "body": "{\"name\":\"Rex\"}",
            "httpMethod": "PUT",
            "requestContext": { "stage": "dev" }
        }))
        .unwrap();

        assert_eq!(event.header("keyName"), Some("pet1"));
        assert_eq!(event.header("keyname"), None);
        assert_eq!(event.body_bytes(), b"{\"name\":\"Rex\"}");

        let echoed = serde_json::to_value(&event).unwrap();
        assert_eq!(echoed["httpMethod"], "PUT");
        assert_eq!(echoed["requestContext"]["stage"], "dev");
    }

    #[test]
    fn test_null_headers_and_missing_body() {
        let event: InboundRequest = serde_json::from_value(json!({ "headers": null })).unwrap();

        assert!(event.headers.is_empty());
        assert_eq!(event.body, None);
        assert!(event.body_bytes().is_empty());
    }
}
