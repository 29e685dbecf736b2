use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::{GatewaySettings, InboundRequest, Outcome, ResponseEnvelope, StatusMode, KEY_HEADER};
use crate::storage::ObjectStore;
use crate::types::StoreError;

/// Writes the request body to the configured bucket under the key named by
/// the [`KEY_HEADER`] header. Existing objects are overwritten.
pub struct PutHandler {
    store: Arc<dyn ObjectStore>,
    settings: GatewaySettings,
}

impl PutHandler {
    pub fn new(store: Arc<dyn ObjectStore>, settings: GatewaySettings) -> Self {
        Self { store, settings }
    }

    pub async fn handle(&self, request: &InboundRequest, context: &Value) -> ResponseEnvelope {
        debug!(event = ?request, context = %context, "Put invocation received");

        let bucket = &self.settings.bucket;
        let key = request.header(KEY_HEADER).filter(|k| !k.is_empty());

        let result = match (key, self.settings.status_mode) {
            (Some(key), _) => self.store.put(bucket, key, request.body_bytes()).await,
            // Legacy deployments let the store reject the missing key.
            (None, StatusMode::Legacy) => self.store.put(bucket, "", request.body_bytes()).await,
            (None, StatusMode::Corrected) => {
                warn!("Rejecting put without '{}' header", KEY_HEADER);
                Err(StoreError::invalid_argument(
                    "MissingRequiredParameter",
                    format!("Missing required header '{}'", KEY_HEADER),
                ))
            }
        };

        match &result {
            Ok(written) => info!(bucket = %bucket, key = ?key, e_tag = ?written.e_tag, "Stored object"),
            Err(e) => error!(bucket = %bucket, key = ?key, "Failed to store object: {}", e),
        }

        ResponseEnvelope::build(
            self.settings.status_mode,
            &Outcome::from_result(result),
            request,
            context,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{Call, RecordingStore};
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn pet_request() -> InboundRequest {
        InboundRequest::new()
            .with_header("keyName", "pet1")
            .with_body("{\"name\":\"Rex\"}")
    }

    #[tokio::test]
    async fn test_single_put_with_header_key_and_body() {
        let store = Arc::new(RecordingStore::default());
        let handler = PutHandler::new(store.clone(), GatewaySettings::new("pets", StatusMode::Corrected));

        let envelope = handler.handle(&pet_request(), &Value::Null).await;
        let body = envelope.body_json().unwrap();

        assert_eq!(envelope.status_code, "200");
        assert_eq!(body["data"]["result"]["ETag"], "\"recorded\"");
        assert_eq!(
            store.calls(),
            vec![Call::Put {
                bucket: "pets".to_string(),
                key: "pet1".to_string(),
                body: b"{\"name\":\"Rex\"}".to_vec(),
            }]
        );
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let store = Arc::new(RecordingStore::default());
        let handler = PutHandler::new(store.clone(), GatewaySettings::new("pets", StatusMode::Corrected));

        let request = InboundRequest::new().with_body("{}");
        let envelope = handler.handle(&request, &Value::Null).await;
        let body = envelope.body_json().unwrap();

        assert_eq!(envelope.status_code, "400");
        assert_eq!(body["data"]["ok"], false);
        assert_eq!(body["data"]["error"]["kind"], "InvalidArgument");
        assert!(body["data"]["error"]["message"].as_str().unwrap().contains("keyName"));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_legacy_hits_store() {
        let store = Arc::new(RecordingStore::default());
        let handler = PutHandler::new(store.clone(), GatewaySettings::new("pets", StatusMode::Legacy));

        let request = InboundRequest::new().with_body("{}");
        let envelope = handler.handle(&request, &Value::Null).await;
        let body = envelope.body_json().unwrap();

        assert_eq!(envelope.status_code, "200");
        assert_eq!(body["data"]["kind"], "InvalidArgument");
        assert_eq!(body["data"]["code"], "MissingRequiredParameter");
        assert_eq!(store.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_repeated_put_is_idempotent() {
        let store = MemoryStore::with_bucket("pets");
        let handler = PutHandler::new(Arc::new(store.clone()), GatewaySettings::new("pets", StatusMode::Corrected));

        let first = handler.handle(&pet_request(), &Value::Null).await;
        let second = handler.handle(&pet_request(), &Value::Null).await;

        assert_eq!(first.status_code, second.status_code);
        assert_eq!(
            first.body_json().unwrap()["data"],
            second.body_json().unwrap()["data"]
        );
        assert_eq!(store.object("pets", "pet1").await, Some(b"{\"name\":\"Rex\"}".to_vec()));
        assert_eq!(store.len("pets").await, 1);
    }

    #[tokio::test]
    async fn test_absent_body_writes_empty_object() {
        let store = MemoryStore::with_bucket("pets");
        let handler = PutHandler::new(Arc::new(store.clone()), GatewaySettings::new("pets", StatusMode::Corrected));

        let request = InboundRequest::new().with_header("keyName", "empty");
        let envelope = handler.handle(&request, &json!({ "functionName": "put" })).await;

        assert_eq!(envelope.status_code, "200");
        assert_eq!(envelope.body_json().unwrap()["context"]["functionName"], "put");
        assert_eq!(store.object("pets", "empty").await, Some(Vec::new()));
    }
}
