use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info};

use super::{GatewaySettings, InboundRequest, Outcome, ResponseEnvelope, LIST_MAX_KEYS};
use crate::storage::ObjectStore;

/// Lists the first [`LIST_MAX_KEYS`] objects of the configured bucket.
///
/// The request content is never inspected; it is only echoed.
pub struct ListHandler {
    store: Arc<dyn ObjectStore>,
    settings: GatewaySettings,
}

impl ListHandler {
    pub fn new(store: Arc<dyn ObjectStore>, settings: GatewaySettings) -> Self {
        Self { store, settings }
    }

    pub async fn handle(&self, request: &InboundRequest, context: &Value) -> ResponseEnvelope {
        debug!(event = ?request, context = %context, "List invocation received");

        let result = self.store.list(&self.settings.bucket, LIST_MAX_KEYS).await;
        match &result {
            Ok(list) => info!(bucket = %self.settings.bucket, objects = list.contents.len(), "Listed objects"),
            Err(e) => error!(bucket = %self.settings.bucket, "Failed to list objects: {}", e),
        }

        ResponseEnvelope::build(
            self.settings.status_mode,
            &Outcome::from_result(result),
            request,
            context,
        )
    }
}
