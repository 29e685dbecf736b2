use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use super::{InboundRequest, StatusMode};
use crate::types::{ErrorKind, StoreError, StoreResult};

pub const GREETING: &str = "hello world";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Settled result of the single store operation of an invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Ok(Value),
    Err(StoreError),
}

impl Outcome {
    pub fn from_result<T: Serialize>(result: StoreResult<T>) -> Self {
        match result {
            Ok(value) => match serde_json::to_value(value) {
                Ok(value) => Outcome::Ok(value),
                Err(e) => {
                    warn!("Failed to serialize store result: {}", e);
                    Outcome::Err(StoreError::unavailable("SerializationError", e.to_string()))
                }
            },
            Err(err) => Outcome::Err(err),
        }
    }

    /// HTTP status reported for this outcome under `mode`.
    pub fn status_code(&self, mode: StatusMode) -> u16 {
        match (mode, self) {
            (StatusMode::Legacy, _) | (StatusMode::Corrected, Outcome::Ok(_)) => 200,
            (StatusMode::Corrected, Outcome::Err(err)) => match err.kind {
                ErrorKind::InvalidArgument => 400,
                ErrorKind::NotFound => 404,
                ErrorKind::StoreUnavailable => 503,
            },
        }
    }

    /// The `data` field of the response body.
    ///
    /// Legacy mode puts the result or the error object in directly; corrected
    /// mode tags it so callers need not guess which one they got.
    pub fn data(&self, mode: StatusMode) -> Value {
        match (mode, self) {
            (StatusMode::Legacy, Outcome::Ok(result)) => result.clone(),
            (StatusMode::Legacy, Outcome::Err(err)) => {
                serde_json::to_value(err).unwrap_or_else(|_| json!({ "message": err.to_string() }))
            }
            (StatusMode::Corrected, Outcome::Ok(result)) => json!({ "ok": true, "result": result }),
            (StatusMode::Corrected, Outcome::Err(err)) => json!({
                "ok": false,
                "error": {
                    "kind": err.kind,
                    "code": err.code,
                    "message": err.message,
                }
            }),
        }
    }
}

/// HTTP-style response returned by every handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: String,
    pub headers: BTreeMap<String, String>,
    pub is_base64_encoded: bool,
    /// JSON document: `message`, `data`, `context` and `event`.
    pub body: String,
}

impl ResponseEnvelope {
    /// Build the envelope for a settled outcome. The only place envelopes are made.
    pub fn build(
        mode: StatusMode,
        outcome: &Outcome,
        event: &InboundRequest,
        context: &Value,
    ) -> Self {
        let event = serde_json::to_value(event).unwrap_or(Value::Null);
        let body = json!({
            "message": GREETING,
            "data": outcome.data(mode),
            "context": context,
            "event": event,
        });

        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string());

        Self {
            status_code: outcome.status_code(mode).to_string(),
            headers,
            is_base64_encoded: false,
            body: body.to_string(),
        }
    }

    /// Parse `body` back into JSON.
    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}
