//! Object-storage gateway handlers
//!
//! Each handler turns one inbound trigger event into exactly one store
//! operation and wraps the settled result in a [`ResponseEnvelope`]:
//!
//! ```text
//! Received -> OperationInFlight -> Settled(Success|Failure) -> EnvelopeBuilt -> Returned
//! ```
//!
//! How failures reach the caller is governed by [`StatusMode`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod envelope;
pub mod list;
pub mod put;
pub mod request;

#[cfg(test)]
pub(crate) mod testing;

pub use envelope::{Outcome, ResponseEnvelope};
pub use list::ListHandler;
pub use put::PutHandler;
pub use request::InboundRequest;

/// Page size of every list call.
pub const LIST_MAX_KEYS: usize = 6;

/// Request header carrying the object key on the put path. Matched exactly.
pub const KEY_HEADER: &str = "keyName";

/// How store outcomes map onto the envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusMode {
    /// `statusCode` follows the outcome; `data` is a tagged `ok`/`error` object.
    #[default]
    Corrected,
    /// `statusCode` is always `"200"`; `data` is the raw result or error.
    Legacy,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown status mode '{0}', expected 'corrected' or 'legacy'")]
pub struct ParseStatusModeError(String);

impl FromStr for StatusMode {
    type Err = ParseStatusModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "corrected" => Ok(StatusMode::Corrected),
            "legacy" => Ok(StatusMode::Legacy),
            other => Err(ParseStatusModeError(other.to_string())),
        }
    }
}

/// Per-deployment settings shared by both handlers.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub bucket: String,
    pub status_mode: StatusMode,
}

impl GatewaySettings {
    pub fn new(bucket: impl Into<String>, status_mode: StatusMode) -> Self {
        Self {
            bucket: bucket.into(),
            status_mode,
        }
    }
}
