//! Object storage seam
//!
//! Handlers talk to the bucket through the [`ObjectStore`] trait. Two
//! implementations ship with the crate:
//! - [`S3Store`] - any S3-compatible service, via `rust-s3`
//! - [`MemoryStore`] - in-process buckets for local runs and tests

use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::StorageConfig;
use crate::types::{StoreError, StoreResult};

pub mod memory;
pub mod s3_client;

pub use memory::MemoryStore;
pub use s3_client::S3Store;

/// The list/put capability the gateway handlers depend on.
///
/// Implementations own credentials, connection reuse and retries; none of
/// that is visible here.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List at most `max_keys` objects of `bucket`, in store-defined order.
    async fn list(&self, bucket: &str, max_keys: usize) -> StoreResult<ObjectList>;

    /// Create or overwrite the object at `(bucket, key)`.
    async fn put(&self, bucket: &str, key: &str, body: &[u8]) -> StoreResult<PutResult>;
}

/// One object descriptor as reported by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
    pub last_modified: String,
    #[serde(rename = "ETag", skip_serializing_if = "Option::is_none")]
    pub e_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}

/// A single, bounded page of object descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectList {
    pub name: String,
    pub max_keys: usize,
    pub is_truncated: bool,
    pub contents: Vec<ObjectSummary>,
}

impl ObjectList {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.contents.iter().map(|o| o.key.as_str())
    }
}

/// Write metadata returned for a successful put.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutResult {
    #[serde(rename = "ETag", skip_serializing_if = "Option::is_none")]
    pub e_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

/// Reject keys the store would refuse anyway. Runs before any network call.
pub fn validate_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::invalid_argument(
            "MissingRequiredParameter",
            "Missing required key 'Key' in params",
        ));
    }
    Ok(())
}

/// Build the process-wide store client from configuration.
pub fn create_store(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>> {
    let store: Arc<dyn ObjectStore> = match config.provider.as_str() {
        "s3" => Arc::new(S3Store::new(config)?),
        "memory" => Arc::new(MemoryStore::with_bucket(&config.s3_bucket)),
        other => bail!("Unsupported storage provider: {}", other),
    };

    info!(provider = %config.provider, bucket = %config.s3_bucket, "Object store ready");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("pet1").is_ok());

        let err = validate_key("").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        assert_eq!(err.code, "MissingRequiredParameter");
    }

    #[test]
    fn test_object_list_serializes_like_s3() {
        let list = ObjectList {
            name: "pets".to_string(),
            max_keys: 6,
            is_truncated: false,
            contents: vec![ObjectSummary {
                key: "pet1".to_string(),
                size: 14,
                last_modified: "2024-01-01T00:00:00Z".to_string(),
                e_tag: Some("\"abc\"".to_string()),
                storage_class: None,
            }],
        };
        let value = serde_json::to_value(&list).unwrap();

        assert_eq!(value["MaxKeys"], 6);
        assert_eq!(value["Contents"][0]["Key"], "pet1");
        assert_eq!(value["Contents"][0]["ETag"], "\"abc\"");
        assert!(value["Contents"][0].get("StorageClass").is_none());
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let config = StorageConfig {
            provider: "gcs".to_string(),
            s3_bucket: "pets".to_string(),
            s3_region: "us-east-1".to_string(),
            s3_access_key_id: None,
            s3_secret_access_key: None,
            s3_endpoint: None,
            s3_path_style: false,
        };

        assert!(create_store(&config).is_err());
    }
}
