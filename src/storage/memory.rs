// In-process object store

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use super::{validate_key, ObjectList, ObjectStore, ObjectSummary, PutResult};
use crate::types::{StoreError, StoreResult};

#[derive(Debug, Clone)]
struct StoredObject {
    body: Vec<u8>,
    e_tag: String,
    last_modified: DateTime<Utc>,
}

type Buckets = BTreeMap<String, BTreeMap<String, StoredObject>>;

/// Buckets held in memory. Clones share the same contents.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Buckets>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already contains one empty bucket.
    pub fn with_bucket(name: &str) -> Self {
        let mut buckets = Buckets::new();
        buckets.insert(name.to_string(), BTreeMap::new());
        Self {
            inner: Arc::new(RwLock::new(buckets)),
        }
    }

    pub async fn create_bucket(&self, name: &str) {
        let mut guard = self.inner.write().await;
        guard.entry(name.to_string()).or_default();
    }

    /// Current content of `(bucket, key)`, if any.
    pub async fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        let guard = self.inner.read().await;
        guard.get(bucket)?.get(key).map(|o| o.body.clone())
    }

    pub async fn len(&self, bucket: &str) -> usize {
        let guard = self.inner.read().await;
        guard.get(bucket).map_or(0, |b| b.len())
    }
}

fn no_such_bucket(bucket: &str) -> StoreError {
    StoreError::not_found("NoSuchBucket", format!("The specified bucket does not exist: {}", bucket))
        .with_status(404)
}

fn content_e_tag(body: &[u8]) -> String {
    let digest = hex::encode(Sha256::digest(body));
    format!("\"{}\"", &digest[..32])
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list(&self, bucket: &str, max_keys: usize) -> StoreResult<ObjectList> {
        let guard = self.inner.read().await;
        let objects = guard.get(bucket).ok_or_else(|| no_such_bucket(bucket))?;

        let contents = objects
            .iter()
            .take(max_keys)
            .map(|(key, object)| ObjectSummary {
                key: key.clone(),
                size: object.body.len() as u64,
                last_modified: object.last_modified.to_rfc3339_opts(SecondsFormat::Millis, true),
                e_tag: Some(object.e_tag.clone()),
                storage_class: Some("STANDARD".to_string()),
            })
            .collect();

        Ok(ObjectList {
            name: bucket.to_string(),
            max_keys,
            is_truncated: objects.len() > max_keys,
            contents,
        })
    }

    async fn put(&self, bucket: &str, key: &str, body: &[u8]) -> StoreResult<PutResult> {
        validate_key(key)?;

        let mut guard = self.inner.write().await;
        let objects = guard.get_mut(bucket).ok_or_else(|| no_such_bucket(bucket))?;

        let e_tag = content_e_tag(body);
        objects.insert(
            key.to_string(),
            StoredObject {
                body: body.to_vec(),
                e_tag: e_tag.clone(),
                last_modified: Utc::now(),
            },
        );

        Ok(PutResult {
            e_tag: Some(e_tag),
            version_id: None,
        })
    }
}
