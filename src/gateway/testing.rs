// Recording store double for handler tests

use std::sync::Mutex;

use async_trait::async_trait;

use crate::storage::{ObjectList, ObjectStore, PutResult};
use crate::types::{StoreError, StoreResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List { bucket: String, max_keys: usize },
    Put { bucket: String, key: String, body: Vec<u8> },
}

/// Records every call and answers with a fixed result.
#[derive(Default)]
pub struct RecordingStore {
    calls: Mutex<Vec<Call>>,
    failure: Option<StoreError>,
}

impl RecordingStore {
    pub fn failing(err: StoreError) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(err),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> StoreResult<()> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn list(&self, bucket: &str, max_keys: usize) -> StoreResult<ObjectList> {
        self.record(Call::List {
            bucket: bucket.to_string(),
            max_keys,
        })?;
        Ok(ObjectList {
            name: bucket.to_string(),
            max_keys,
            is_truncated: false,
            contents: Vec::new(),
        })
    }

    async fn put(&self, bucket: &str, key: &str, body: &[u8]) -> StoreResult<PutResult> {
        self.record(Call::Put {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body: body.to_vec(),
        })?;
        crate::storage::validate_key(key)?;
        Ok(PutResult {
            e_tag: Some("\"recorded\"".to_string()),
            version_id: None,
        })
    }
}
