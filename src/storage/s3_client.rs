// S3-compatible object store backed by rust-s3

use anyhow::Result;
use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::region::Region;
use s3::Bucket;
use tracing::debug;

use super::{validate_key, ObjectList, ObjectStore, ObjectSummary, PutResult};
use crate::config::StorageConfig;
use crate::types::{StoreError, StoreResult};

/// Store client for AWS S3 or any S3-compatible endpoint.
///
/// Holds region and credentials only; a `Bucket` handle is derived per call
/// since the bucket name is an argument of every operation.
pub struct S3Store {
    region: Region,
    credentials: Credentials,
    path_style: bool,
}

impl S3Store {
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let region = match &config.s3_endpoint {
            Some(endpoint) => Region::Custom {
                region: config.s3_region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config.s3_region.parse()?,
        };

        let credentials = match (&config.s3_access_key_id, &config.s3_secret_access_key) {
            (Some(access_key), Some(secret_key)) => {
                Credentials::new(Some(access_key.as_str()), Some(secret_key.as_str()), None, None, None)?
            }
            _ => Credentials::default()?,
        };

        Ok(Self {
            region,
            credentials,
            path_style: config.s3_path_style,
        })
    }

    fn bucket(&self, name: &str) -> StoreResult<Bucket> {
        let bucket = Bucket::new(name, self.region.clone(), self.credentials.clone())
            .map_err(map_s3_error)?;

        Ok(if self.path_style {
            bucket.with_path_style()
        } else {
            bucket
        })
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list(&self, bucket: &str, max_keys: usize) -> StoreResult<ObjectList> {
        let handle = self.bucket(bucket)?;
        let (page, status) = handle
            .list_page(String::new(), None, None, None, Some(max_keys))
            .await
            .map_err(map_s3_error)?;
        debug!(bucket, status, objects = page.contents.len(), "ListObjectsV2 completed");

        Ok(ObjectList {
            name: page.name,
            max_keys,
            is_truncated: page.is_truncated,
            contents: page
                .contents
                .into_iter()
                .take(max_keys)
                .map(|object| ObjectSummary {
                    key: object.key,
                    size: object.size,
                    last_modified: object.last_modified,
                    e_tag: object.e_tag,
                    storage_class: object.storage_class,
                })
                .collect(),
        })
    }

    async fn put(&self, bucket: &str, key: &str, body: &[u8]) -> StoreResult<PutResult> {
        validate_key(key)?;

        let handle = self.bucket(bucket)?;
        // Non-2xx answers arrive as `S3Error::HttpFailWithBody` under rust-s3's
        // default `fail-on-err` feature.
        let response = handle.put_object(key, body).await.map_err(map_s3_error)?;
        let status = response.status_code();
        debug!(bucket, key, status, "PutObject completed");

        let headers = response.headers();
        let e_tag = headers.get("etag").cloned().or_else(|| {
            let raw = String::from_utf8_lossy(response.bytes()).trim().to_string();
            (!raw.is_empty()).then_some(raw)
        });

        Ok(PutResult {
            e_tag,
            version_id: headers.get("x-amz-version-id").cloned(),
        })
    }
}

fn map_s3_error(err: S3Error) -> StoreError {
    match err {
        S3Error::HttpFailWithBody(status, body) => error_from_body(status, &body),
        other => StoreError::unavailable("NetworkingError", other.to_string()),
    }
}

/// Build a [`StoreError`] from an S3 XML error document.
fn error_from_body(status: u16, body: &str) -> StoreError {
    let parsed = parse_error_xml(body);
    let code = parsed.code.unwrap_or_else(|| format!("Http{}", status));
    let message = parsed.message.unwrap_or_else(|| body.trim().to_string());
    StoreError::from_status(status, code, message)
}

#[derive(Debug, Default)]
struct S3ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Pull `<Code>` and `<Message>` out of an `<Error>` document. Anything
/// unparsable leaves the fields empty.
fn parse_error_xml(xml: &str) -> S3ErrorBody {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut parsed = S3ErrorBody::default();
    let mut current_element = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                current_element = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
            }
            Ok(Event::Text(e)) => {
                let Ok(text) = e.unescape() else {
                    break;
                };
                match current_element.as_str() {
                    "Code" => parsed.code = Some(text.into_owned()),
                    "Message" => parsed.message = Some(text.into_owned()),
                    _ => {}
                }
            }
            Ok(Event::End(_)) => current_element.clear(),
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    parsed
}
