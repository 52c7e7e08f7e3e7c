//! S3-backed [`ObjectStore`] implementation.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::{ObjectStore, StorageError};

/// Build an S3 client from the ambient AWS environment (credentials chain,
/// region). An explicit endpoint override is used for S3-compatible local
/// stores, which also need path-style addressing.
pub async fn create_client(endpoint: Option<&str>) -> Client {
    let shared = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    match endpoint {
        Some(url) => {
            let config = aws_sdk_s3::config::Builder::from(&shared)
                .endpoint_url(url)
                .force_path_style(true)
                .build();
            Client::from_conf(config)
        }
        None => Client::new(&shared),
    }
}

/// Production object store on top of `aws-sdk-s3`.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                // A missing key is a domain condition; everything else is a
                // transient fault.
                if err
                    .as_service_error()
                    .is_some_and(|service| service.is_no_such_key())
                {
                    StorageError::NotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    StorageError::Transient(format!("S3 get {bucket}/{key} failed: {err}"))
                }
            })?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|err| {
                StorageError::Transient(format!("Reading S3 body for {bucket}/{key} failed: {err}"))
            })?;

        Ok(bytes.to_vec())
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|err| {
                StorageError::Transient(format!("S3 put {bucket}/{key} failed: {err}"))
            })?;

        tracing::debug!(bucket, key, "Uploaded object");
        Ok(())
    }
}
