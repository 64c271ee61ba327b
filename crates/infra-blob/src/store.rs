// S3 Blob Store Adapter

use crate::config::BlobStoreConfig;
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use launchline_core::error::{AppError, Result};
use launchline_core::port::BlobStore;
use tracing::debug;

pub struct S3BlobStore {
    client: Client,
    bucket: String,
}

impl S3BlobStore {
    /// Build a client from ambient AWS configuration (region, credentials
    /// resolved the normal SDK way), applying any local-development
    /// overrides present in `config`.
    pub async fn connect(config: BlobStoreConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(aws_sdk_s3::config::Region::new(region.clone()));
        }
        let shared_config = loader.load().await;

        let mut s3_config = aws_sdk_s3::config::Builder::from(&shared_config);
        if let Some(endpoint) = &config.endpoint_url {
            s3_config = s3_config.endpoint_url(endpoint).force_path_style(true);
        }

        Self { client: Client::from_conf(s3_config.build()), bucket: config.bucket }
    }

    pub fn from_client(client: Client, bucket: impl Into<String>) -> Self {
        Self { client, bucket: bucket.into() }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, key: &str, value: serde_json::Value) -> Result<()> {
        let bytes = serde_json::to_vec(&value)?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("application/json")
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;
        debug!(key, bucket = %self.bucket, "put artifact");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<serde_json::Value> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if is_not_found(&e) {
                    AppError::NotFound(key.to_string())
                } else {
                    AppError::StorageUnavailable(e.to_string())
                }
            })?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| AppError::StorageUnavailable(e.to_string()))?
            .into_bytes();

        serde_json::from_slice(&bytes).map_err(|_| AppError::CorruptArtifact(key.to_string()))
    }
}

fn is_not_found<E>(err: &aws_sdk_s3::error::SdkError<E>) -> bool
where
    E: std::fmt::Debug,
{
    // aws-sdk-s3 surfaces a missing key as a service error whose message
    // mentions NoSuchKey; there is no stable typed variant across every
    // operation, so we match on the rendered error text.
    format!("{err:?}").contains("NoSuchKey")
}
