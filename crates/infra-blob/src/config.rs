//! Blob store configuration, environment-provided per SPEC_FULL.md §10.

use launchline_core::error::{AppError, Result};

/// Bucket name and optional local-development overrides for the S3 client.
#[derive(Debug, Clone)]
pub struct BlobStoreConfig {
    pub bucket: String,
    /// Overrides the default AWS endpoint resolution; set for local
    /// development against a compatible object store (e.g. LocalStack,
    /// MinIO). Left unset in production, where ambient credentials and
    /// the region's real endpoint are used.
    pub endpoint_url: Option<String>,
    pub region: Option<String>,
}

impl BlobStoreConfig {
    /// Read configuration from environment variables:
    /// - `LAUNCHLINE_BUCKET` (required)
    /// - `LAUNCHLINE_BLOB_ENDPOINT` (optional)
    /// - `LAUNCHLINE_AWS_REGION` (optional)
    pub fn from_env() -> Result<Self> {
        let bucket = std::env::var("LAUNCHLINE_BUCKET")
            .map_err(|_| AppError::Config("LAUNCHLINE_BUCKET is required".to_string()))?;
        Ok(Self {
            bucket,
            endpoint_url: std::env::var("LAUNCHLINE_BLOB_ENDPOINT").ok(),
            region: std::env::var("LAUNCHLINE_AWS_REGION").ok(),
        })
    }
}
