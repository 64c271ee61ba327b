// Blob Store Adapter Port (BSA)

use crate::error::{AppError, Result};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

/// Key-addressed put/get of JSON artifacts under a single bucket.
///
/// No caching, no versioning. Keys are case-sensitive and slash-delimited;
/// callers own the naming scheme (`{job_id}/{stage}.json` for inputs,
/// `{job_id}/{stage}-result.json` for outputs).
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `value` (already serialized to JSON) under `key`.
    ///
    /// Errors with `AppError::StorageUnavailable` on transport failure.
    async fn put(&self, key: &str, value: serde_json::Value) -> Result<()>;

    /// Fetch and parse the JSON value stored under `key`.
    ///
    /// Errors with `AppError::NotFound` if the key is absent,
    /// `AppError::CorruptArtifact` if the stored bytes do not parse as JSON.
    async fn get(&self, key: &str) -> Result<serde_json::Value>;
}

/// Typed convenience helpers layered over the raw `serde_json::Value`
/// trait methods, so call sites don't repeat the serialize/deserialize
/// boilerplate. Blanket-implemented for every `BlobStore`.
#[async_trait]
pub trait BlobStoreExt: BlobStore {
    async fn put_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<String> {
        let json = serde_json::to_value(value)?;
        self.put(key, json).await?;
        Ok(key.to_string())
    }

    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self.get(key).await?;
        serde_json::from_value(value).map_err(|_| AppError::CorruptArtifact(key.to_string()))
    }
}

impl<T: BlobStore + ?Sized> BlobStoreExt for T {}
