//! S3-backed implementation of `launchline_core::port::BlobStore`.

mod config;
mod store;

pub use config::BlobStoreConfig;
pub use store::S3BlobStore;
