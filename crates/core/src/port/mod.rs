// Port Layer - Interfaces for external dependencies

pub mod blob_store;
pub mod id_provider; // For deterministic testing
pub mod queue;
pub mod time_provider;

// Re-exports
pub use blob_store::{BlobStore, BlobStoreExt};
pub use id_provider::IdProvider;
pub use queue::{Queue, ReceivedMessage};
pub use time_provider::TimeProvider;
