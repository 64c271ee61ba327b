// Queue Adapter Port (QA)

use crate::error::Result;
use async_trait::async_trait;

/// A message received from a queue, carrying an opaque receipt handle that
/// must be presented back to `delete` to acknowledge it.
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    pub body: String,
    pub receipt_handle: String,
}

/// Long-poll receive, send, delete against named queues.
///
/// The adapter MUST NOT auto-acknowledge: deletion is caller-driven and
/// only after successful processing, which is how redelivery-on-crash is
/// achieved. At-least-once delivery; callers must be idempotent.
#[async_trait]
pub trait Queue: Send + Sync {
    /// Enqueue an opaque message body. At-least-once semantics.
    async fn send(&self, queue: &str, body: serde_json::Value) -> Result<()>;

    /// Long-poll `queue` with server-side wait up to `wait_seconds`,
    /// returning up to `max` messages. Empty on timeout.
    async fn receive(
        &self,
        queue: &str,
        max: i32,
        wait_seconds: i32,
    ) -> Result<Vec<ReceivedMessage>>;

    /// Acknowledge a previously received message. Idempotent.
    async fn delete(&self, queue: &str, receipt_handle: &str) -> Result<()>;
}
