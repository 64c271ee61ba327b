//! Stage Dispatcher (SD).
//!
//! Writes a stage's input artifact to the blob store and enqueues the
//! corresponding task message. The two writes are deliberately sequenced —
//! the blob `put` must complete before the queue `send` — so a worker can
//! never observe a task message whose `payload_key` doesn't exist yet
//! (SPEC_FULL.md §4.4, P6).

use crate::domain::{Stage, StageTaskMessage};
use crate::error::Result;
use crate::port::{BlobStore, Queue, TimeProvider};
use std::sync::Arc;
use tracing::info;

/// Identifies this orchestrator instance in dispatched task messages'
/// `source` field. Purely informational for workers/operators.
pub const DISPATCH_SOURCE: &str = "launchline-orchestrator";

pub struct StageDispatcher {
    blob: Arc<dyn BlobStore>,
    queue: Arc<dyn Queue>,
    time: Arc<dyn TimeProvider>,
}

impl StageDispatcher {
    pub fn new(blob: Arc<dyn BlobStore>, queue: Arc<dyn Queue>, time: Arc<dyn TimeProvider>) -> Self {
        Self { blob, queue, time }
    }

    /// Dispatch `stage` for `job_id` with the given `input` payload.
    ///
    /// Idempotent up to blob overwrite: redispatching the same
    /// `(job_id, stage, input)` overwrites the input artifact identically
    /// and re-enqueues a task message, which a correctly-written worker
    /// tolerates (SPEC_FULL.md §4.4, R1).
    pub async fn dispatch(&self, job_id: &str, stage: Stage, input: serde_json::Value) -> Result<()> {
        let payload_key = stage.input_key(job_id);
        self.blob.put(&payload_key, input).await?;

        let message = StageTaskMessage {
            job_id: job_id.to_string(),
            task_type: stage,
            payload_key: payload_key.clone(),
            timestamp: self.time.now_millis(),
            source: DISPATCH_SOURCE.to_string(),
        };
        let body = serde_json::to_value(&message)?;
        self.queue.send(stage.queue_name(), body).await?;

        info!(job_id, stage = stage.as_str(), payload_key = %payload_key, "dispatched stage");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::time_provider::SystemTimeProvider;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeBlob {
        store: Mutex<std::collections::HashMap<String, serde_json::Value>>,
    }

    #[async_trait]
    impl BlobStore for FakeBlob {
        async fn put(&self, key: &str, value: serde_json::Value) -> Result<()> {
            self.store.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }
        async fn get(&self, key: &str) -> Result<serde_json::Value> {
            self.store
                .lock()
                .unwrap()
                .get(key)
                .cloned()
                .ok_or_else(|| crate::error::AppError::NotFound(key.to_string()))
        }
    }

    #[derive(Default)]
    struct FakeQueue {
        sent: Mutex<Vec<(String, serde_json::Value)>>,
    }

    #[async_trait]
    impl Queue for FakeQueue {
        async fn send(&self, queue: &str, body: serde_json::Value) -> Result<()> {
            self.sent.lock().unwrap().push((queue.to_string(), body));
            Ok(())
        }
        async fn receive(
            &self,
            _queue: &str,
            _max: i32,
            _wait_seconds: i32,
        ) -> Result<Vec<crate::port::ReceivedMessage>> {
            Ok(vec![])
        }
        async fn delete(&self, _queue: &str, _receipt_handle: &str) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn dispatch_writes_blob_before_sending() {
        let blob = Arc::new(FakeBlob::default());
        let queue = Arc::new(FakeQueue::default());
        let sd = StageDispatcher::new(blob.clone(), queue.clone(), Arc::new(SystemTimeProvider));

        sd.dispatch("j1", Stage::Research, serde_json::json!({"product": "Acme"}))
            .await
            .unwrap();

        assert!(blob.get("j1/research.json").await.is_ok());
        let sent = queue.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "research");
    }
}
